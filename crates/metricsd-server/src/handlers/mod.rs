//! HTTP handlers for the metric protocol.
//!
//! Every validation failure stops at the handler boundary: it is converted to
//! a status code plus a plain-text message and never propagates further.

pub mod list;
pub mod update;
pub mod value;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use thiserror::Error;

use metricsd_core::error::{ClientCode, MetricsError};

/// Response-side wrapper so `MetricsError` can be returned from handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub MetricsError);

impl ApiError {
    /// Malformed paths and unknown names both answer 404; a bad type token,
    /// a bad value and a bad content type are distinct client errors.
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::MalformedPath | ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::UnknownMetricType | ClientCode::InvalidValue => StatusCode::BAD_REQUEST,
            ClientCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ClientCode::InvalidConfig | ClientCode::Transport | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.0.to_string()).into_response()
    }
}

/// `text/plain` success body.
pub(crate) fn plain(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}

//! `GET /value/<kind>/<name>`

use axum::{extract::State, http::Uri, response::Response};

use metricsd_core::error::MetricsError;
use metricsd_core::protocol::{decode_path, read::read_target, render};
use metricsd_core::MetricKind;

use super::{plain, ApiError};
use crate::app_state::AppState;

pub async fn gauge(State(app): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    read(&app, MetricKind::Gauge, &uri)
}

pub async fn counter(State(app): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    read(&app, MetricKind::Counter, &uri)
}

fn read(app: &AppState, kind: MetricKind, uri: &Uri) -> Result<Response, ApiError> {
    let segments = decode_path(uri.path()).map_err(|e| app.reject("value", e))?;
    let name = read_target(kind, &segments).map_err(|e| app.reject("value", e))?;

    let value = app.storage().get(kind, name).ok_or_else(|| {
        app.reject(
            "value",
            MetricsError::MetricNotFound {
                kind,
                name: name.to_string(),
            },
        )
    })?;

    Ok(plain(render::value(value)))
}

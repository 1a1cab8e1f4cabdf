//! `POST /update/<kind>/<name>/<value>`

use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Response,
};

use metricsd_core::protocol::{decode_path, render};
use metricsd_core::{MetricKind, Update};

use super::{content_type, plain, ApiError};
use crate::app_state::AppState;

/// Resolve the kind token, then decode and merge into that kind's store.
/// The store is touched only after every check has passed.
pub async fn update(
    State(app): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let segments = decode_path(uri.path()).map_err(|e| app.reject("update", e))?;
    let kind = MetricKind::from_segments(&segments).map_err(|e| app.reject("update", e))?;
    let update = Update::decode(kind, &segments, content_type(&headers))
        .map_err(|e| app.reject("update", e))?;

    let stored = app.storage().apply(&update);
    app.metrics().updates.inc(&[("kind", kind.as_str())]);
    tracing::debug!(%kind, metric = %update.name, posted = %update.value, stored = %stored, "metric updated");

    Ok(plain(render::confirmation(&update.name, stored)))
}

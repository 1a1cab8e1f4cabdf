use axum::{extract::State, Json};

use metricsd_core::Snapshot;

use crate::app_state::AppState;

/// `GET /`: every stored metric, keys sorted.
pub async fn list(State(app): State<AppState>) -> Json<Snapshot> {
    Json(app.storage().snapshot())
}

//! Serve loop with graceful shutdown.

use std::future::Future;

use tokio::net::TcpListener;

use metricsd_core::error::{MetricsError, Result};

use crate::{app_state::AppState, router};

/// Serve `state` on an already bound listener until `shutdown` resolves.
/// Each connection runs on its own task; handlers share only the stores.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router::build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| MetricsError::Transport(format!("server failed: {e}")))
}

/// Resolves on Ctrl-C and flips the state into draining so `/readyz` reports
/// 503 while in-flight requests finish.
pub async fn ctrl_c(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested, draining");
    state.metrics().set_draining();
}

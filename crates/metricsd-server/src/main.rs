//! metricsd collector.
//!
//! - `POST /update/<kind>/<name>/<value>` merges one metric
//! - `GET /value/<kind>/<name>` reads it back
//! - `GET /` lists everything, `/healthz` `/readyz` `/metrics` for operators

use tracing_subscriber::{fmt, EnvFilter};

use metricsd_server::{app_state::AppState, config, serve};

const CONFIG_ENV: &str = "METRICSD_SERVER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "metricsd-server.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path)?;
    let listen = cfg.listen_addr()?;

    let state = AppState::new(cfg);

    tracing::info!(%listen, "metricsd-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    serve::run(listener, state.clone(), serve::ctrl_c(state)).await?;
    tracing::info!("metricsd-server stopped");
    Ok(())
}

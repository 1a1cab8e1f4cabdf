//! metricsd agent binary.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use metricsd_agent::{config, HttpReporter, MemorySampler, Poller};

const CONFIG_ENV: &str = "METRICSD_AGENT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "metricsd-agent.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path)?;
    let agent = &cfg.agent;

    let reporter = HttpReporter::new(&agent.server_url, agent.request_timeout())?;
    let poller = Poller::new(Arc::new(reporter), Box::new(MemorySampler::new()));

    tracing::info!(
        server = %agent.server_url,
        poll_interval_ms = agent.poll_interval_ms,
        "metricsd-agent starting"
    );
    poller.run(agent.poll_interval(), shutdown()).await;
    tracing::info!("metricsd-agent stopped");
    Ok(())
}

async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

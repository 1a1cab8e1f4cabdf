//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use metricsd_core::error::{MetricsError, Result};

pub use schema::{AgentConfig, AgentSection};

pub fn load_or_default(path: &str) -> Result<AgentConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path, "config file not found, using defaults");
            Ok(AgentConfig::default())
        }
        Err(e) => Err(MetricsError::InvalidConfig(format!("read {path} failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

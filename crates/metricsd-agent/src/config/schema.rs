use std::time::Duration;

use serde::Deserialize;
use metricsd_core::error::{MetricsError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub agent: AgentSection,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: 1,
            agent: AgentSection::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.agent.validate()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl AgentSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(MetricsError::InvalidConfig(
                "agent.server_url must start with http:// or https://".into(),
            ));
        }
        if !(100..=3_600_000).contains(&self.poll_interval_ms) {
            return Err(MetricsError::InvalidConfig(
                "agent.poll_interval_ms must be between 100 and 3600000".into(),
            ));
        }
        if !(100..=120_000).contains(&self.request_timeout_ms) {
            return Err(MetricsError::InvalidConfig(
                "agent.request_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".into()
}
fn default_poll_interval_ms() -> u64 {
    5000
}
fn default_request_timeout_ms() -> u64 {
    10000
}

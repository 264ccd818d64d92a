use std::time::Duration;

use serde::Deserialize;
use tvlink_core::config::Config;

/// Dashboard service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server. Env var: `DASHBOARD_PORT`.
    #[serde(default = "default_port")]
    pub dashboard_port: u16,
    /// Base URL of the activation backend. Unset means every activation and
    /// validation is rejected without a network call.
    #[serde(default)]
    pub activation_relay_url: Option<String>,
    #[serde(default = "default_relay_timeout_secs")]
    pub relay_timeout_secs: u64,
    /// Set the `Secure` attribute on the visitor session cookie.
    #[serde(default)]
    pub session_cookie_secure: bool,
}

fn default_port() -> u16 {
    5000
}

fn default_relay_timeout_secs() -> u64 {
    15
}

impl Config for DashboardConfig {}

impl DashboardConfig {
    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_secs)
    }
}

use std::path::PathBuf;

use serde::Deserialize;

pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind_address: String,
    /// Where the simulated journey begins.
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    /// How often the synthetic location source emits a sample.
    pub sample_period_ms: u64,
    /// Overrides the default settings database location.
    pub database_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3080".to_string(),
            origin_latitude: 55.6761,
            origin_longitude: 12.5683,
            sample_period_ms: 1000,
            database_path: None,
        }
    }
}

impl DashboardConfig {
    /// Reads `dashboard.json` from the working directory, falling back to
    /// defaults when the file is missing or malformed.
    pub fn load() -> Self {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("Ignoring malformed {CONFIG_FILE}: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficStatus {
    Clear,
    Slow,
    Congested,
}

impl TrafficStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrafficStatus::Clear => "clear",
            TrafficStatus::Slow => "slow",
            TrafficStatus::Congested => "congested",
        }
    }
}

/// Simulated road conditions ahead plus a made-up arrival time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficReport {
    pub status: TrafficStatus,
    pub eta: DateTime<Utc>,
}

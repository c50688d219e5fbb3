use chrono::{DateTime, Utc};
use nav_dash_lib::{
    achievement::UnlockedAchievement,
    driving_stats::SessionSnapshot,
    theme::{MapType, Theme},
    traffic::TrafficReport,
    units::SpeedZone,
};
use serde::{Deserialize, Serialize};

/// Everything the dashboard renders for one refresh. Produced after every
/// handled event and pushed to websocket subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub clock: String,
    pub navigating: bool,
    pub location: Option<LocationReadout>,
    pub speed_kmh: i64,
    pub speed_zone: SpeedZone,
    pub session: SessionSnapshot,
    pub traffic: Option<TrafficReport>,
    pub theme: Theme,
    pub map_type: MapType,
    pub achievements: Vec<UnlockedAchievement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReadout {
    pub latitude: f64,
    pub longitude: f64,
    pub text: String,
}

impl LocationReadout {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            text: format_location(latitude, longitude),
        }
    }
}

pub fn format_clock(now: DateTime<Utc>) -> String {
    now.format("%H:%M").to_string()
}

pub fn format_location(latitude: f64, longitude: f64) -> String {
    format!("{:.6}, {:.6}", latitude, longitude)
}

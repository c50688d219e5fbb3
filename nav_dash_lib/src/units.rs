use serde::{Deserialize, Serialize};

/// Converts a raw location-source speed to the displayed km/h value,
/// rounded to a whole number.
pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    (speed_mps * 3.6).round()
}

/// Display classification of the current speed, used for the speed readout
/// coloring on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedZone {
    Calm,
    Brisk,
    Fast,
}

impl SpeedZone {
    pub fn from_kmh(speed_kmh: f64) -> Self {
        if speed_kmh > 60.0 {
            SpeedZone::Fast
        } else if speed_kmh > 30.0 {
            SpeedZone::Brisk
        } else {
            SpeedZone::Calm
        }
    }
}

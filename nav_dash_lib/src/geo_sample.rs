use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// One observation from the location source. `position` uses the geo-types
/// convention: x is longitude, y is latitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoSample {
    pub position: Point,
    pub speed_mps: f64,
    pub timestamp: DateTime<Utc>,
}

impl GeoSample {
    pub fn new(position: Point, speed_mps: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            position,
            speed_mps,
            timestamp,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}

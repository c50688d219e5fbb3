use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub name: String,
    pub position: Point,
    pub added: DateTime<Utc>,
}

impl Favorite {
    pub fn new(name: String, position: Point, added: DateTime<Utc>) -> Self {
        Self {
            name,
            position,
            added,
        }
    }
}

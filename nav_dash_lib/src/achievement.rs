use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::driving_stats::DrivingStats;

/// Unlockable dashboard achievements. Once unlocked, a flag is persisted and
/// never revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// First session that covered any distance at all.
    FirstDrive,
    /// 100 km within a single session.
    RoadWarrior,
    /// Instantaneous speed reached 120 km/h.
    SpeedDemon,
    /// One hour of continuous driving.
    Marathon,
}

pub const ALL_ACHIEVEMENTS: [Achievement; 4] = [
    Achievement::FirstDrive,
    Achievement::RoadWarrior,
    Achievement::SpeedDemon,
    Achievement::Marathon,
];

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstDrive => "First Drive",
            Achievement::RoadWarrior => "Road Warrior",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::Marathon => "Marathon",
        }
    }

    /// Whether the current session state satisfies this achievement.
    pub fn is_satisfied(&self, stats: &DrivingStats, elapsed_hours: f64) -> bool {
        match self {
            Achievement::FirstDrive => stats.total_distance_km() > 0.0,
            Achievement::RoadWarrior => stats.total_distance_km() >= 100.0,
            Achievement::SpeedDemon => stats.max_speed_kmh() >= 120.0,
            Achievement::Marathon => elapsed_hours >= 1.0,
        }
    }
}

/// A persisted unlock flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub achievement: Achievement,
    pub unlocked_at: DateTime<Utc>,
}

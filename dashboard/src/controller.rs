use chrono::{DateTime, Utc};
use nav_dash_lib::{
    achievement::{ALL_ACHIEVEMENTS, Achievement, UnlockedAchievement},
    driving_stats::DrivingStats,
    geo_sample::GeoSample,
    theme::{MapType, Theme},
    traffic::TrafficReport,
    units::{SpeedZone, mps_to_kmh},
};

use crate::{
    display::{DisplayFrame, LocationReadout, format_clock},
    traffic::simulate_report,
};

/// The three things that can happen to a driving session. Samples arriving
/// while no session is active are ignored by the accumulator.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    SessionStart,
    SessionStop,
    SampleArrived(GeoSample),
}

/// Owns all mutable dashboard state. Events are handled one at a time and
/// synchronously; callers serialize access behind a lock.
pub struct DashboardController {
    stats: DrivingStats,
    current_speed_kmh: f64,
    last_sample: Option<GeoSample>,
    traffic: Option<TrafficReport>,
    theme: Theme,
    map_type: MapType,
    achievements: Vec<UnlockedAchievement>,
}

/// What one handled event produced: the refreshed display frame and any
/// achievement unlocks the caller still has to persist.
pub struct EventOutcome {
    pub frame: DisplayFrame,
    pub newly_unlocked: Vec<Achievement>,
}

impl DashboardController {
    pub fn new(theme: Theme, map_type: MapType, achievements: Vec<UnlockedAchievement>) -> Self {
        Self {
            stats: DrivingStats::new(),
            current_speed_kmh: 0.0,
            last_sample: None,
            traffic: None,
            theme,
            map_type,
            achievements,
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.stats.is_active()
    }

    pub fn handle_event(&mut self, event: DashboardEvent, now: DateTime<Utc>) -> EventOutcome {
        let mut newly_unlocked = Vec::new();

        match event {
            DashboardEvent::SessionStart => {
                if !self.stats.is_active() {
                    self.stats.start_session(now);
                    self.traffic = Some(simulate_report(now));
                    tracing::info!("Navigation started");
                }
            }
            DashboardEvent::SessionStop => {
                if self.stats.is_active() {
                    newly_unlocked = self.check_unlocks(now);
                    self.stats.stop_session();
                    self.current_speed_kmh = 0.0;
                    self.traffic = None;
                    tracing::info!("Navigation stopped");
                }
            }
            DashboardEvent::SampleArrived(sample) => {
                if self.stats.is_active() {
                    let speed_kmh = mps_to_kmh(sample.speed_mps);
                    self.stats.on_sample(&sample, speed_kmh);
                    self.current_speed_kmh = speed_kmh;
                    self.last_sample = Some(sample);
                    newly_unlocked = self.check_unlocks(now);
                }
            }
        }

        EventOutcome {
            frame: self.frame(now),
            newly_unlocked,
        }
    }

    /// Regenerates the simulated road report on demand.
    pub fn refresh_traffic(&mut self, now: DateTime<Utc>) -> TrafficReport {
        let report = simulate_report(now);
        self.traffic = Some(report.clone());
        report
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_map_type(&mut self, map_type: MapType) {
        self.map_type = map_type;
    }

    pub fn frame(&self, now: DateTime<Utc>) -> DisplayFrame {
        DisplayFrame {
            clock: format_clock(now),
            navigating: self.stats.is_active(),
            location: self
                .last_sample
                .as_ref()
                .map(|sample| LocationReadout::new(sample.latitude(), sample.longitude())),
            speed_kmh: self.current_speed_kmh.round() as i64,
            speed_zone: SpeedZone::from_kmh(self.current_speed_kmh),
            session: self.stats.snapshot(now),
            traffic: self.traffic.clone(),
            theme: self.theme,
            map_type: self.map_type,
            achievements: self.achievements.clone(),
        }
    }

    fn check_unlocks(&mut self, now: DateTime<Utc>) -> Vec<Achievement> {
        let elapsed = self.stats.elapsed_hours(now);
        let mut newly = Vec::new();

        for achievement in ALL_ACHIEVEMENTS {
            let already = self
                .achievements
                .iter()
                .any(|entry| entry.achievement == achievement);
            if !already && achievement.is_satisfied(&self.stats, elapsed) {
                self.achievements.push(UnlockedAchievement {
                    achievement,
                    unlocked_at: now,
                });
                newly.push(achievement);
            }
        }

        newly
    }
}

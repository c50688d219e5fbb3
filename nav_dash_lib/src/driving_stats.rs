use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::{geo_sample::GeoSample, geo_util::haversine_distance_km};

/// Running driving statistics for one navigation session.
///
/// A session exists iff `start_time` is set. Samples fed while no session is
/// active are ignored, so distance can never come from outside a session.
#[derive(Debug, Default, Clone)]
pub struct DrivingStats {
    total_distance_km: f64,
    max_speed_kmh: f64,
    start_time: Option<DateTime<Utc>>,
    last_position: Option<Point>,
}

impl DrivingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn max_speed_kmh(&self) -> f64 {
        self.max_speed_kmh
    }

    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Begins a fresh session at `now`, discarding whatever was accumulated.
    pub fn start_session(&mut self, now: DateTime<Utc>) {
        self.total_distance_km = 0.0;
        self.max_speed_kmh = 0.0;
        self.start_time = Some(now);
        self.last_position = None;
    }

    /// Resets to the initial state. Idempotent.
    pub fn stop_session(&mut self) {
        *self = Self::default();
    }

    /// Feeds one location sample into the running totals. No-op while no
    /// session is active.
    ///
    /// Distance is accumulated unconditionally, with no minimum-movement
    /// threshold, so GPS jitter on a stationary device still adds up.
    pub fn on_sample(&mut self, sample: &GeoSample, instantaneous_speed_kmh: f64) {
        if !self.is_active() {
            return;
        }

        if let Some(last) = self.last_position {
            self.total_distance_km += haversine_distance_km(last, sample.position);
        }
        self.last_position = Some(sample.position);

        if instantaneous_speed_kmh > self.max_speed_kmh {
            self.max_speed_kmh = instantaneous_speed_kmh;
        }
    }

    /// Hours since session start, 0 while inactive.
    pub fn elapsed_hours(&self, now: DateTime<Utc>) -> f64 {
        match self.start_time {
            Some(start) => (now - start).num_milliseconds() as f64 / 3_600_000.0,
            None => 0.0,
        }
    }

    /// Session-average speed in km/h, 0 while no time has elapsed.
    pub fn avg_speed_kmh(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = self.elapsed_hours(now);
        if elapsed > 0.0 {
            self.total_distance_km / elapsed
        } else {
            0.0
        }
    }

    /// Display view: distance and time to one decimal, speeds to integers.
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            active: self.is_active(),
            total_distance_km: round1(self.total_distance_km),
            elapsed_hours: round1(self.elapsed_hours(now)),
            avg_speed_kmh: self.avg_speed_kmh(now).round() as i64,
            max_speed_kmh: self.max_speed_kmh.round() as i64,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub active: bool,
    pub total_distance_km: f64,
    pub elapsed_hours: f64,
    pub avg_speed_kmh: i64,
    pub max_speed_kmh: i64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn sample(lat: f64, lon: f64, speed_mps: f64, at: DateTime<Utc>) -> GeoSample {
        GeoSample::new(Point::new(lon, lat), speed_mps, at)
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn samples_while_inactive_are_ignored() {
        let mut stats = DrivingStats::new();
        for i in 0..5 {
            stats.on_sample(&sample(55.0 + i as f64, 12.0, 20.0, t0()), 72.0);
        }
        assert_eq!(stats.total_distance_km(), 0.0);
        assert_eq!(stats.max_speed_kmh(), 0.0);
        assert!(stats.last_position().is_none());
    }

    #[test]
    fn start_then_stop_matches_initial_state() {
        let mut stats = DrivingStats::new();
        stats.start_session(t0());
        stats.stop_session();
        assert!(!stats.is_active());
        assert_eq!(stats.total_distance_km(), 0.0);
        assert_eq!(stats.max_speed_kmh(), 0.0);
        assert!(stats.last_position().is_none());
        assert_eq!(stats.elapsed_hours(t0()), 0.0);

        // Stopping again changes nothing.
        stats.stop_session();
        assert!(!stats.is_active());
    }

    #[test]
    fn max_speed_is_max_of_fed_speeds() {
        for speeds in [[10.0, 50.0, 30.0], [50.0, 10.0, 30.0], [30.0, 10.0, 50.0]] {
            let mut stats = DrivingStats::new();
            stats.start_session(t0());
            for kmh in speeds {
                stats.on_sample(&sample(55.0, 12.0, kmh / 3.6, t0()), kmh);
            }
            assert_eq!(stats.max_speed_kmh(), 50.0);
        }
    }

    #[test]
    fn negative_speed_never_becomes_max() {
        let mut stats = DrivingStats::new();
        stats.start_session(t0());
        stats.on_sample(&sample(55.0, 12.0, 10.0, t0()), 36.0);
        stats.on_sample(&sample(55.0, 12.0, 10.0, t0()), -5.0);
        assert_eq!(stats.max_speed_kmh(), 36.0);
    }

    #[test]
    fn avg_speed_zero_until_time_elapses() {
        let mut stats = DrivingStats::new();
        stats.start_session(t0());
        assert_eq!(stats.avg_speed_kmh(t0()), 0.0);

        stats.on_sample(&sample(55.0, 12.0, 15.0, t0()), 54.0);
        stats.on_sample(&sample(55.01, 12.0, 15.0, t0()), 54.0);

        let later = t0() + TimeDelta::minutes(6); // 0.1 h
        let expected = stats.total_distance_km() / 0.1;
        assert!((stats.avg_speed_kmh(later) - expected).abs() < 1e-9);
    }

    #[test]
    fn first_sample_sets_baseline_without_distance() {
        let mut stats = DrivingStats::new();
        stats.start_session(t0());

        stats.on_sample(&sample(39.9042, 116.4074, 0.0, t0()), 0.0);
        assert_eq!(stats.total_distance_km(), 0.0);
        assert!(stats.last_position().is_some());

        // 0.01 degrees of latitude is roughly 1.1 km.
        let next = t0() + TimeDelta::seconds(1);
        stats.on_sample(&sample(39.9142, 116.4074, 30.0, next), 108.0);
        assert!((stats.total_distance_km() - 1.1).abs() < 0.05);
    }

    #[test]
    fn distance_and_max_are_monotonic() {
        let mut stats = DrivingStats::new();
        stats.start_session(t0());
        let mut prev_dist = 0.0;
        let mut prev_max = 0.0;
        for (i, kmh) in [30.0, 80.0, 20.0, 50.0].into_iter().enumerate() {
            stats.on_sample(&sample(55.0 + 0.01 * i as f64, 12.0, kmh / 3.6, t0()), kmh);
            assert!(stats.total_distance_km() >= prev_dist);
            assert!(stats.max_speed_kmh() >= prev_max);
            prev_dist = stats.total_distance_km();
            prev_max = stats.max_speed_kmh();
        }
    }

    #[test]
    fn snapshot_rounds_for_display() {
        let mut stats = DrivingStats::new();
        stats.start_session(t0());
        stats.on_sample(&sample(55.0, 12.0, 15.0, t0()), 54.0);
        stats.on_sample(&sample(55.02, 12.0, 15.0, t0()), 54.0);

        let snap = stats.snapshot(t0() + TimeDelta::minutes(30));
        assert!(snap.active);
        assert_eq!(snap.elapsed_hours, 0.5);
        assert_eq!(snap.max_speed_kmh, 54);
        assert!((snap.total_distance_km - 2.2).abs() < 0.1);
        assert_eq!(snap.avg_speed_kmh, (stats.avg_speed_kmh(t0() + TimeDelta::minutes(30))).round() as i64);
    }
}

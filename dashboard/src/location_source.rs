use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use geo_types::Point;
use nav_dash_lib::geo_sample::GeoSample;
use rand::Rng;

use crate::{controller::DashboardEvent, dashboard_state::DashboardState};

/// Discrete speeds the synthetic source picks from, in km/h.
const SPEED_SET_KMH: [f64; 7] = [0.0, 15.0, 30.0, 45.0, 60.0, 80.0, 100.0];

/// Rough km per degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Positional noise in degrees applied to every fix, also at standstill.
/// This reproduces real GPS jitter: a parked car still accumulates a little
/// distance, since the accumulator applies no minimum-movement filter.
const JITTER_DEGREES: f64 = 0.00002;

/// Synthetic replacement for device positioning: a position that wanders
/// from the configured origin at one of a fixed set of speeds.
pub struct SimulatedJourney {
    position: Point,
    heading_deg: f64,
}

impl SimulatedJourney {
    pub fn new(origin: Point) -> Self {
        Self {
            position: origin,
            heading_deg: 0.0,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Produces the next fix, `period_secs` after the previous one.
    pub fn next_sample(&mut self, period_secs: f64, now: DateTime<Utc>) -> GeoSample {
        let mut rng = rand::rng();

        let speed_kmh = SPEED_SET_KMH[rng.random_range(0..SPEED_SET_KMH.len())];
        let speed_mps = speed_kmh / 3.6;

        self.heading_deg += rng.random_range(-20.0..20.0);
        let heading = self.heading_deg.to_radians();

        let dist_km = speed_kmh * period_secs / 3600.0;
        let lat = self.position.y();
        let d_lat = dist_km / KM_PER_DEGREE * heading.cos();
        let d_lon = dist_km / (KM_PER_DEGREE * lat.to_radians().cos()) * heading.sin();

        let jitter_lat = rng.random_range(-JITTER_DEGREES..JITTER_DEGREES);
        let jitter_lon = rng.random_range(-JITTER_DEGREES..JITTER_DEGREES);

        self.position = Point::new(
            self.position.x() + d_lon + jitter_lon,
            lat + d_lat + jitter_lat,
        );

        GeoSample::new(self.position, speed_mps, now)
    }
}

/// Emits one sample per period into the event handler while navigation is
/// active. Runs for the lifetime of the process.
pub async fn run(state: Arc<DashboardState>) {
    let origin = Point::new(state.config.origin_longitude, state.config.origin_latitude);
    let period_secs = state.config.sample_period_ms as f64 / 1000.0;
    let mut journey = SimulatedJourney::new(origin);

    let mut interval = tokio::time::interval(Duration::from_millis(state.config.sample_period_ms));
    loop {
        interval.tick().await;

        if !state.controller.lock().await.is_navigating() {
            continue;
        }

        let sample = journey.next_sample(period_secs, Utc::now());
        state.dispatch(DashboardEvent::SampleArrived(sample)).await;
    }
}

#[cfg(test)]
mod tests {
    use nav_dash_lib::geo_util::haversine_distance_km;

    use super::*;

    #[test]
    fn standstill_only_jitters() {
        let origin = Point::new(12.5683, 55.6761);

        for _ in 0..50 {
            let mut journey = SimulatedJourney::new(origin);
            let sample = journey.next_sample(1.0, Utc::now());
            if sample.speed_mps == 0.0 {
                // A zero-speed fix still moves, but only by bounded jitter.
                let moved = haversine_distance_km(origin, journey.position());
                assert!(moved < 0.01, "drifted {moved} km at standstill");
            }
        }
    }

    #[test]
    fn one_second_at_speed_moves_the_right_distance() {
        let origin = Point::new(12.5683, 55.6761);
        for _ in 0..20 {
            let mut journey = SimulatedJourney::new(origin);
            let sample = journey.next_sample(1.0, Utc::now());
            let moved_km = haversine_distance_km(origin, sample.position);
            let expected_km = sample.speed_mps / 1000.0;
            // Within jitter tolerance (a few meters).
            assert!((moved_km - expected_km).abs() < 0.01);
        }
    }

    #[test]
    fn speeds_come_from_the_fixed_set() {
        let mut journey = SimulatedJourney::new(Point::new(12.5683, 55.6761));
        for _ in 0..100 {
            let sample = journey.next_sample(1.0, Utc::now());
            let kmh = sample.speed_mps * 3.6;
            assert!(SPEED_SET_KMH.iter().any(|s| (s - kmh).abs() < 1e-9));
        }
    }
}

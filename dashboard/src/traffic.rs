use chrono::{DateTime, TimeDelta, Utc};
use nav_dash_lib::traffic::{TrafficReport, TrafficStatus};
use rand::Rng;

/// Makes up a road report: a uniformly random status and an arrival time up
/// to an hour ahead. There is no real traffic data behind this.
pub fn simulate_report(now: DateTime<Utc>) -> TrafficReport {
    let mut rng = rand::rng();

    let status = match rng.random_range(0..3) {
        0 => TrafficStatus::Clear,
        1 => TrafficStatus::Slow,
        _ => TrafficStatus::Congested,
    };

    TrafficReport {
        status,
        eta: now + TimeDelta::seconds(rng.random_range(0..3600)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eta_is_within_the_next_hour() {
        let now = Utc::now();
        for _ in 0..100 {
            let report = simulate_report(now);
            assert!(report.eta >= now);
            assert!(report.eta < now + TimeDelta::hours(1));
        }
    }
}

pub mod achievement;
pub mod driving_stats;
pub mod favorite;
pub mod geo_sample;
pub mod geo_util;
pub mod theme;
pub mod traffic;
pub mod units;

pub mod config;
pub mod controller;
pub mod dashboard_state;
pub mod display;
pub mod location_source;
pub mod traffic;

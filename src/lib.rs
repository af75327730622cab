pub mod activity;
pub mod config;
pub mod engine;
pub mod persist;
pub mod telemetry;

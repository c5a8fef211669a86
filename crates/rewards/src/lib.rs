pub mod config;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod telemetry;

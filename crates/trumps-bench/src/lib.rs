pub mod analytics;
pub mod config;
pub mod features;
pub mod logging;
pub mod simulation;

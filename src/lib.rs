pub mod config;
pub mod date_gen;
pub mod geo;
pub mod production;
pub mod profile;
pub mod readers;
pub mod solar;
pub mod telemetry;

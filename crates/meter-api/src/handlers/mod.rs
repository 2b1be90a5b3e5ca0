//! HTTP request handlers

pub mod health;
pub mod reading;

pub use health::configure as configure_health;
pub use reading::configure as configure_readings;

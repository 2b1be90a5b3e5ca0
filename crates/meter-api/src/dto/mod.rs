//! Data Transfer Objects (DTOs) for API requests and responses

pub mod reading;

pub use reading::*;

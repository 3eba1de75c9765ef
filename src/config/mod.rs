//! Configuration values for candidate-cards
//!
//! Everything that used to be an ambient constant (endpoint location,
//! card grid geometry) is an explicit value built here and handed to the
//! component that needs it.

pub mod client;
pub mod grid;

pub use client::{ClientConfig, ConfigError};
pub use grid::CardGridConfig;

//! graphdeck Core: shared errors and configuration.

pub mod config;
pub mod error;

pub use config::ApiConfig;
pub use error::{Error, Result};

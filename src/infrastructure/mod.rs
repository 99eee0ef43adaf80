//! Infrastructure layer: configuration and plan-file loading.

pub mod config;
pub mod plan;

pub use config::{ConfigError, ConfigLoader};
pub use plan::load_plan;

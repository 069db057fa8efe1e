//! Infrastructure Layer - configuration files, environment and data paths

pub mod config;
pub mod paths;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};

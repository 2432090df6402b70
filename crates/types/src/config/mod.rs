mod error;
pub use error::ConfigError;

/// Helpers for loading values from the environment.
pub mod env_utils;

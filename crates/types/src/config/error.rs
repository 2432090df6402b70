/// Error type for the [`crate::config`] module. Captures errors related to
/// loading configuration from the environment or other sources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing boolean environment variable
    #[error("failed to parse boolean environment variable {0}")]
    ParseBool(String),
    /// A configured binary could not be found.
    #[error("binary not found: {}", .0.display())]
    BinaryNotFound(std::path::PathBuf),
    /// A value was present but invalid.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// The offending key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }

    /// A value that was present but rejected.
    pub fn invalid(key: &str, reason: impl std::fmt::Display) -> Self {
        ConfigError::Invalid { key: key.to_string(), reason: reason.to_string() }
    }
}

use serde::{Deserialize, Serialize};
use shortcut_types::config::{env_utils, ConfigError};

/// Environment variable enabling [`SimulationOptions::include_raw`].
pub const SIMULATION_INCLUDE_RAW: &str = "SIMULATION_INCLUDE_RAW";
/// Environment variable enabling [`SimulationOptions::log_raw`].
pub const SIMULATION_LOG_RAW: &str = "SIMULATION_LOG_RAW";

/// Opt-in verbose output. Both are off by default.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOptions {
    /// Keep the backend's raw result in each report.
    pub include_raw: bool,
    /// Log backend payloads and raw results at debug level.
    pub log_raw: bool,
}

impl SimulationOptions {
    /// Keep raw backend results in the reports.
    pub const fn with_raw(mut self) -> Self {
        self.include_raw = true;
        self
    }

    /// Log raw payloads.
    pub const fn with_raw_logging(mut self) -> Self {
        self.log_raw = true;
        self
    }

    /// Load the options from the environment. Unset variables are false.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            include_raw: env_utils::load_bool_opt(SIMULATION_INCLUDE_RAW)?.unwrap_or_default(),
            log_raw: env_utils::load_bool_opt(SIMULATION_LOG_RAW)?.unwrap_or_default(),
        })
    }
}

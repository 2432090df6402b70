use crate::ConfigError;
use std::env;

/// Load a variable from the environment. Empty values count as missing.
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    load_string_opt(key).ok_or_else(|| ConfigError::missing(key))
}

/// Load a variable from the environment, treating empty values as absent.
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load the first of several variables present in the environment.
pub fn load_first_of(keys: &[&str]) -> Result<String, ConfigError> {
    keys.iter()
        .find_map(|key| load_string_opt(key))
        .ok_or_else(|| ConfigError::missing(&keys.join(" or ")))
}

/// Load a boolean from the environment. Accepts `true`/`false`/`1`/`0`.
pub fn load_bool_opt(key: &str) -> Result<Option<bool>, ConfigError> {
    let Some(val) = load_string_opt(key) else { return Ok(None) };
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(ConfigError::ParseBool(key.to_string())),
    }
}

use shortcut_types::config::{env_utils, ConfigError};
use std::{env, path::PathBuf};

/// Environment variable holding the path to the `forge` binary.
pub const FORGE_PATH: &str = "FORGE_PATH";
/// Environment variable holding the harness project directory.
pub const SIMULATION_FORGE_PROJECT: &str = "SIMULATION_FORGE_PROJECT";
/// Fallback environment variable holding the fork RPC URL.
pub const RPC_URL: &str = "RPC_URL";

/// Default `forge` binary, resolved through `PATH`.
pub const DEFAULT_FORGE_PATH: &str = "forge";
/// Default harness project directory.
pub const DEFAULT_PROJECT_DIR: &str = ".";
/// Default harness contract.
pub const DEFAULT_CONTRACT: &str = "Simulation_Fork_Test";
/// Default harness test.
pub const DEFAULT_TEST: &str = "test_simulateShortcut_1";
/// Default environment variable the input document is passed through.
pub const DEFAULT_ENV_VAR: &str = "SIMULATION_JSON_DATA";

/// Configuration for invoking the fork-test harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeConfig {
    /// The `forge` binary.
    pub forge_path: PathBuf,
    /// The harness project directory.
    pub project_dir: PathBuf,
    /// RPC URL the harness forks from.
    pub rpc_url: String,
    /// Contract to match.
    pub contract: String,
    /// Test to match, without parentheses.
    pub test: String,
    /// Environment variable the input document is passed through.
    pub env_var: String,
}

impl ForgeConfig {
    /// Create a config with the default binary, project, contract and test.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            forge_path: DEFAULT_FORGE_PATH.into(),
            project_dir: DEFAULT_PROJECT_DIR.into(),
            rpc_url: rpc_url.into(),
            contract: DEFAULT_CONTRACT.to_owned(),
            test: DEFAULT_TEST.to_owned(),
            env_var: DEFAULT_ENV_VAR.to_owned(),
        }
    }

    /// The chain-specific RPC URL variable, e.g. `RPC_URL_SONIC`.
    pub fn rpc_url_var(chain_name: &str) -> String {
        format!("{RPC_URL}_{}", chain_name.to_uppercase())
    }

    /// Load the config for a chain from the environment.
    ///
    /// The RPC URL is read from `RPC_URL_<CHAIN>`, falling back to
    /// [`RPC_URL`]. The binary must exist.
    pub fn from_env(chain_name: &str) -> Result<Self, ConfigError> {
        let chain_var = Self::rpc_url_var(chain_name);
        let rpc_url = env_utils::load_first_of(&[chain_var.as_str(), RPC_URL])?;

        let mut config = Self::new(rpc_url);
        if let Some(path) = env_utils::load_string_opt(FORGE_PATH) {
            config.forge_path = path.into();
        }
        if let Some(dir) = env_utils::load_string_opt(SIMULATION_FORGE_PROJECT) {
            config.project_dir = dir.into();
        }
        config.forge_path = config.resolve_forge_path()?;
        Ok(config)
    }

    /// Locate the binary. A path with a directory must name an existing
    /// file. A bare name is searched for in `PATH`.
    pub fn resolve_forge_path(&self) -> Result<PathBuf, ConfigError> {
        let path = &self.forge_path;
        let found = if path.components().count() > 1 {
            path.is_file().then(|| path.clone())
        } else {
            env::var_os("PATH").and_then(|dirs| {
                env::split_paths(&dirs).map(|dir| dir.join(path)).find(|bin| bin.is_file())
            })
        };
        found.ok_or_else(|| ConfigError::BinaryNotFound(path.clone()))
    }

    /// Match a different contract and test.
    pub fn with_test(mut self, contract: impl Into<String>, test: impl Into<String>) -> Self {
        self.contract = contract.into();
        self.test = test.into();
        self
    }

    /// Use a specific binary.
    pub fn with_forge_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.forge_path = path.into();
        self
    }

    /// Run from a specific project directory.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    /// The arguments passed to the binary.
    pub fn args(&self) -> [&str; 6] {
        ["test", "--match-contract", &self.contract, "--match-test", &self.test, "--json"]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = ForgeConfig::new("http://localhost:8545");
        assert_eq!(config.forge_path, PathBuf::from("forge"));
        assert_eq!(
            config.args(),
            [
                "test",
                "--match-contract",
                "Simulation_Fork_Test",
                "--match-test",
                "test_simulateShortcut_1",
                "--json"
            ]
        );
        assert_eq!(ForgeConfig::rpc_url_var("sonic"), "RPC_URL_SONIC");
    }

    #[test]
    fn binary_resolution() {
        let config = ForgeConfig::new("http://localhost:8545");

        let missing = config.clone().with_forge_path("/nonexistent/forge");
        assert!(matches!(
            missing.resolve_forge_path(),
            Err(ConfigError::BinaryNotFound(path)) if path == PathBuf::from("/nonexistent/forge")
        ));

        let unknown = config.clone().with_forge_path("forge-binary-nobody-installs");
        assert!(matches!(unknown.resolve_forge_path(), Err(ConfigError::BinaryNotFound(_))));

        let exe = env::current_exe().unwrap();
        assert_eq!(config.with_forge_path(exe.clone()).resolve_forge_path().unwrap(), exe);
    }
}

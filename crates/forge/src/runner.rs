use crate::{ForgeConfig, ForgeError};
use core::future::Future;
use shortcut_types::config::ConfigError;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Captured output of a harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl RunOutput {
    /// Reject runs that wrote nothing to stdout.
    pub fn into_stdout(self) -> Result<String, ForgeError> {
        if self.stdout.trim().is_empty() {
            return Err(ForgeError::EmptyOutput { code: self.code, stderr: self.stderr });
        }
        Ok(self.stdout)
    }
}

/// A trait for running the fork-test harness.
pub trait TestRunner: Sync {
    /// Check the runner can be used with `config`, before any run.
    fn preflight(&self, _config: &ForgeConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Run the harness once with `document` in its environment.
    fn run(
        &self,
        config: &ForgeConfig,
        document: String,
    ) -> impl Future<Output = Result<RunOutput, ForgeError>> + Send;
}

/// Runs the `forge` binary as a subprocess.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForgeRunner;

impl TestRunner for ForgeRunner {
    fn preflight(&self, config: &ForgeConfig) -> Result<(), ConfigError> {
        config.resolve_forge_path().map(drop)
    }

    #[instrument(skip_all, fields(contract = %config.contract, test = %config.test))]
    async fn run(&self, config: &ForgeConfig, document: String) -> Result<RunOutput, ForgeError> {
        debug!(bytes = document.len(), "running forge");

        let output = Command::new(&config.forge_path)
            .args(config.args())
            .current_dir(&config.project_dir)
            .env(&config.env_var, document)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ForgeError::BinaryNotFound(config.forge_path.clone())
                }
                _ => ForgeError::Spawn(e),
            })?;

        let output = RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        // Forge exits non-zero on test failure but still prints the log.
        if !output.code.is_some_and(|code| code == 0) {
            warn!(code = ?output.code, "forge exited unsuccessfully");
        }
        Ok(output)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_stdout_is_an_error() {
        let output =
            RunOutput { code: Some(1), stdout: " \n".to_owned(), stderr: "boom".to_owned() };
        match output.into_stdout().unwrap_err() {
            ForgeError::EmptyOutput { code, stderr } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary() {
        let config = ForgeConfig::new("http://localhost:8545")
            .with_forge_path("/nonexistent/forge-binary-for-tests");
        assert!(matches!(ForgeRunner.preflight(&config), Err(ConfigError::BinaryNotFound(_))));
        let err = ForgeRunner.run(&config, "{}".to_owned()).await.unwrap_err();
        assert!(matches!(err, ForgeError::BinaryNotFound(_)));
    }
}

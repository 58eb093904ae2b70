//! Repository cloning

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{JudgeError, Result};
use crate::process::{CommandSpec, ProcessOutcome, run_with_timeout};

/// Fetches a submission's source into a scratch directory
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    /// Populate `dest` with the repository at `url`
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Clones with the `git` command-line client
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
    timeout: Duration,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl GitFetcher {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn clone_command(&self, url: &str, dest: &Path) -> CommandSpec {
        CommandSpec::new(
            self.program.clone(),
            [
                "clone".to_string(),
                url.to_string(),
                dest.to_string_lossy().into_owned(),
            ],
        )
    }
}

#[async_trait]
impl RepositoryFetcher for GitFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let command = self.clone_command(url, dest);
        debug!(command = %command, "Cloning repository");

        let outcome = run_with_timeout(&command, Path::new("."), self.timeout)
            .await
            .map_err(|e| JudgeError::Clone(format!("could not run {}: {}", self.program, e)))?;

        match outcome {
            ProcessOutcome::Exited { code: Some(0), .. } => Ok(()),
            ProcessOutcome::Exited { code, stderr, .. } => Err(JudgeError::Clone(format!(
                "{} exited with {}: {}",
                command,
                code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr.trim()
            ))),
            ProcessOutcome::TimedOut => Err(JudgeError::Clone(format!(
                "timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

//! Dependency installation phase

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::process::{CommandSpec, ProcessOutcome, run_with_timeout};

/// An install command and the manifest files that call for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub command: CommandSpec,
    pub indicators: Vec<String>,
}

impl SetupStep {
    pub fn new(command: &str, indicators: &[&str]) -> Self {
        Self {
            command: CommandSpec::parse(command),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Any indicator file is present in `dir`
    pub fn applies_to(&self, dir: &Path) -> bool {
        self.indicators.iter().any(|name| dir.join(name).exists())
    }
}

/// Result and transcript of a judging phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub success: bool,
    pub log: Vec<String>,
}

impl PhaseOutcome {
    fn finish(success: bool, log: Vec<String>) -> Self {
        Self { success, log }
    }

    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

/// Runs one install command per recognized manifest, in priority order
#[derive(Debug, Clone)]
pub struct SetupRunner {
    steps: Vec<SetupStep>,
    timeout: Duration,
}

impl Default for SetupRunner {
    fn default() -> Self {
        Self::new(Self::default_steps(), Duration::from_secs(60))
    }
}

impl SetupRunner {
    pub fn new(steps: Vec<SetupStep>, timeout: Duration) -> Self {
        Self { steps, timeout }
    }

    /// Python, Node.js, make and Cargo conventions
    pub fn default_steps() -> Vec<SetupStep> {
        vec![
            SetupStep::new("pip install -r requirements.txt", &["requirements.txt"]),
            SetupStep::new("pip install -e .", &["setup.py", "pyproject.toml"]),
            SetupStep::new("npm install", &["package.json"]),
            SetupStep::new("yarn install", &["yarn.lock"]),
            SetupStep::new("make install", &["Makefile"]),
            SetupStep::new("cargo build", &["Cargo.toml"]),
        ]
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn steps(&self) -> &[SetupStep] {
        &self.steps
    }

    /// Run every applicable step; the first failure ends the phase.
    ///
    /// A project with no recognized manifest counts as set up.
    pub async fn run(&self, project_dir: &Path) -> PhaseOutcome {
        let mut log = Vec::new();

        for step in self.steps.iter().filter(|step| step.applies_to(project_dir)) {
            let command = &step.command;
            debug!(command = %command, "Running setup step");

            match run_with_timeout(command, project_dir, self.timeout).await {
                Ok(ProcessOutcome::Exited { code, stderr, .. }) => {
                    log.push(format!("Ran: {}", command));
                    log.push(format!("Exit code: {}", exit_code(code)));
                    if code != Some(0) {
                        log.push(format!("Error: {}", stderr));
                        info!(command = %command, "Setup step failed");
                        return PhaseOutcome::finish(false, log);
                    }
                }
                Ok(ProcessOutcome::TimedOut) => {
                    log.push(format!("Timeout running: {}", command));
                    info!(command = %command, "Setup step timed out");
                    return PhaseOutcome::finish(false, log);
                }
                Err(e) => {
                    log.push(format!("Failed to run {}: {}", command, e));
                    return PhaseOutcome::finish(false, log);
                }
            }
        }

        PhaseOutcome::finish(true, log)
    }
}

pub(crate) fn exit_code(code: Option<i32>) -> String {
    code.map_or_else(|| "killed by signal".to_string(), |c| c.to_string())
}

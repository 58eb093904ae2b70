//! Launch attempts

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::process::{CommandSpec, ProcessOutcome, run_with_timeout};
use crate::setup::{PhaseOutcome, exit_code};

const OUTPUT_PREVIEW_CHARS: usize = 200;

/// Tries conventional start commands until one looks like it works.
///
/// A command that is still running when its timeout elapses counts as a
/// successful start: servers and interactive apps never exit on their own.
#[derive(Debug, Clone)]
pub struct RunAttempt {
    commands: Vec<CommandSpec>,
    timeout: Duration,
}

impl Default for RunAttempt {
    fn default() -> Self {
        Self::new(Self::default_commands(), Duration::from_secs(10))
    }
}

impl RunAttempt {
    pub fn new(commands: Vec<CommandSpec>, timeout: Duration) -> Self {
        Self { commands, timeout }
    }

    pub fn default_commands() -> Vec<CommandSpec> {
        [
            "python main.py",
            "python app.py",
            "python -m src",
            "npm start",
            "npm run dev",
            "make run",
            "cargo run",
            "./run.sh",
        ]
        .into_iter()
        .map(CommandSpec::parse)
        .collect()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub async fn run(&self, project_dir: &Path) -> PhaseOutcome {
        let mut log = Vec::new();

        for command in &self.commands {
            match run_with_timeout(command, project_dir, self.timeout).await {
                Ok(ProcessOutcome::Exited { code, stdout, .. }) => {
                    log.push(format!("Tried: {}", command));
                    log.push(format!("Exit code: {}", exit_code(code)));
                    if !stdout.is_empty() {
                        let preview: String = stdout.chars().take(OUTPUT_PREVIEW_CHARS).collect();
                        log.push(format!("Output: {}...", preview));
                    }
                    if code == Some(0) {
                        return PhaseOutcome { success: true, log };
                    }
                }
                Ok(ProcessOutcome::TimedOut) => {
                    log.push(format!("Started successfully: {}", command));
                    return PhaseOutcome { success: true, log };
                }
                Err(e) => {
                    debug!(command = %command, error = %e, "Launch failed");
                    log.push(format!("Could not launch {}: {}", command, e));
                }
            }
        }

        PhaseOutcome { success: false, log }
    }
}

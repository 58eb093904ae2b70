//! Child process execution with a hard timeout

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line on whitespace; no shell quoting
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let program = parts.next().unwrap_or_default();
        Self::new(program, parts)
    }

    /// Programs given as a relative path run from `dir`.
    ///
    /// The result is made absolute since the child resolves relative program
    /// paths after changing into `dir`.
    fn resolve_program(&self, dir: &Path) -> PathBuf {
        if self.program.contains('/') {
            let joined = dir.join(&self.program);
            std::path::absolute(&joined).unwrap_or(joined)
        } else {
            PathBuf::from(&self.program)
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a bounded child process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Exited {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

impl ProcessOutcome {
    /// Exited with status 0
    pub fn succeeded(&self) -> bool {
        matches!(self, ProcessOutcome::Exited { code: Some(0), .. })
    }
}

/// Run `command` in `dir`, killing it once `limit` elapses.
///
/// Spawn failures (missing program, bad directory) are returned as errors.
pub async fn run_with_timeout(
    command: &CommandSpec,
    dir: &Path,
    limit: Duration,
) -> std::io::Result<ProcessOutcome> {
    debug!(command = %command, dir = %dir.display(), ?limit, "Spawning");

    // TODO: spawn into its own process group and kill the group on timeout;
    // `npm start` and `make run` leave grandchildren behind.
    let child = Command::new(command.resolve_program(dir))
        .args(&command.args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    match timeout(limit, child.wait_with_output()).await {
        Ok(output) => {
            let output = output?;
            Ok(ProcessOutcome::Exited {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
        // Dropping the wait future drops the child, which kills it
        Err(_) => Ok(ProcessOutcome::TimedOut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let spec = CommandSpec::parse("pip install -r requirements.txt");
        assert_eq!(spec.program, "pip");
        assert_eq!(spec.args, vec!["install", "-r", "requirements.txt"]);
        assert_eq!(spec.to_string(), "pip install -r requirements.txt");
    }

    #[test]
    fn test_relative_program_resolves_against_dir() {
        let resolved = CommandSpec::parse("./run.sh").resolve_program(Path::new("project"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("project/run.sh"));

        assert_eq!(
            CommandSpec::parse("npm start").resolve_program(Path::new("/tmp/project")),
            PathBuf::from("npm")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_codes_and_output() {
        let dir = tempfile::tempdir().unwrap();

        let ok = run_with_timeout(
            &CommandSpec::new("sh", ["-c", "echo hello; echo oops >&2"]),
            dir.path(),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert!(ok.succeeded());
        match ok {
            ProcessOutcome::Exited { stdout, stderr, .. } => {
                assert_eq!(stdout.trim(), "hello");
                assert_eq!(stderr.trim(), "oops");
            }
            ProcessOutcome::TimedOut => panic!("should not time out"),
        }

        let failed = run_with_timeout(
            &CommandSpec::new("sh", ["-c", "exit 3"]),
            dir.path(),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert!(matches!(failed, ProcessOutcome::Exited { code: Some(3), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run_with_timeout(
            &CommandSpec::new("sleep", ["5"]),
            dir.path(),
            Duration::from_millis(200),
        )
        .await
        .unwrap();

        assert_eq!(outcome, ProcessOutcome::TimedOut);
        assert!(!outcome.succeeded());
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_with_timeout(
            &CommandSpec::parse("definitely-not-a-real-program-xyz"),
            dir.path(),
            Duration::from_secs(1),
        )
        .await;

        assert!(result.is_err());
    }
}

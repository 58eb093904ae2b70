//! Judge configuration

use std::path::PathBuf;
use std::time::Duration;

/// Where reports go and how long each phase may take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeConfig {
    pub output_dir: PathBuf,
    pub setup_timeout: Duration,
    pub run_timeout: Duration,
    pub clone_timeout: Duration,
    /// Per-submission budget; exceeding it only prints a warning
    pub time_limit: Duration,
    pub git_program: String,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("judging_results"),
            setup_timeout: Duration::from_secs(60),
            run_timeout: Duration::from_secs(10),
            clone_timeout: Duration::from_secs(300),
            time_limit: Duration::from_secs(240),
            git_program: "git".to_string(),
        }
    }
}

impl JudgeConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Scratch clone location for one project
    pub fn scratch_dir(&self, project_name: &str) -> PathBuf {
        self.output_dir.join(format!("temp_{}", project_name))
    }
}

//! Hackathon submission judge
//!
//! Clones each submitted repository, tries a handful of conventional setup
//! and launch commands, scores the result against a three-category rubric
//! and writes markdown and JSON reports.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod judge;
pub mod process;
pub mod readme;
pub mod report;
pub mod rubric;
pub mod runner;
pub mod scorer;
pub mod setup;
pub mod submissions;


pub use config::JudgeConfig;
pub use error::{JudgeError, Result};
pub use fetcher::{GitFetcher, RepositoryFetcher};
pub use judge::HackathonJudge;
pub use process::{CommandSpec, ProcessOutcome, run_with_timeout};
pub use readme::read_readme;
pub use report::{ReportWriter, rank, render_json, render_markdown};
pub use rubric::{Category, Criterion, MAX_SCORE, MIN_SCORE, ScoreMap, SubmissionScore};
pub use runner::RunAttempt;
pub use scorer::{Evidence, ScoreEffect, ScoreRule, Scorer};
pub use setup::{PhaseOutcome, SetupRunner, SetupStep};
pub use submissions::{load_submissions, parse_submissions, project_name};

//! Per-submission orchestration

use std::fs;
use std::path::Path;
use std::time::Instant;

use colored::*;
use tracing::{debug, info, warn};

use crate::config::JudgeConfig;
use crate::error::Result;
use crate::fetcher::{GitFetcher, RepositoryFetcher};
use crate::readme::read_readme;
use crate::report::ReportWriter;
use crate::rubric::{Category, SubmissionScore};
use crate::runner::RunAttempt;
use crate::scorer::{Evidence, Scorer};
use crate::setup::SetupRunner;
use crate::submissions::project_name;

/// Judges submissions one at a time and writes the reports
pub struct HackathonJudge {
    config: JudgeConfig,
    fetcher: Box<dyn RepositoryFetcher>,
    setup: SetupRunner,
    runner: RunAttempt,
    scorer: Scorer,
    reports: ReportWriter,
}

impl HackathonJudge {
    /// Create a judge and its output directory
    pub fn new(config: JudgeConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_dir)?;

        Ok(Self {
            fetcher: Box::new(GitFetcher::new(
                config.git_program.clone(),
                config.clone_timeout,
            )),
            setup: SetupRunner::default().with_timeout(config.setup_timeout),
            runner: RunAttempt::default().with_timeout(config.run_timeout),
            scorer: Scorer::default(),
            reports: ReportWriter::new(config.output_dir.clone()),
            config,
        })
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn RepositoryFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_setup_runner(mut self, setup: SetupRunner) -> Self {
        self.setup = setup;
        self
    }

    pub fn with_run_attempt(mut self, runner: RunAttempt) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    pub fn reports(&self) -> &ReportWriter {
        &self.reports
    }

    /// Clone, inspect, set up, launch and score one repository.
    ///
    /// A failed clone is a scored result, not an error. The scratch clone is
    /// removed whether or not judging succeeds.
    pub async fn judge_submission(&self, repo_url: &str) -> Result<SubmissionScore> {
        let name = project_name(repo_url);
        let scratch = self.config.scratch_dir(&name);

        println!("\n{} Judging: {}", "🔍".cyan(), name.bold());
        println!("Repository: {}", repo_url);

        remove_scratch(&scratch)?;
        let result = self.evaluate(repo_url, &name, &scratch).await;
        discard_scratch(&scratch);

        let score = result?;
        println!(
            "{} Scored: Category1={}/{}, Category2={}/{}, Category3={}/{}",
            "✅".green(),
            score.total(Category::BestProblem),
            Category::BestProblem.max_total(),
            score.total(Category::MostComplete),
            Category::MostComplete.max_total(),
            score.total(Category::MostCreative),
            Category::MostCreative.max_total(),
        );
        Ok(score)
    }

    async fn evaluate(&self, repo_url: &str, name: &str, scratch: &Path) -> Result<SubmissionScore> {
        let started = Instant::now();
        let mut score = SubmissionScore::for_url(repo_url);

        if let Err(e) = self.fetcher.fetch(repo_url, scratch).await {
            println!("{} Failed to clone {}: {}", "❌".red(), repo_url, e);
            score.set_notes("Failed to clone repository");
            return Ok(score);
        }

        let readme = read_readme(scratch);
        let setup = self.setup.run(scratch).await;
        debug!(project = %name, success = setup.success, log = %setup.log_text(), "Setup finished");
        let run = self.runner.run(scratch).await;
        debug!(project = %name, success = run.success, log = %run.log_text(), "Run finished");

        let elapsed = started.elapsed();
        if elapsed > self.config.time_limit {
            println!(
                "{} Time limit exceeded ({:.1}s)",
                "⏰".yellow(),
                elapsed.as_secs_f64()
            );
        }

        let evidence = Evidence {
            readme,
            setup_success: setup.success,
            run_success: run.success,
        };
        let fired = self.scorer.apply(&evidence, &mut score)?;
        info!(project = %name, rules = ?fired, "Scored");

        score.set_notes(format!(
            "Setup: {}, Run: {}, Time: {:.1}s",
            mark(setup.success),
            mark(run.success),
            elapsed.as_secs_f64()
        ));

        Ok(score)
    }

    /// Judge every URL in order; failures become lowest-score placeholders
    pub async fn judge_all(&self, repo_urls: &[String]) -> Vec<SubmissionScore> {
        println!(
            "{} Starting judging process for {} submissions",
            "🏆".yellow(),
            repo_urls.len()
        );

        let mut scores = Vec::with_capacity(repo_urls.len());
        for (index, url) in repo_urls.iter().enumerate() {
            println!("\n{}", "=".repeat(60));
            println!(
                "{} Judging submission {}/{}",
                "📋".blue(),
                index + 1,
                repo_urls.len()
            );

            match self.judge_submission(url).await {
                Ok(score) => scores.push(score),
                Err(e) => {
                    println!("{} Error judging {}: {}", "❌".red(), url, e);
                    warn!(url = %url, error = %e, "Submission could not be judged");
                    scores.push(SubmissionScore::failed(url, &e.to_string()));
                }
            }
        }

        scores
    }

    pub fn write_reports(&self, scores: &[SubmissionScore]) -> Result<()> {
        self.reports.write(scores)?;
        println!(
            "\n{} Scores saved to: {}",
            "📊".cyan(),
            self.reports.markdown_path().display()
        );
        Ok(())
    }
}

fn mark(success: bool) -> &'static str {
    if success { "✅" } else { "❌" }
}

fn remove_scratch(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}

fn discard_scratch(dir: &Path) {
    if let Err(e) = remove_scratch(dir) {
        warn!(dir = %dir.display(), error = %e, "Could not remove scratch directory");
    }
}

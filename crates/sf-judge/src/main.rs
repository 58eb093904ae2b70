use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use sf_judge::{HackathonJudge, JudgeConfig, JudgeError, load_submissions};

#[derive(Parser)]
#[command(name = "judge-submissions")]
#[command(about = "Clone, run and score hackathon submissions", long_about = None)]
struct Cli {
    /// File with one repository URL per line
    submissions: PathBuf,

    /// Directory for scores.md, scores.json and scratch clones
    #[arg(long, default_value = "judging_results")]
    output_dir: PathBuf,

    /// Seconds allowed per install command
    #[arg(long, default_value_t = 60)]
    setup_timeout: u64,

    /// Seconds each launch command may run before it counts as started
    #[arg(long, default_value_t = 10)]
    run_timeout: u64,

    /// Seconds per submission before a time-limit warning is printed
    #[arg(long, default_value_t = 240)]
    time_limit: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let repo_urls = match load_submissions(&cli.submissions) {
        Ok(urls) => urls,
        Err(e @ JudgeError::SubmissionsNotFound(_)) => {
            println!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let config = JudgeConfig {
        output_dir: cli.output_dir,
        setup_timeout: Duration::from_secs(cli.setup_timeout),
        run_timeout: Duration::from_secs(cli.run_timeout),
        time_limit: Duration::from_secs(cli.time_limit),
        ..Default::default()
    };

    let judge = HackathonJudge::new(config)?;
    let scores = judge.judge_all(&repo_urls).await;
    judge.write_reports(&scores)?;

    println!(
        "\n{} Judging complete! Results saved to {}/",
        "🎉".green(),
        judge.config().output_dir.display()
    );

    Ok(())
}

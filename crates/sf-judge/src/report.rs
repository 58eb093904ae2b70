//! Markdown and JSON reports

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::rubric::{Category, SubmissionScore};

const TITLE: &str = "# Hackathon Judging Results";

/// Submissions ordered by descending category total; ties keep input order
pub fn rank(scores: &[SubmissionScore], category: Category) -> Vec<&SubmissionScore> {
    let mut ranked: Vec<&SubmissionScore> = scores.iter().collect();
    ranked.sort_by(|a, b| b.total(category).cmp(&a.total(category)));
    ranked
}

/// One ranked table per category
pub fn render_markdown(scores: &[SubmissionScore]) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');

    for category in Category::ALL {
        let headers: Vec<&str> = ["Rank", "Project", "GitHub Repo"]
            .into_iter()
            .chain(category.criteria().iter().map(|c| c.header))
            .chain(["**Total**", "Notes"])
            .collect();

        let separators: Vec<String> = headers.iter().map(|h| "-".repeat(h.len() + 2)).collect();
        out.push_str(&format!("\n## {}\n\n", category));
        out.push_str(&table_row(&headers));
        out.push_str(&format!("|{}|\n", separators.join("|")));

        for (position, score) in rank(scores, category).into_iter().enumerate() {
            let mut cells = vec![
                (position + 1).to_string(),
                cell(score.project_name()),
                cell(score.github_repo()),
            ];
            cells.extend(score.scores(category).values().map(|v| v.to_string()));
            cells.push(format!("**{}/{}**", score.total(category), category.max_total()));
            cells.push(cell(score.notes()));

            out.push_str(&table_row(&cells));
        }
    }

    out
}

/// Full records in judging order
pub fn render_json(scores: &[SubmissionScore]) -> Result<String> {
    Ok(serde_json::to_string_pretty(scores)?)
}

fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    format!("| {} |\n", cells.join(" | "))
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Writes `scores.md` and `scores.json` into one directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir.join("scores.md")
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join("scores.json")
    }

    pub fn write(&self, scores: &[SubmissionScore]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        fs::write(self.markdown_path(), render_markdown(scores))?;
        fs::write(self.json_path(), render_json(scores)?)?;

        info!(
            count = scores.len(),
            dir = %self.output_dir.display(),
            "Reports written"
        );
        Ok(())
    }
}

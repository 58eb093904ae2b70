//! Submission list loading

use std::path::Path;

use crate::error::{JudgeError, Result};

/// Read repository URLs from a file, one per line
pub fn load_submissions(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(JudgeError::SubmissionsNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_submissions(&content))
}

/// Keep non-blank lines that are not `#` comments, trimmed
pub fn parse_submissions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Last path segment of a repository URL without its `.git` suffix
pub fn project_name(repo_url: &str) -> String {
    let last = repo_url
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

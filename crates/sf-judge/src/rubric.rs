//! Judging rubric and per-submission scores

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{JudgeError, Result};
use crate::submissions::project_name;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Sub-criterion key to score, in rubric order
pub type ScoreMap = IndexMap<String, u8>;

/// One scored sub-criterion of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criterion {
    pub key: &'static str,
    pub header: &'static str,
}

const BEST_PROBLEM: [Criterion; 4] = [
    Criterion { key: "problem_definition", header: "Problem Definition" },
    Criterion { key: "significance_impact", header: "Significance & Impact" },
    Criterion { key: "effectiveness", header: "Effectiveness" },
    Criterion { key: "learning_craftsmanship", header: "Learning & Craftsmanship" },
];

const MOST_COMPLETE: [Criterion; 4] = [
    Criterion { key: "scope_coverage", header: "Scope Coverage" },
    Criterion { key: "robustness_testing", header: "Robustness & Testing" },
    Criterion { key: "documentation_reproducibility", header: "Documentation & Reproducibility" },
    Criterion { key: "code_quality", header: "Code Quality" },
];

const MOST_CREATIVE: [Criterion; 4] = [
    Criterion { key: "originality_innovation", header: "Originality & Innovation" },
    Criterion { key: "vibe_polish", header: "Vibe & Polish" },
    Criterion { key: "effective_execution", header: "Effective Execution" },
    Criterion { key: "storytelling_presentation", header: "Storytelling & Presentation" },
];

/// The three independent rubric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BestProblem,
    MostComplete,
    MostCreative,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::BestProblem,
        Category::MostComplete,
        Category::MostCreative,
    ];

    /// 1-based position used in report headings and JSON field names
    pub fn number(&self) -> u8 {
        match self {
            Category::BestProblem => 1,
            Category::MostComplete => 2,
            Category::MostCreative => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::BestProblem => "Best Problem",
            Category::MostComplete => "Most Complete",
            Category::MostCreative => "Most Creative",
        }
    }

    pub fn criteria(&self) -> &'static [Criterion] {
        match self {
            Category::BestProblem => &BEST_PROBLEM,
            Category::MostComplete => &MOST_COMPLETE,
            Category::MostCreative => &MOST_CREATIVE,
        }
    }

    /// Highest achievable total for this category
    pub fn max_total(&self) -> u32 {
        self.criteria().len() as u32 * u32::from(MAX_SCORE)
    }

    fn baseline(&self) -> ScoreMap {
        self.criteria()
            .iter()
            .map(|criterion| (criterion.key.to_string(), MIN_SCORE))
            .collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Category {}: {}", self.number(), self.title())
    }
}

/// Scores for one judged repository.
///
/// Totals are derived: every mutation goes through [`SubmissionScore::set`],
/// which recomputes them, so `categoryN_total` always equals the sum of
/// `categoryN_scores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionScore {
    project_name: String,
    github_repo: String,
    category1_scores: ScoreMap,
    category2_scores: ScoreMap,
    category3_scores: ScoreMap,
    category1_total: u32,
    category2_total: u32,
    category3_total: u32,
    notes: String,
}

impl SubmissionScore {
    /// Every sub-criterion at the minimum score
    pub fn baseline(project_name: impl Into<String>, github_repo: impl Into<String>) -> Self {
        let mut score = Self {
            project_name: project_name.into(),
            github_repo: github_repo.into(),
            category1_scores: Category::BestProblem.baseline(),
            category2_scores: Category::MostComplete.baseline(),
            category3_scores: Category::MostCreative.baseline(),
            category1_total: 0,
            category2_total: 0,
            category3_total: 0,
            notes: String::new(),
        };
        score.recompute_totals();
        score
    }

    /// Baseline score named after the repository URL
    pub fn for_url(github_repo: &str) -> Self {
        Self::baseline(project_name(github_repo), github_repo)
    }

    /// Lowest-score placeholder for a submission that could not be judged
    pub fn failed(github_repo: &str, reason: &str) -> Self {
        let mut score = Self::for_url(github_repo);
        score.notes = format!("Failed to judge: {}", reason);
        score
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn github_repo(&self) -> &str {
        &self.github_repo
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn scores(&self, category: Category) -> &ScoreMap {
        match category {
            Category::BestProblem => &self.category1_scores,
            Category::MostComplete => &self.category2_scores,
            Category::MostCreative => &self.category3_scores,
        }
    }

    pub fn score(&self, category: Category, criterion: &str) -> Option<u8> {
        self.scores(category).get(criterion).copied()
    }

    pub fn total(&self, category: Category) -> u32 {
        match category {
            Category::BestProblem => self.category1_total,
            Category::MostComplete => self.category2_total,
            Category::MostCreative => self.category3_total,
        }
    }

    /// Set one sub-criterion, clamped to the rubric range
    pub fn set(&mut self, category: Category, criterion: &str, value: u8) -> Result<()> {
        let slot = self
            .scores_mut(category)
            .get_mut(criterion)
            .ok_or_else(|| JudgeError::UnknownCriterion {
                category,
                criterion: criterion.to_string(),
            })?;
        *slot = value.clamp(MIN_SCORE, MAX_SCORE);
        self.recompute_totals();
        Ok(())
    }

    fn scores_mut(&mut self, category: Category) -> &mut ScoreMap {
        match category {
            Category::BestProblem => &mut self.category1_scores,
            Category::MostComplete => &mut self.category2_scores,
            Category::MostCreative => &mut self.category3_scores,
        }
    }

    fn recompute_totals(&mut self) {
        let sum = |map: &ScoreMap| -> u32 { map.values().map(|&v| u32::from(v)).sum() };
        self.category1_total = sum(&self.category1_scores);
        self.category2_total = sum(&self.category2_scores);
        self.category3_total = sum(&self.category3_scores);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_totals_consistent(score: &SubmissionScore) {
        for category in Category::ALL {
            let sum: u32 = score.scores(category).values().map(|&v| u32::from(v)).sum();
            assert_eq!(score.total(category), sum, "{}", category);
        }
    }

    #[test]
    fn test_baseline_all_ones() {
        let score = SubmissionScore::baseline("demo", "https://github.com/team/demo");
        for category in Category::ALL {
            assert_eq!(score.total(category), 4);
            assert!(score.scores(category).values().all(|&v| v == MIN_SCORE));
        }
        assert!(score.notes().is_empty());
    }

    #[test]
    fn test_totals_follow_mutations() {
        let mut score = SubmissionScore::baseline("demo", "repo");
        score.set(Category::BestProblem, "problem_definition", 6).unwrap();
        assert_totals_consistent(&score);
        assert_eq!(score.total(Category::BestProblem), 9);

        score.set(Category::MostCreative, "vibe_polish", 10).unwrap();
        score.set(Category::MostCreative, "vibe_polish", 3).unwrap();
        assert_totals_consistent(&score);
        assert_eq!(score.total(Category::MostCreative), 6);
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut score = SubmissionScore::baseline("demo", "repo");
        score.set(Category::MostComplete, "code_quality", 42).unwrap();
        score.set(Category::MostComplete, "scope_coverage", 0).unwrap();

        assert_eq!(score.score(Category::MostComplete, "code_quality"), Some(MAX_SCORE));
        assert_eq!(score.score(Category::MostComplete, "scope_coverage"), Some(MIN_SCORE));
        assert_totals_consistent(&score);
    }

    #[test]
    fn test_unknown_criterion_rejected() {
        let mut score = SubmissionScore::baseline("demo", "repo");
        let err = score.set(Category::BestProblem, "code_quality", 5).unwrap_err();

        assert!(matches!(err, JudgeError::UnknownCriterion { .. }));
        assert_eq!(score.total(Category::BestProblem), 4);
    }

    #[test]
    fn test_failed_placeholder() {
        let score = SubmissionScore::failed("https://github.com/team/broken.git", "boom");
        assert_eq!(score.project_name(), "broken");
        assert_eq!(score.notes(), "Failed to judge: boom");
        assert_eq!(score.total(Category::MostComplete), 4);
    }

    #[test]
    fn test_json_field_order() {
        let score = SubmissionScore::baseline("demo", "repo");
        let json = serde_json::to_string(&score).unwrap();

        let first = json.find("problem_definition").unwrap();
        let last = json.find("learning_craftsmanship").unwrap();
        assert!(first < last);
        assert!(json.contains("\"category2_total\":4"));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::MostComplete.to_string(), "Category 2: Most Complete");
        assert_eq!(Category::MostCreative.max_total(), 40);
    }
}

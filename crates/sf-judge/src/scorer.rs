//! Rule-based scoring
//!
//! A [`Scorer`] is an ordered list of [`ScoreRule`]s. Each rule pairs a
//! predicate over the collected [`Evidence`] with the sub-criterion values it
//! sets. Rules are independent: all matching rules apply, in order.

use tracing::debug;

use crate::error::Result;
use crate::rubric::{Category, SubmissionScore};

/// What the judge observed about one submission
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    pub readme: String,
    pub setup_success: bool,
    pub run_success: bool,
}

/// One sub-criterion assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEffect {
    pub category: Category,
    pub criterion: &'static str,
    pub value: u8,
}

type Predicate = Box<dyn Fn(&Evidence) -> bool + Send + Sync>;

/// A predicate and the scores it sets when it holds
pub struct ScoreRule {
    name: &'static str,
    predicate: Predicate,
    effects: Vec<ScoreEffect>,
}

impl ScoreRule {
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&Evidence) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            predicate: Box::new(predicate),
            effects: Vec::new(),
        }
    }

    /// Add an assignment applied when the rule matches
    pub fn sets(mut self, category: Category, criterion: &'static str, value: u8) -> Self {
        self.effects.push(ScoreEffect {
            category,
            criterion,
            value,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn effects(&self) -> &[ScoreEffect] {
        &self.effects
    }

    pub fn matches(&self, evidence: &Evidence) -> bool {
        (self.predicate)(evidence)
    }
}

impl std::fmt::Debug for ScoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreRule")
            .field("name", &self.name)
            .field("effects", &self.effects)
            .finish()
    }
}

/// Ordered rule set applied to a baseline score
#[derive(Debug)]
pub struct Scorer {
    rules: Vec<ScoreRule>,
}

impl Default for Scorer {
    /// Placeholder heuristics until real judgment is plugged in
    fn default() -> Self {
        Self::empty()
            .with_rule(
                ScoreRule::new("readme_mentions_problem", |e| {
                    e.readme.to_lowercase().contains("problem")
                })
                .sets(Category::BestProblem, "problem_definition", 6),
            )
            .with_rule(
                ScoreRule::new("setup_succeeded", |e| e.setup_success).sets(
                    Category::MostComplete,
                    "documentation_reproducibility",
                    7,
                ),
            )
            .with_rule(
                ScoreRule::new("run_succeeded", |e| e.run_success)
                    .sets(Category::MostComplete, "robustness_testing", 7)
                    .sets(Category::MostCreative, "effective_execution", 7),
            )
    }
}

impl Scorer {
    /// A scorer with no rules; every score stays at baseline
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: ScoreRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ScoreRule] {
        &self.rules
    }

    /// Apply every matching rule; returns the names of the rules that fired
    pub fn apply(&self, evidence: &Evidence, score: &mut SubmissionScore) -> Result<Vec<&'static str>> {
        let mut fired = Vec::new();

        for rule in self.rules.iter().filter(|rule| rule.matches(evidence)) {
            for effect in rule.effects() {
                score.set(effect.category, effect.criterion, effect.value)?;
            }
            debug!(rule = rule.name(), project = score.project_name(), "Score rule fired");
            fired.push(rule.name());
        }

        Ok(fired)
    }
}

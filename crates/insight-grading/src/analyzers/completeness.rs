//! Completeness: enough words, some structure, and coverage of strategy, tactics and
//! metrics.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use super::BASE_SCORE;
use crate::rules::{Rule, RuleSet};

/// Word counts that earn the full length bonus.
pub const OPTIMAL_WORDS: RangeInclusive<usize> = 50..=150;
/// Word counts that earn the partial length bonus.
pub const ACCEPTABLE_WORDS: RangeInclusive<usize> = 30..=200;

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        BASE_SCORE,
        vec![
            Rule::predicate(
                "optimal_length",
                |s| OPTIMAL_WORDS.contains(&s.answer.word_count()),
                2.0,
            ),
            Rule::predicate(
                "acceptable_length",
                |s| {
                    let words = s.answer.word_count();
                    ACCEPTABLE_WORDS.contains(&words) && !OPTIMAL_WORDS.contains(&words)
                },
                1.0,
            ),
            Rule::predicate("multiple_sentences", |s| s.answer.sentence_count() >= 2, 1.0),
            Rule::pattern("list_structure", r"(?m)^\s*(?:[-*•]|\d+[.)])\s+\S", 0.5),
            Rule::pattern(
                "strategy_coverage",
                r"\b(?:strateg\w*|vision|approach|position\w*)\b",
                0.5,
            ),
            Rule::pattern(
                "tactics_coverage",
                r"\b(?:tactic\w*|campaigns?|channels?|execut\w*|plan\w*|initiatives?)\b",
                0.5,
            ),
            Rule::pattern(
                "metrics_coverage",
                r"\b(?:metrics?|kpis?|measur\w*|track\w*|conversion|retention)\b",
                0.5,
            ),
        ],
    )
});

pub fn rules() -> &'static RuleSet {
    &RULES
}

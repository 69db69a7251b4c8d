//! Alignment: how closely the answer speaks to its dimension, its industry and an
//! established way of working.

use std::sync::LazyLock;

use super::BASE_SCORE;
use crate::answer::Answer;
use crate::keywords::{METHODOLOGY_PATTERN, VERTICAL_PATTERN};
use crate::rules::{Rule, RuleSet, Subject};

/// Points per distinct dimension keyword.
pub const KEYWORD_WEIGHT: f64 = 0.5;
/// Cap on the total keyword contribution.
pub const KEYWORD_CAP: f64 = 3.0;

/// Context values shorter than this are ignored when looking for echoes.
const MIN_CONTEXT_TERM_CHARS: usize = 4;

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        BASE_SCORE,
        vec![
            Rule::per_item(
                "dimension_keywords",
                |s| keyword_hits(s.answer, s.keywords),
                KEYWORD_WEIGHT,
                KEYWORD_CAP,
            ),
            Rule::pattern("vertical_terminology", VERTICAL_PATTERN, 1.0),
            Rule::pattern("methodology", METHODOLOGY_PATTERN, 1.0),
            Rule::predicate("context_echo", echoes_context, 0.5),
        ],
    )
});

pub fn rules() -> &'static RuleSet {
    &RULES
}

/// Number of distinct keywords the answer mentions.
pub fn keyword_hits(answer: &Answer, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| answer.mentions(k)).count()
}

fn echoes_context(subject: &Subject<'_>) -> bool {
    subject.context.values().any(|value| {
        value
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|term| term.chars().count() >= MIN_CONTEXT_TERM_CHARS)
            .any(|term| subject.answer.mentions(term))
    })
}

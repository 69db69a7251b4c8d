//! Raw relevance scoring.
//!
//! A scorer turns one candidate's content and properties into an unbounded,
//! non-negative raw score. The pipeline only relies on two properties: the score never
//! decreases when another query token or priority property matches, and it is always a
//! finite number (the per-source maximum becomes a divisor during normalization).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RankingError;
use crate::model::Properties;

pub const BASE_SCORE: f64 = 10.0;
pub const TOKEN_MATCH_BONUS: f64 = 15.0;
pub const PRIORITY_FIELD_BONUS: f64 = 8.0;
pub const NUMERIC_BONUS: f64 = 5.0;
pub const LENGTH_BONUS: f64 = 10.0;
/// Content at least this many characters long earns [`LENGTH_BONUS`].
pub const MIN_CONTENT_CHARS: usize = 20;

/// Property-key fragments that mark a field as domain-significant.
const PRIORITY_KEY_FRAGMENTS: &[&str] = &[
    "business",
    "value",
    "proposition",
    "technolog",
    "tech_stack",
    "market",
    "revenue",
    "pricing",
    "industry",
    "problem",
    "solution",
    "customer",
];

/// Pluggable raw-score strategy, chosen once when the pipeline is built.
pub trait RelevanceScorer: Send + Sync {
    /// Score `content` against already-extracted query tokens.
    fn score(&self, content: &str, query_tokens: &[String], properties: &Properties) -> f64;

    /// Stable name used in logs and configuration.
    fn name(&self) -> &str;
}

/// Which scorer implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Lexical,
    Saturating,
}

impl ScorerKind {
    pub fn build(self) -> Box<dyn RelevanceScorer> {
        match self {
            ScorerKind::Lexical => Box::new(LexicalScorer),
            ScorerKind::Saturating => Box::new(SaturatingScorer),
        }
    }
}

impl FromStr for ScorerKind {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(ScorerKind::Lexical),
            "saturating" => Ok(ScorerKind::Saturating),
            other => Err(RankingError::UnknownScorer(other.to_string())),
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerKind::Lexical => f.write_str("lexical"),
            ScorerKind::Saturating => f.write_str("saturating"),
        }
    }
}

/// Linear bonus per matched query token.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl RelevanceScorer for LexicalScorer {
    fn score(&self, content: &str, query_tokens: &[String], properties: &Properties) -> f64 {
        let hits = token_hits(content, query_tokens) as f64;
        finite_or_zero(common_bonuses(content, properties) + TOKEN_MATCH_BONUS * hits)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

/// Token bonus with diminishing returns, so long keyword-stuffed content cannot run away
/// from the rest of its source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaturatingScorer;

impl RelevanceScorer for SaturatingScorer {
    fn score(&self, content: &str, query_tokens: &[String], properties: &Properties) -> f64 {
        let hits = token_hits(content, query_tokens) as f64;
        let token_bonus = if hits > 0.0 {
            TOKEN_MATCH_BONUS * hits / (1.0 + 0.25 * (hits - 1.0))
        } else {
            0.0
        };
        finite_or_zero(common_bonuses(content, properties) + token_bonus)
    }

    fn name(&self) -> &str {
        "saturating"
    }
}

/// Number of query tokens that appear in the content (case-insensitive substring).
pub fn token_hits(content: &str, query_tokens: &[String]) -> usize {
    if content.is_empty() || query_tokens.is_empty() {
        return 0;
    }
    let haystack = content.to_lowercase();
    query_tokens
        .iter()
        .filter(|t| haystack.contains(t.as_str()))
        .count()
}

/// Number of property keys matching the priority allow-list.
pub fn priority_field_count(properties: &Properties) -> usize {
    properties
        .keys()
        .filter(|key| is_priority_key(key))
        .count()
}

pub fn is_priority_key(key: &str) -> bool {
    let key = key.to_lowercase();
    PRIORITY_KEY_FRAGMENTS.iter().any(|f| key.contains(f))
}

fn common_bonuses(content: &str, properties: &Properties) -> f64 {
    let mut score = BASE_SCORE;
    score += PRIORITY_FIELD_BONUS * priority_field_count(properties) as f64;
    if content.chars().any(|c| c.is_ascii_digit() || c == '%') {
        score += NUMERIC_BONUS;
    }
    if content.chars().count() >= MIN_CONTENT_CHARS {
        score += LENGTH_BONUS;
    }
    score
}

fn finite_or_zero(score: f64) -> f64 {
    if score.is_finite() {
        score.max(0.0)
    } else {
        0.0
    }
}

//! Query token extraction.
//!
//! Lowercase, split on anything that is not alphanumeric, drop stopwords and tokens
//! shorter than [`MIN_TOKEN_CHARS`], keep the first occurrence of each token.

use std::collections::HashSet;

/// Tokens with fewer characters than this carry too little signal to match on.
pub const MIN_TOKEN_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "because", "been", "before", "but",
    "can", "could", "did", "does", "for", "from", "had", "has", "have", "her", "his", "how",
    "into", "its", "just", "more", "most", "not", "now", "off", "once", "only", "other", "our",
    "out", "over", "own", "same", "she", "should", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "through", "too",
    "under", "until", "very", "was", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Extract the ordered, deduplicated set of content tokens from a query.
///
/// ```
/// use insight_ranking::tokens::extract_tokens;
///
/// assert_eq!(
///     extract_tokens("The fraud detection for Payment fraud"),
///     vec!["fraud", "detection", "payment"],
/// );
/// ```
pub fn extract_tokens(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !is_stopword(t))
        .filter(|t| seen.insert(t.to_string()))
        .map(String::from)
        .collect()
}

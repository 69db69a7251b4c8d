#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("invalid ranking config: {0}")]
    InvalidConfig(String),

    #[error("unknown scorer: '{0}' (expected 'lexical' or 'saturating')")]
    UnknownScorer(String),
}

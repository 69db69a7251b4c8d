//! Relevance ranking for candidate documents pulled from several content sources.
//!
//! Stages, leaf first: [`tokens`] extracts query tokens, [`scorer`] computes raw scores,
//! [`normalize`] rescales them per source, [`acceptance`] applies the adaptive cutoff,
//! [`ranker`] orders the survivors and [`diversity`] caps each source's share.
//! [`pipeline::RankingPipeline`] runs them in order.
//!
//! Everything here is synchronous and free of shared state.

pub mod acceptance;
pub mod config;
pub mod diversity;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod ranker;
pub mod scorer;
pub mod tokens;

pub use config::RankingConfig;
pub use error::RankingError;
pub use model::{Candidate, CandidateInput, Properties, RankedEntry, RankedResult, RankingRequest};
pub use normalize::SourceStats;
pub use pipeline::RankingPipeline;
pub use scorer::{LexicalScorer, RelevanceScorer, SaturatingScorer, ScorerKind};

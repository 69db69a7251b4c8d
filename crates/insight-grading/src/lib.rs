//! Heuristic grading of free-text answers to business validation questions.
//!
//! Each answer is scored on four axes by table-driven rule sets in [`analyzers`]; the axes
//! are combined with [`aggregate::GradingWeights`] into a per-dimension score, and the
//! dimension scores average into an overall rating.

pub mod aggregate;
pub mod analyzers;
pub mod answer;
pub mod config;
pub mod error;
pub mod grader;
pub mod keywords;
pub mod model;
pub mod rules;

pub use aggregate::GradingWeights;
pub use analyzers::Axis;
pub use config::GradingConfig;
pub use error::GradingError;
pub use grader::Grader;
pub use model::{
    Dimension, DimensionScoreReport, GradingContext, RatingLabel, ScoringReport, SubScores,
    ValidationAnswer,
};

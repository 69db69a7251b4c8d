use serde::{Deserialize, Serialize};

use crate::aggregate::GradingWeights;
use crate::error::GradingError;
use crate::rules::MAX_SCORE;

pub const DEFAULT_GAP_THRESHOLD: f64 = 6.0;
pub const DEFAULT_STRENGTH_THRESHOLD: f64 = 8.0;
pub const DEFAULT_MIN_ANSWER_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    pub weights: GradingWeights,
    /// Sub-scores below this produce a gap message.
    pub gap_threshold: f64,
    /// Sub-scores at or above this produce a strength message.
    pub strength_threshold: f64,
    /// Trimmed answers shorter than this many characters get the minimal-score result.
    pub min_answer_chars: usize,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            weights: GradingWeights::default(),
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            strength_threshold: DEFAULT_STRENGTH_THRESHOLD,
            min_answer_chars: DEFAULT_MIN_ANSWER_CHARS,
        }
    }
}

impl GradingConfig {
    pub fn validate(&self) -> Result<(), GradingError> {
        for (name, value) in [
            ("gap_threshold", self.gap_threshold),
            ("strength_threshold", self.strength_threshold),
        ] {
            if !value.is_finite() || !(0.0..=MAX_SCORE).contains(&value) {
                return Err(GradingError::InvalidConfig(format!(
                    "{name} must be within [0, {MAX_SCORE}], got {value}"
                )));
            }
        }
        if self.gap_threshold > self.strength_threshold {
            return Err(GradingError::InvalidConfig(format!(
                "gap_threshold ({}) must not exceed strength_threshold ({})",
                self.gap_threshold, self.strength_threshold
            )));
        }
        Ok(())
    }
}

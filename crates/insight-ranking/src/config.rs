use serde::{Deserialize, Serialize};

use crate::error::RankingError;
use crate::normalize::NORMALIZATION_FLOOR;
use crate::scorer::ScorerKind;

pub const DEFAULT_PERCENTILE: f64 = 70.0;
pub const DEFAULT_MIN_ACCEPTABLE: f64 = 35.0;
pub const DEFAULT_MAX_PER_SOURCE: usize = 3;

/// Tuning for one ranking pipeline.
///
/// Requests may override `percentile`, `min_acceptable` and `max_per_source`; the
/// overrides go through the same validation as the base configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Percentile (0, 100] of normalized scores used as the acceptance cutoff.
    pub percentile: f64,
    /// Lowest normalized score a candidate may be accepted with.
    pub min_acceptable: f64,
    /// Maximum candidates kept per source after ranking.
    pub max_per_source: usize,
    /// Floor applied to each source's maximum raw score before dividing.
    pub normalization_floor: f64,
    pub scorer: ScorerKind,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            min_acceptable: DEFAULT_MIN_ACCEPTABLE,
            max_per_source: DEFAULT_MAX_PER_SOURCE,
            normalization_floor: NORMALIZATION_FLOOR,
            scorer: ScorerKind::default(),
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), RankingError> {
        if !self.percentile.is_finite() || self.percentile <= 0.0 || self.percentile > 100.0 {
            return Err(RankingError::InvalidConfig(format!(
                "percentile must be in (0, 100], got {}",
                self.percentile
            )));
        }
        if !self.min_acceptable.is_finite() || !(0.0..=100.0).contains(&self.min_acceptable) {
            return Err(RankingError::InvalidConfig(format!(
                "min_acceptable must be in [0, 100], got {}",
                self.min_acceptable
            )));
        }
        if self.max_per_source == 0 {
            return Err(RankingError::InvalidConfig(
                "max_per_source must be at least 1".to_string(),
            ));
        }
        if !self.normalization_floor.is_finite() || self.normalization_floor <= 0.0 {
            return Err(RankingError::InvalidConfig(format!(
                "normalization_floor must be positive, got {}",
                self.normalization_floor
            )));
        }
        Ok(())
    }

    /// Copy of this configuration with request-level overrides applied and validated.
    pub fn with_overrides(
        &self,
        max_per_source: Option<usize>,
        percentile: Option<f64>,
        min_acceptable: Option<f64>,
    ) -> Result<Self, RankingError> {
        let config = Self {
            percentile: percentile.unwrap_or(self.percentile),
            min_acceptable: min_acceptable.unwrap_or(self.min_acceptable),
            max_per_source: max_per_source.unwrap_or(self.max_per_source),
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

//! Weighted aggregation of the four sub-scores, plus gap and strength explanations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyzers::Axis;
use crate::error::GradingError;
use crate::model::SubScores;
use crate::rules::MAX_SCORE;

/// Allowed distance of the weight sum from 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-axis weights. Always sum to 1.0; construct through [`GradingWeights::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradingWeights {
    specificity: f64,
    alignment: f64,
    completeness: f64,
    actionability: f64,
}

impl GradingWeights {
    pub fn new(
        specificity: f64,
        alignment: f64,
        completeness: f64,
        actionability: f64,
    ) -> Result<Self, GradingError> {
        let weights = Self {
            specificity,
            alignment,
            completeness,
            actionability,
        };
        for axis in Axis::ALL {
            let value = weights.weight(axis);
            if !value.is_finite() || value < 0.0 {
                return Err(GradingError::InvalidWeight {
                    axis: axis.name(),
                    value,
                });
            }
        }
        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GradingError::WeightSum(sum));
        }
        Ok(weights)
    }

    pub fn weight(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Specificity => self.specificity,
            Axis::Alignment => self.alignment,
            Axis::Completeness => self.completeness,
            Axis::Actionability => self.actionability,
        }
    }

    pub fn sum(&self) -> f64 {
        self.specificity + self.alignment + self.completeness + self.actionability
    }
}

impl Default for GradingWeights {
    fn default() -> Self {
        Self {
            specificity: 0.35,
            alignment: 0.30,
            completeness: 0.20,
            actionability: 0.15,
        }
    }
}

impl<'de> Deserialize<'de> for GradingWeights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            specificity: f64,
            alignment: f64,
            completeness: f64,
            actionability: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        GradingWeights::new(raw.specificity, raw.alignment, raw.completeness, raw.actionability)
            .map_err(serde::de::Error::custom)
    }
}

impl FromStr for GradingWeights {
    type Err = GradingError;

    /// Four comma-separated numbers in axis order: specificity, alignment, completeness,
    /// actionability.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| GradingError::InvalidConfig(format!("weights '{s}': {e}")))?;
        match values.as_slice() {
            [specificity, alignment, completeness, actionability] => {
                GradingWeights::new(*specificity, *alignment, *completeness, *actionability)
            }
            _ => Err(GradingError::InvalidConfig(format!(
                "expected four comma-separated weights, got {}",
                values.len()
            ))),
        }
    }
}

/// `round(Σ weight · score, 1)` clamped to 0..=10.
pub fn weighted_total(scores: &SubScores, weights: &GradingWeights) -> f64 {
    let total: f64 = Axis::ALL
        .iter()
        .map(|axis| weights.weight(*axis) * axis.score_of(scores))
        .sum();
    if !total.is_finite() {
        return 0.0;
    }
    round_one_decimal(total).clamp(0.0, MAX_SCORE)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Canned explanation for every axis scoring below `threshold`.
pub fn gaps(scores: &SubScores, threshold: f64) -> Vec<String> {
    Axis::ALL
        .iter()
        .filter(|axis| axis.score_of(scores) < threshold)
        .map(|axis| gap_message(*axis).to_string())
        .collect()
}

/// Canned praise for every axis scoring at or above `threshold`.
pub fn strengths(scores: &SubScores, threshold: f64) -> Vec<String> {
    Axis::ALL
        .iter()
        .filter(|axis| axis.score_of(scores) >= threshold)
        .map(|axis| strength_message(*axis).to_string())
        .collect()
}

pub fn gap_message(axis: Axis) -> &'static str {
    match axis {
        Axis::Specificity => {
            "Add concrete numbers: market sizes, prices, percentages, KPIs or dates."
        }
        Axis::Alignment => {
            "Address the question more directly using the vocabulary of this dimension and your industry."
        }
        Axis::Completeness => {
            "Expand the answer to cover strategy, tactics and how you will measure results."
        }
        Axis::Actionability => {
            "Spell out next steps, their order and how you will know they succeeded."
        }
    }
}

pub fn strength_message(axis: Axis) -> &'static str {
    match axis {
        Axis::Specificity => "Backed by concrete figures and timelines.",
        Axis::Alignment => "Stays on topic and speaks the language of the market.",
        Axis::Completeness => "Well structured and covers the topic end to end.",
        Axis::Actionability => "Clear, sequenced plan with defined success criteria.",
    }
}

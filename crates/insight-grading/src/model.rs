use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradingError;

/// Free-form grading context, e.g. `{"industry": "fintech"}`.
pub type GradingContext = BTreeMap<String, String>;

/// One of the five fixed evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    MarketTrends,
    CompetitivePositioning,
    CustomerValidation,
    BusinessModel,
    GoToMarket,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::MarketTrends,
        Dimension::CompetitivePositioning,
        Dimension::CustomerValidation,
        Dimension::BusinessModel,
        Dimension::GoToMarket,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::MarketTrends => "market_trends",
            Dimension::CompetitivePositioning => "competitive_positioning",
            Dimension::CustomerValidation => "customer_validation",
            Dimension::BusinessModel => "business_model",
            Dimension::GoToMarket => "go_to_market",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = GradingError;

    /// Accepts the snake_case label in any case, with spaces or hyphens in place of
    /// underscores, plus a few short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "market_trends" | "market" | "trends" => Ok(Dimension::MarketTrends),
            "competitive_positioning" | "competition" | "competitors" => {
                Ok(Dimension::CompetitivePositioning)
            }
            "customer_validation" | "customers" | "validation" => Ok(Dimension::CustomerValidation),
            "business_model" | "monetization" => Ok(Dimension::BusinessModel),
            "go_to_market" | "gtm" => Ok(Dimension::GoToMarket),
            _ => Err(GradingError::UnknownDimension(s.to_string())),
        }
    }
}

/// One free-text answer for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationAnswer {
    pub dimension: Dimension,
    pub text: String,
}

impl ValidationAnswer {
    pub fn new(dimension: Dimension, text: impl Into<String>) -> Self {
        Self {
            dimension,
            text: text.into(),
        }
    }
}

/// Scores of the four quality axes for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub specificity: f64,
    pub alignment: f64,
    pub completeness: f64,
    pub actionability: f64,
}

impl SubScores {
    pub fn uniform(score: f64) -> Self {
        Self {
            specificity: score,
            alignment: score,
            completeness: score,
            actionability: score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScoreReport {
    pub dimension: Dimension,
    /// Weighted total in 0..=10, rounded to one decimal.
    pub score: f64,
    pub specificity_score: f64,
    pub alignment_score: f64,
    pub completeness_score: f64,
    pub actionability_score: f64,
    pub gaps: Vec<String>,
    pub strengths: Vec<String>,
    /// Distinct dimension keywords found in the answer.
    pub keywords_found: usize,
    pub word_count: usize,
}

impl DimensionScoreReport {
    pub fn sub_scores(&self) -> SubScores {
        SubScores {
            specificity: self.specificity_score,
            alignment: self.alignment_score,
            completeness: self.completeness_score,
            actionability: self.actionability_score,
        }
    }
}

const LADDER_TOLERANCE: f64 = 1e-9;

/// Threshold ladder over the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLabel {
    Exceptional,
    Promising,
    Moderate,
    NeedsRefinement,
}

impl RatingLabel {
    /// Steps are compared with a 1e-9 tolerance: a mean of one-decimal scores can land a
    /// rounding error below a step.
    pub fn from_score(score: f64) -> Self {
        let score = score + LADDER_TOLERANCE;
        if score >= 8.5 {
            RatingLabel::Exceptional
        } else if score >= 7.0 {
            RatingLabel::Promising
        } else if score >= 5.5 {
            RatingLabel::Moderate
        } else {
            RatingLabel::NeedsRefinement
        }
    }

    /// Machine-readable label, matching the serde representation.
    pub fn label(self) -> &'static str {
        match self {
            RatingLabel::Exceptional => "exceptional",
            RatingLabel::Promising => "promising",
            RatingLabel::Moderate => "moderate",
            RatingLabel::NeedsRefinement => "needs_refinement",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RatingLabel::Exceptional => "Exceptional",
            RatingLabel::Promising => "Promising",
            RatingLabel::Moderate => "Moderate",
            RatingLabel::NeedsRefinement => "Needs refinement",
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringReport {
    /// Arithmetic mean of the per-dimension scores.
    pub overall_score: f64,
    pub rating_label: RatingLabel,
    pub dimensions: Vec<DimensionScoreReport>,
}

impl ScoringReport {
    pub fn from_dimensions(dimensions: Vec<DimensionScoreReport>) -> Self {
        let overall_score = if dimensions.is_empty() {
            0.0
        } else {
            dimensions.iter().map(|d| d.score).sum::<f64>() / dimensions.len() as f64
        };
        Self {
            overall_score,
            rating_label: RatingLabel::from_score(overall_score),
            dimensions,
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScoreReport> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}

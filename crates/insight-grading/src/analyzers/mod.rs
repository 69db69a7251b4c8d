//! The four quality axes. Each analyzer is a rule table folded over one answer, starting
//! at [`BASE_SCORE`] and capped at [`MAX_SCORE`](crate::rules::MAX_SCORE).

pub mod actionability;
pub mod alignment;
pub mod completeness;
pub mod specificity;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::model::{GradingContext, SubScores};
use crate::rules::{RuleOutcome, RuleSet, Subject};

pub const BASE_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Specificity,
    Alignment,
    Completeness,
    Actionability,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Specificity,
        Axis::Alignment,
        Axis::Completeness,
        Axis::Actionability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Specificity => "specificity",
            Axis::Alignment => "alignment",
            Axis::Completeness => "completeness",
            Axis::Actionability => "actionability",
        }
    }

    pub fn rules(self) -> &'static RuleSet {
        match self {
            Axis::Specificity => specificity::rules(),
            Axis::Alignment => alignment::rules(),
            Axis::Completeness => completeness::rules(),
            Axis::Actionability => actionability::rules(),
        }
    }

    pub fn score_of(self, scores: &SubScores) -> f64 {
        match self {
            Axis::Specificity => scores.specificity,
            Axis::Alignment => scores.alignment,
            Axis::Completeness => scores.completeness,
            Axis::Actionability => scores.actionability,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run all four analyzers over one answer.
pub fn analyze(
    answer: &Answer,
    keywords: &[&'static str],
    context: &GradingContext,
) -> SubScores {
    let subject = Subject::new(answer, keywords, context);
    let score = |axis: Axis| -> RuleOutcome { axis.rules().evaluate(&subject) };
    SubScores {
        specificity: score(Axis::Specificity).score,
        alignment: score(Axis::Alignment).score,
        completeness: score(Axis::Completeness).score,
        actionability: score(Axis::Actionability).score,
    }
}

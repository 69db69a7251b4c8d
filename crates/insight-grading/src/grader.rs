//! Grader: runs the analyzers over each answer and aggregates a scoring report.

use std::collections::BTreeMap;

use tracing::debug;

use crate::aggregate::{gaps, strengths, weighted_total};
use crate::analyzers::{self, alignment};
use crate::answer::Answer;
use crate::config::GradingConfig;
use crate::error::GradingError;
use crate::model::{
    Dimension, DimensionScoreReport, GradingContext, ScoringReport, SubScores, ValidationAnswer,
};

/// Score given to answers too short to analyze.
pub const MINIMAL_SCORE: f64 = 2.0;

pub const TOO_SHORT_GAP: &str =
    "Answer is too short to evaluate. Provide a detailed response of at least a few sentences.";

#[derive(Default)]
pub struct Grader {
    config: GradingConfig,
}

impl Grader {
    pub fn new(config: GradingConfig) -> Result<Self, GradingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade one answer against its dimension.
    pub fn grade_answer(
        &self,
        dimension: Dimension,
        text: &str,
        context: &GradingContext,
    ) -> DimensionScoreReport {
        let answer = Answer::new(text);
        if answer.char_count() < self.config.min_answer_chars {
            debug!(%dimension, chars = answer.char_count(), "answer below minimum length");
            return minimal_report(dimension, answer.word_count());
        }

        let keywords = dimension.keywords();
        let sub_scores = analyzers::analyze(&answer, keywords, context);
        let score = weighted_total(&sub_scores, &self.config.weights);

        debug!(
            %dimension,
            score,
            specificity = sub_scores.specificity,
            alignment = sub_scores.alignment,
            completeness = sub_scores.completeness,
            actionability = sub_scores.actionability,
            "answer graded"
        );

        DimensionScoreReport {
            dimension,
            score,
            specificity_score: sub_scores.specificity,
            alignment_score: sub_scores.alignment,
            completeness_score: sub_scores.completeness,
            actionability_score: sub_scores.actionability,
            gaps: gaps(&sub_scores, self.config.gap_threshold),
            strengths: strengths(&sub_scores, self.config.strength_threshold),
            keywords_found: alignment::keyword_hits(&answer, keywords),
            word_count: answer.word_count(),
        }
    }

    /// Grade a set of answers. Dimensions are reported in canonical order; when a dimension
    /// appears more than once the last answer wins.
    pub fn grade(&self, answers: &[ValidationAnswer], context: &GradingContext) -> ScoringReport {
        let by_dimension: BTreeMap<Dimension, &str> = answers
            .iter()
            .map(|a| (a.dimension, a.text.as_str()))
            .collect();
        let dimensions = by_dimension
            .into_iter()
            .map(|(dimension, text)| self.grade_answer(dimension, text, context))
            .collect();
        let report = ScoringReport::from_dimensions(dimensions);
        debug!(
            overall = report.overall_score,
            rating = %report.rating_label,
            dimensions = report.dimensions.len(),
            "grading complete"
        );
        report
    }

    /// Grade answers keyed by dimension label, e.g. `"market_trends"`.
    pub fn grade_labeled(
        &self,
        answers: &BTreeMap<String, String>,
        context: &GradingContext,
    ) -> Result<ScoringReport, GradingError> {
        let answers = answers
            .iter()
            .map(|(label, text)| Ok(ValidationAnswer::new(label.parse()?, text.clone())))
            .collect::<Result<Vec<_>, GradingError>>()?;
        Ok(self.grade(&answers, context))
    }
}

fn minimal_report(dimension: Dimension, word_count: usize) -> DimensionScoreReport {
    let sub_scores = SubScores::uniform(MINIMAL_SCORE);
    DimensionScoreReport {
        dimension,
        score: MINIMAL_SCORE,
        specificity_score: sub_scores.specificity,
        alignment_score: sub_scores.alignment,
        completeness_score: sub_scores.completeness,
        actionability_score: sub_scores.actionability,
        gaps: vec![TOO_SHORT_GAP.to_string()],
        strengths: Vec::new(),
        keywords_found: 0,
        word_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RatingLabel;

    const STRONG_GTM: &str = "First, we will launch a referral program with our 40 pilot clinics \
        in Q1 2025, targeting 300 paying practices by the end of the year at $199 per month. \
        Our strategy pairs direct sales with a partnership channel through two EHR vendors. \
        Next steps: hire two account executives this quarter and run weekly onboarding \
        webinars. Success will be measured by CAC below $600, a 25% trial-to-paid \
        conversion rate and monthly churn under 2%. We track these KPIs in a shared \
        dashboard and review them every sprint using OKRs.";

    #[test]
    fn short_answer_gets_minimal_report() {
        let report = Grader::default().grade_answer(
            Dimension::MarketTrends,
            "ok",
            &GradingContext::new(),
        );
        assert_eq!(report.score, MINIMAL_SCORE);
        assert!(report.strengths.is_empty());
        assert_eq!(report.gaps, vec![TOO_SHORT_GAP.to_string()]);
        assert_eq!(report.keywords_found, 0);
    }

    #[test]
    fn whitespace_padding_does_not_lengthen_answers() {
        let report = Grader::default().grade_answer(
            Dimension::BusinessModel,
            "     ok        ",
            &GradingContext::new(),
        );
        assert_eq!(report.score, MINIMAL_SCORE);
    }

    #[test]
    fn detailed_answer_scores_well() {
        let report =
            Grader::default().grade_answer(Dimension::GoToMarket, STRONG_GTM, &GradingContext::new());
        assert_eq!(report.specificity_score, 10.0);
        assert_eq!(report.actionability_score, 10.0);
        assert!(report.score >= 8.5, "score {}", report.score);
        assert!(report.gaps.is_empty(), "{:?}", report.gaps);
        assert!(report.keywords_found >= 5);
        assert!(report.word_count > 50);
    }

    #[test]
    fn reports_follow_canonical_dimension_order() {
        let answers = vec![
            ValidationAnswer::new(Dimension::GoToMarket, STRONG_GTM),
            ValidationAnswer::new(Dimension::MarketTrends, "ok"),
        ];
        let report = Grader::default().grade(&answers, &GradingContext::new());
        let order: Vec<Dimension> = report.dimensions.iter().map(|d| d.dimension).collect();
        assert_eq!(order, vec![Dimension::MarketTrends, Dimension::GoToMarket]);
        let mean = (report.dimensions[0].score + report.dimensions[1].score) / 2.0;
        assert_eq!(report.overall_score, mean);
    }

    #[test]
    fn duplicate_dimensions_keep_last_answer() {
        let answers = vec![
            ValidationAnswer::new(Dimension::BusinessModel, STRONG_GTM),
            ValidationAnswer::new(Dimension::BusinessModel, "ok"),
        ];
        let report = Grader::default().grade(&answers, &GradingContext::new());
        assert_eq!(report.dimensions.len(), 1);
        assert_eq!(report.overall_score, MINIMAL_SCORE);
    }

    #[test]
    fn labeled_answers_parse_dimensions() {
        let mut answers = BTreeMap::new();
        answers.insert("go-to-market".to_string(), STRONG_GTM.to_string());
        let report = Grader::default()
            .grade_labeled(&answers, &GradingContext::new())
            .unwrap();
        assert_eq!(report.dimensions[0].dimension, Dimension::GoToMarket);

        answers.insert("team".to_string(), "We are five engineers.".to_string());
        assert!(matches!(
            Grader::default().grade_labeled(&answers, &GradingContext::new()),
            Err(GradingError::UnknownDimension(_))
        ));
    }

    #[test]
    fn no_answers_needs_refinement() {
        let report = Grader::default().grade(&[], &GradingContext::new());
        assert!(report.dimensions.is_empty());
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.rating_label, RatingLabel::NeedsRefinement);
    }
}

//! RankingPipeline: tokens → raw score → normalize → accept → rank → diversify.

use tracing::debug;

use crate::acceptance;
use crate::config::RankingConfig;
use crate::diversity;
use crate::error::RankingError;
use crate::model::{Candidate, CandidateInput, RankedResult, RankingRequest};
use crate::normalize;
use crate::ranker;
use crate::scorer::RelevanceScorer;
use crate::tokens::extract_tokens;

/// Full ranking pipeline over one batch of candidates.
///
/// Holds only immutable configuration and the chosen scorer, so a single pipeline can
/// serve concurrent requests. All per-run state lives on the stack of [`RankingPipeline::rank`].
pub struct RankingPipeline {
    config: RankingConfig,
    scorer: Box<dyn RelevanceScorer>,
}

impl RankingPipeline {
    /// Build a pipeline using the scorer named in the configuration.
    pub fn new(config: RankingConfig) -> Result<Self, RankingError> {
        let scorer = config.scorer.build();
        Self::with_scorer(config, scorer)
    }

    /// Build a pipeline around an explicit scorer implementation.
    pub fn with_scorer(
        config: RankingConfig,
        scorer: Box<dyn RelevanceScorer>,
    ) -> Result<Self, RankingError> {
        config.validate()?;
        Ok(Self { config, scorer })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Rank candidates with the pipeline's own configuration.
    pub fn rank(&self, query: &str, inputs: Vec<CandidateInput>) -> RankedResult {
        self.run(query, inputs, &self.config)
    }

    /// Rank a request, applying its overrides on top of the pipeline configuration.
    pub fn rank_request(&self, request: RankingRequest) -> Result<RankedResult, RankingError> {
        let config = self.config.with_overrides(
            request.max_per_source,
            request.percentile,
            request.min_acceptable,
        )?;
        Ok(self.run(&request.query, request.candidates, &config))
    }

    fn run(
        &self,
        query: &str,
        inputs: Vec<CandidateInput>,
        config: &RankingConfig,
    ) -> RankedResult {
        if inputs.is_empty() {
            return RankedResult {
                candidates: Vec::new(),
                cutoff: config.min_acceptable,
                fallback_applied: false,
            };
        }

        let tokens = extract_tokens(query);
        let mut candidates: Vec<Candidate> = inputs.into_iter().map(Candidate::from).collect();
        score_candidates(self.scorer.as_ref(), &tokens, &mut candidates);

        let stats = normalize::normalize(&mut candidates, config.normalization_floor);
        let total = candidates.len();

        let outcome = acceptance::accept(candidates, config.percentile, config.min_acceptable);
        let accepted = outcome.accepted.len();

        let ranked = ranker::rank(outcome.accepted);
        let diversified = diversity::cap_per_source(ranked, config.max_per_source);

        debug!(
            scorer = self.scorer.name(),
            tokens = tokens.len(),
            sources = stats.len(),
            total,
            accepted,
            returned = diversified.len(),
            cutoff = outcome.cutoff,
            fallback = outcome.fallback_applied,
            "ranking complete"
        );

        RankedResult {
            candidates: diversified,
            cutoff: outcome.cutoff,
            fallback_applied: outcome.fallback_applied,
        }
    }
}

impl Default for RankingPipeline {
    fn default() -> Self {
        let config = RankingConfig::default();
        let scorer = config.scorer.build();
        Self { config, scorer }
    }
}

/// Set `raw_score` on every candidate. Scores a scorer reports as negative or non-finite
/// are recorded as 0.
pub fn score_candidates(
    scorer: &dyn RelevanceScorer,
    query_tokens: &[String],
    candidates: &mut [Candidate],
) {
    for c in candidates.iter_mut() {
        let raw = scorer.score(&c.content, query_tokens, &c.properties);
        c.raw_score = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
    }
}

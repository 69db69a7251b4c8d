/// MCP server exposing the insight pipelines.
///
/// Exposes three tools:
/// - `rank_candidates`: score, normalize, filter and rank candidate documents
/// - `grade_answers`: grade free-text validation answers per business dimension
/// - `clear_result_cache`: drop cached tool results
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::cache::ResultCache;
use insight_common::exposure::Exposure;
use insight_common::mcp_api::{
    ClearCacheResponse, DimensionScore, GradeAnswersParams, GradeAnswersResponse,
    RankCandidatesParams, RankCandidatesResponse, RankedCandidate,
};
use insight_grading::{DimensionScoreReport, Grader, ScoringReport};
use insight_ranking::{Candidate, CandidateInput, RankedResult, RankingPipeline, RankingRequest};

#[derive(Clone)]
pub struct InsightServer {
    ranking: Arc<RankingPipeline>,
    grader: Arc<Grader>,
    cache: Arc<ResultCache>,
    exposure: Exposure,
    tool_router: ToolRouter<InsightServer>,
}

impl InsightServer {
    pub fn new(
        ranking: RankingPipeline,
        grader: Grader,
        cache: Arc<ResultCache>,
        exposure: Exposure,
    ) -> Self {
        Self {
            ranking: Arc::new(ranking),
            grader: Arc::new(grader),
            cache,
            exposure,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl InsightServer {
    #[tool(description = "Rank candidate documents from several content sources against a query. Scores are normalized per source to 0-100, filtered by an adaptive percentile cutoff (never fewer than 3 results when available), ordered, and capped per source.")]
    async fn rank_candidates(
        &self,
        Parameters(params): Parameters<RankCandidatesParams>,
    ) -> Result<Json<RankCandidatesResponse>, String> {
        if let Some(mut cached) = self.cache.get_ranking(&params).await {
            cached.cached = true;
            return Ok(Json(cached));
        }

        let candidate_count = params.candidates.len();
        let ranked = self
            .ranking
            .rank_request(to_ranking_request(&params))
            .map_err(|e| format!("invalid ranking request: {e}"))?;
        info!(
            candidates = candidate_count,
            results = ranked.len(),
            fallback = ranked.fallback_applied,
            "rank_candidates complete"
        );

        let response = to_api_ranking(ranked, self.exposure);
        self.cache.set_ranking(&params, &response).await;
        Ok(Json(response))
    }

    #[tool(description = "Grade free-text answers to business validation questions. Keys are dimensions: market_trends, competitive_positioning, customer_validation, business_model, go_to_market. Returns per-dimension scores (0-10) with gaps and strengths, an overall score and a rating label.")]
    async fn grade_answers(
        &self,
        Parameters(params): Parameters<GradeAnswersParams>,
    ) -> Result<Json<GradeAnswersResponse>, String> {
        if let Some(cached) = self.cache.get_grading(&params).await {
            return Ok(Json(cached));
        }

        let context = params.context.clone().unwrap_or_default();
        let report = self
            .grader
            .grade_labeled(&params.answers, &context)
            .map_err(|e| format!("{e}"))?;
        info!(
            dimensions = report.dimensions.len(),
            overall = report.overall_score,
            rating = %report.rating_label,
            "grade_answers complete"
        );

        let response = to_api_grading(report);
        self.cache.set_grading(&params, &response).await;
        Ok(Json(response))
    }

    #[tool(description = "Clear all cached rank_candidates and grade_answers results.")]
    async fn clear_result_cache(&self) -> Result<Json<ClearCacheResponse>, String> {
        info!("clear_result_cache tool invoked");
        let cleared = self.cache.invalidate_all().await;
        Ok(Json(ClearCacheResponse { cleared }))
    }
}

fn to_ranking_request(params: &RankCandidatesParams) -> RankingRequest {
    RankingRequest {
        query: params.query.clone(),
        candidates: params
            .candidates
            .iter()
            .map(|c| CandidateInput {
                id: c.id.clone(),
                title: c.title.clone(),
                content: c.content.clone(),
                properties: c.properties.clone(),
                source_id: c.source_id.clone(),
            })
            .collect(),
        max_per_source: params.max_per_source.map(|n| n as usize),
        percentile: params.percentile,
        min_acceptable: params.min_acceptable,
    }
}

fn to_api_ranking(ranked: RankedResult, exposure: Exposure) -> RankCandidatesResponse {
    RankCandidatesResponse {
        cutoff: ranked.cutoff,
        fallback_applied: ranked.fallback_applied,
        results: ranked
            .candidates
            .into_iter()
            .map(|c| to_api_candidate(c, exposure))
            .collect(),
        cached: false,
    }
}

fn to_api_candidate(candidate: Candidate, exposure: Exposure) -> RankedCandidate {
    RankedCandidate {
        id: candidate.id,
        title: candidate.title,
        normalized_score: candidate.normalized_score,
        source_id: candidate.source_id,
        raw_score: exposure.reveal(candidate.raw_score),
        content: exposure.reveal(candidate.content),
    }
}

fn to_api_grading(report: ScoringReport) -> GradeAnswersResponse {
    GradeAnswersResponse {
        overall_score: report.overall_score,
        rating_label: report.rating_label.label().to_string(),
        dimensions: report
            .dimensions
            .into_iter()
            .map(to_api_dimension)
            .collect(),
    }
}

fn to_api_dimension(report: DimensionScoreReport) -> DimensionScore {
    DimensionScore {
        dimension: report.dimension.label().to_string(),
        score: report.score,
        specificity_score: report.specificity_score,
        alignment_score: report.alignment_score,
        completeness_score: report.completeness_score,
        actionability_score: report.actionability_score,
        gaps: report.gaps,
        strengths: report.strengths,
        keywords_found: report.keywords_found,
        word_count: report.word_count,
    }
}

#[tool_handler]
impl ServerHandler for InsightServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "insight-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Insight scoring MCP server. Use rank_candidates to rank documents pulled \
                 from several content sources against a query, and grade_answers to score \
                 free-text answers to business validation questions. clear_result_cache drops \
                 cached results."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use insight_common::mcp_api::CandidateParam;
    use insight_common::store::MemoryStore;
    use serde_json::json;

    use super::*;

    fn server(exposure: Exposure) -> InsightServer {
        let cache = Arc::new(ResultCache::new(Arc::new(MemoryStore::new()), 60, exposure));
        InsightServer::new(RankingPipeline::default(), Grader::default(), cache, exposure)
    }

    fn candidate(id: &str, title: &str, content: &str, source: &str) -> CandidateParam {
        CandidateParam {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            properties: None,
            source_id: source.to_string(),
        }
    }

    fn rank_params() -> RankCandidatesParams {
        RankCandidatesParams {
            query: "AI fraud detection for payments".to_string(),
            candidates: vec![
                candidate(
                    "1",
                    "Zeta",
                    "Zeta builds AI fraud detection for card payments and merchant risk.",
                    "A",
                ),
                candidate("2", "Acme", "Acme sells office furniture to small businesses.", "A"),
                candidate("3", "Ledger", "Ledger offers payments reconciliation.", "B"),
            ],
            max_per_source: None,
            percentile: None,
            min_acceptable: None,
        }
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = InsightServer::tool_router().list_all();
        for name in ["rank_candidates", "grade_answers", "clear_result_cache"] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[tokio::test]
    async fn rank_candidates_redacts_and_caches() {
        let server = server(Exposure::Redacted);
        let Json(first) = server
            .rank_candidates(Parameters(rank_params()))
            .await
            .unwrap();
        assert_eq!(first.results.len(), 3);
        assert_eq!(first.results[0].id, "1");
        assert!(!first.cached);
        assert!(first.results.iter().all(|r| r.raw_score.is_none() && r.content.is_none()));

        let Json(second) = server
            .rank_candidates(Parameters(rank_params()))
            .await
            .unwrap();
        assert!(second.cached);
        assert_eq!(second.results.len(), first.results.len());

        let Json(cleared) = server.clear_result_cache().await.unwrap();
        assert!(cleared.cleared);
        let Json(third) = server
            .rank_candidates(Parameters(rank_params()))
            .await
            .unwrap();
        assert!(!third.cached);
    }

    #[tokio::test]
    async fn full_exposure_includes_diagnostics() {
        let server = server(Exposure::Full);
        let Json(response) = server
            .rank_candidates(Parameters(rank_params()))
            .await
            .unwrap();
        assert!(response.results.iter().all(|r| r.raw_score.is_some()));
        assert!(response.results.iter().all(|r| r.content.is_some()));
    }

    #[tokio::test]
    async fn invalid_overrides_are_rejected() {
        let mut params = rank_params();
        params.max_per_source = Some(0);
        let err = server(Exposure::Redacted)
            .rank_candidates(Parameters(params))
            .await
            .err()
            .unwrap();
        assert!(err.contains("max_per_source"), "{err}");
    }

    #[tokio::test]
    async fn grade_answers_reports_labels() {
        let params: GradeAnswersParams = serde_json::from_value(json!({
            "answers": { "go_to_market": "ok", "market_trends": "ok" },
            "context": { "industry": "fintech" }
        }))
        .unwrap();
        let Json(response) = server(Exposure::Redacted)
            .grade_answers(Parameters(params))
            .await
            .unwrap();
        assert_eq!(response.overall_score, 2.0);
        assert_eq!(response.rating_label, "needs_refinement");
        let dimensions: Vec<&str> = response
            .dimensions
            .iter()
            .map(|d| d.dimension.as_str())
            .collect();
        assert_eq!(dimensions, vec!["market_trends", "go_to_market"]);
        assert!(response.dimensions.iter().all(|d| d.word_count == 1));
        assert!(response.dimensions.iter().all(|d| d.keywords_found == 0));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dimensions"][0]["wordCount"], 1);
        assert_eq!(json["dimensions"][0]["keywordsFound"], 0);
    }

    #[tokio::test]
    async fn grade_answers_rejects_unknown_dimension() {
        let params = GradeAnswersParams {
            answers: BTreeMap::from([("team".to_string(), "Five engineers.".to_string())]),
            context: None,
        };
        let err = server(Exposure::Redacted)
            .grade_answers(Parameters(params))
            .await
            .err()
            .unwrap();
        assert!(err.contains("team"), "{err}");
    }
}

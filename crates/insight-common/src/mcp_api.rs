use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

// --- Ranking ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankCandidatesParams {
    /// Free-text query the candidates are ranked against.
    pub query: String,
    /// Documents fetched from the content sources.
    pub candidates: Vec<CandidateParam>,
    /// Maximum results kept per source (default from server configuration).
    pub max_per_source: Option<u32>,
    /// Percentile (0-100] used for the adaptive acceptance cutoff.
    pub percentile: Option<f64>,
    /// Lowest normalized score (0-100) a candidate may be accepted with.
    pub min_acceptable: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateParam {
    /// Document identifier. Numbers are accepted and kept as their decimal text.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// Free-form document properties. Anything other than an object is ignored.
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    pub source_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub id: String,
    pub title: String,
    pub normalized_score: f64,
    pub source_id: String,
    /// Present only with full exposure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<f64>,
    /// Present only with full exposure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankCandidatesResponse {
    pub results: Vec<RankedCandidate>,
    /// Score threshold applied by adaptive acceptance.
    pub cutoff: f64,
    /// True when too few candidates cleared the cutoff and the top ones were kept instead.
    pub fallback_applied: bool,
    /// True when the response was served from the result cache.
    #[serde(default)]
    pub cached: bool,
}

// --- Grading ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeAnswersParams {
    /// Answer text keyed by dimension label, e.g. "market_trends" or "go_to_market".
    pub answers: BTreeMap<String, String>,
    /// Optional context such as {"industry": "fintech"}.
    #[serde(default)]
    pub context: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub dimension: String,
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

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeAnswersResponse {
    pub overall_score: f64,
    pub rating_label: String,
    pub dimensions: Vec<DimensionScore>,
}

// --- Cache ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    /// False when the backing store could not complete the sweep.
    pub cleared: bool,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_accepted() {
        let params: RankCandidatesParams = serde_json::from_str(
            r#"{"query":"fraud","candidates":[{"id":1,"title":"Zeta","content":"x","sourceId":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(params.candidates[0].id, "1");
        assert!(params.candidates[0].properties.is_none());
        assert!(params.max_per_source.is_none());
    }

    #[test]
    fn redacted_fields_are_omitted() {
        let entry = RankedCandidate {
            id: "1".into(),
            title: "Zeta".into(),
            normalized_score: 88.0,
            source_id: "A".into(),
            raw_score: None,
            content: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("rawScore").is_none());
        assert_eq!(json["normalizedScore"], 88.0);
        assert_eq!(json["sourceId"], "A");
    }
}

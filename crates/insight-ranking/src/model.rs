use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scorer::priority_field_count;

/// Free-form document properties.
pub type Properties = serde_json::Map<String, Value>;

/// A document as handed over by a content source, before any scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateInput {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Anything other than a JSON object is treated as an empty property set.
    #[serde(default)]
    pub properties: Option<Value>,
    pub source_id: String,
}

/// One content item moving through a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub content: String,
    pub properties: Properties,
    pub source_id: String,
    /// Unnormalized relevance score, set by the scorer.
    pub raw_score: f64,
    /// Score rescaled per source into 0..=100, set by the normalizer.
    pub normalized_score: f64,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            properties: Properties::new(),
            source_id: source_id.into(),
            raw_score: 0.0,
            normalized_score: 0.0,
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Content length in characters.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn priority_fields(&self) -> usize {
        priority_field_count(&self.properties)
    }
}

impl From<CandidateInput> for Candidate {
    fn from(input: CandidateInput) -> Self {
        let properties = match input.properties {
            Some(Value::Object(map)) => map,
            _ => Properties::new(),
        };
        Candidate::new(input.id, input.title, input.content, input.source_id)
            .with_properties(properties)
    }
}

/// Final ranking of one run. `candidates` order is the rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub candidates: Vec<Candidate>,
    /// Score threshold used by adaptive acceptance.
    pub cutoff: f64,
    /// Whether acceptance fell back to the top candidates.
    pub fallback_applied: bool,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn entries(&self) -> Vec<RankedEntry> {
        self.candidates.iter().map(RankedEntry::from).collect()
    }
}

/// Output row of a ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub id: String,
    pub title: String,
    pub normalized_score: f64,
    pub source_id: String,
}

impl From<&Candidate> for RankedEntry {
    fn from(c: &Candidate) -> Self {
        Self {
            id: c.id.clone(),
            title: c.title.clone(),
            normalized_score: c.normalized_score,
            source_id: c.source_id.clone(),
        }
    }
}

/// A ranking request with optional per-request overrides of the pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingRequest {
    pub query: String,
    pub candidates: Vec<CandidateInput>,
    pub max_per_source: Option<usize>,
    pub percentile: Option<f64>,
    pub min_acceptable: Option<f64>,
}

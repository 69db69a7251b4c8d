/// Result cache for tool responses, backed by an injected [`KvStore`].
///
/// Lookups return `Option<T>`: a miss, an unavailable backend and an undecodable entry
/// all fall through to computing the result again.
///
/// Key schema:
/// - `ins:v1:rank:{sha256(exposure|request json)}` (TTL: configured)
/// - `ins:v1:grade:{sha256(exposure|request json)}` (TTL: configured)
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use insight_common::exposure::Exposure;
use insight_common::mcp_api::{
    GradeAnswersParams, GradeAnswersResponse, RankCandidatesParams, RankCandidatesResponse,
};
use insight_common::store::KvStore;

const KEY_PREFIX: &str = "ins:v1:";

pub struct ResultCache {
    store: Arc<dyn KvStore>,
    ttl_secs: u64,
    exposure: Exposure,
}

impl ResultCache {
    /// `ttl_secs == 0` turns the cache into a no-op.
    pub fn new(store: Arc<dyn KvStore>, ttl_secs: u64, exposure: Exposure) -> Self {
        Self {
            store,
            ttl_secs,
            exposure,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl_secs > 0
    }

    // --- Ranking ---

    pub async fn get_ranking(&self, params: &RankCandidatesParams) -> Option<RankCandidatesResponse> {
        let key = self.key("rank", params)?;
        self.get(&key).await
    }

    pub async fn set_ranking(&self, params: &RankCandidatesParams, response: &RankCandidatesResponse) {
        if let Some(key) = self.key("rank", params) {
            self.set(&key, response).await;
        }
    }

    // --- Grading ---

    pub async fn get_grading(&self, params: &GradeAnswersParams) -> Option<GradeAnswersResponse> {
        let key = self.key("grade", params)?;
        self.get(&key).await
    }

    pub async fn set_grading(&self, params: &GradeAnswersParams, response: &GradeAnswersResponse) {
        if let Some(key) = self.key("grade", params) {
            self.set(&key, response).await;
        }
    }

    // --- Invalidation ---

    /// Delete every cached result. Uses SCAN-based prefix deletion on Redis.
    pub async fn invalidate_all(&self) -> bool {
        self.store.delete_by_prefix(KEY_PREFIX).await
    }

    fn key(&self, kind: &str, request: &impl Serialize) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        let json = serde_json::to_string(request)
            .inspect_err(|e| warn!(error = %e, kind, "cache key serialization failed"))
            .ok()?;
        Some(request_key(kind, self.exposure, &json))
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.store.get(key).await?;
        debug!(key, "result cache hit");
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    async fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.store.set_with_ttl(key, &json, self.ttl_secs).await;
        }
    }
}

/// Deterministic cache key for a serialized request using SHA-256.
fn request_key(kind: &str, exposure: Exposure, request_json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(exposure.to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(request_json.as_bytes());
    let hash = hasher.finalize();
    format!("{KEY_PREFIX}{kind}:{:x}", hash)
}

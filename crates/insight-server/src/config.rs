use insight_common::env;
use insight_common::exposure::Exposure;
use insight_grading::{GradingConfig, GradingWeights};
use insight_ranking::config::{DEFAULT_MAX_PER_SOURCE, DEFAULT_MIN_ACCEPTABLE, DEFAULT_PERCENTILE};
use insight_ranking::normalize::NORMALIZATION_FLOOR;
use insight_ranking::scorer::ScorerKind;
use insight_ranking::RankingConfig;

use crate::error::AppError;

pub const DEFAULT_RESULT_CACHE_TTL_SECS: u64 = 600;

/// Server configuration loaded explicitly from environment variables.
///
/// Everything is optional. Redis is used only when `REDIS_URL` is set; otherwise
/// results are cached in process memory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379").
    pub redis_url: Option<String>,
    /// Lifetime of cached tool results. `0` disables the result cache.
    pub result_cache_ttl_secs: u64,
    pub exposure: Exposure,
    pub ranking: RankingConfig,
    pub grading: GradingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `REDIS_URL`: Redis connection string
    /// - `RESULT_CACHE_TTL_SECS`: result cache lifetime (default 600)
    /// - `INSIGHT_EXPOSURE`: `full` or `redacted` (default `redacted`)
    /// - `RANKING_PERCENTILE`, `RANKING_MIN_ACCEPTABLE`, `RANKING_MAX_PER_SOURCE`,
    ///   `RANKING_NORMALIZATION_FLOOR`, `RANKING_SCORER` (`lexical` or `saturating`)
    /// - `GRADING_WEIGHTS`: four comma-separated weights for specificity, alignment,
    ///   completeness and actionability, summing to 1.0
    pub fn from_env() -> Result<Self, AppError> {
        let redis_url = env::optional::<String>("REDIS_URL")?;
        let result_cache_ttl_secs =
            env::or_default("RESULT_CACHE_TTL_SECS", DEFAULT_RESULT_CACHE_TTL_SECS)?;
        let exposure = env::or_default("INSIGHT_EXPOSURE", Exposure::default())?;

        let ranking = RankingConfig {
            percentile: env::or_default("RANKING_PERCENTILE", DEFAULT_PERCENTILE)?,
            min_acceptable: env::or_default("RANKING_MIN_ACCEPTABLE", DEFAULT_MIN_ACCEPTABLE)?,
            max_per_source: env::or_default("RANKING_MAX_PER_SOURCE", DEFAULT_MAX_PER_SOURCE)?,
            normalization_floor: env::or_default(
                "RANKING_NORMALIZATION_FLOOR",
                NORMALIZATION_FLOOR,
            )?,
            scorer: env::or_default("RANKING_SCORER", ScorerKind::default())?,
        };
        ranking.validate()?;

        let grading = GradingConfig {
            weights: env::or_default("GRADING_WEIGHTS", GradingWeights::default())?,
            ..GradingConfig::default()
        };
        grading.validate()?;

        let config = Self {
            redis_url,
            result_cache_ttl_secs,
            exposure,
            ranking,
            grading,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if let Some(url) = &self.redis_url {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(AppError::Config(format!(
                    "REDIS_URL must start with redis:// or rediss://, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            result_cache_ttl_secs: DEFAULT_RESULT_CACHE_TTL_SECS,
            exposure: Exposure::default(),
            ranking: RankingConfig::default(),
            grading: GradingConfig::default(),
        }
    }
}

/// Error types shared across the insight crates.
///
/// These represent failures in infrastructure and configuration that are common to more
/// than one crate. Scoring crates define their own errors; the server wraps everything
/// via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("invalid value for {var}: {message}")]
    InvalidEnv { var: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

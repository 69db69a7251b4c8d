#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    #[error("grading weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("invalid grading weight for {axis}: {value}")]
    InvalidWeight { axis: &'static str, value: f64 },

    #[error("invalid grading config: {0}")]
    InvalidConfig(String),

    #[error("unknown dimension: '{0}'")]
    UnknownDimension(String),
}

use insight_common::error::CommonError;
use insight_grading::GradingError;
use insight_ranking::RankingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Grading(#[from] GradingError),

    #[error("config error: {0}")]
    Config(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Employee record has no department")]
    MissingDepartment,

    #[error("Invalid month key '{month_key}': expected YYYY-MM")]
    InvalidMonthKey { month_key: String },

    #[error("Invalid submission timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("Service '{service}' has non-positive weight {weight}")]
    InvalidWeight { service: String, weight: f64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Pipeline-level errors
///
/// Transport and API errors are fatal to the run: no retry, no partial result.
/// Resolution gaps (unmatched SKUIDs, unknown product names) are deliberately
/// not modeled as errors; they are counted and returned alongside results so
/// callers can observe the data loss.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store API error: {0}")]
    Api(String),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type AppResult<T> = Result<T, AppError>;

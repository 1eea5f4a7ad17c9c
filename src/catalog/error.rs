use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a catalog request, split by what a caller can do about it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The service reported the resource as absent (4xx other than 408
    /// and 429).
    #[error("product not found (status {0})")]
    NotFound(StatusCode),
    /// Transport failure, 5xx, 408 or 429. Retrying later may succeed.
    #[error("catalog unavailable: {0}")]
    Transient(String),
    /// A 2xx response whose body could not be used.
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),
    /// The request could not be built from the given arguments.
    #[error("invalid catalog request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Classifies a non-success status.
    pub(crate) fn from_status(status: StatusCode) -> Self {
        let retryable = matches!(
            status,
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
        );
        if status.is_client_error() && !retryable {
            Self::NotFound(status)
        } else {
            Self::Transient(format!("upstream answered {status}"))
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status)
        } else {
            Self::Transient(err.to_string())
        }
    }
}

//! Error types for apod-fetch.

use thiserror::Error;

use crate::data::ImageRecord;

/// Every failure the pipeline can surface to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("date range spans {days} days; choose a range of {max} days or fewer")]
    RangeTooLarge { days: i64, max: i64 },

    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        attempts: u32,
    },

    #[error("network error after {attempts} attempt(s): {message}")]
    Transport { message: String, attempts: u32 },

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected response format: {0}")]
    MalformedResponse(String),

    #[error("no items found in the mirror for that date range")]
    NoResultsInRange,

    #[error("no image items found in the data")]
    NoImagesFound,

    #[error("cancelled")]
    Cancelled { attempts: u32 },
}

/// Fieldless classification of a [`FetchError`], for callers that branch on
/// the kind of failure rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RangeTooLarge,
    InvalidDate,
    InvalidConfig,
    HttpError,
    TransportError,
    ApiError,
    MalformedResponse,
    NoResultsInRange,
    NoImagesFound,
    Cancelled,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::RangeTooLarge { .. } => ErrorKind::RangeTooLarge,
            FetchError::InvalidDate { .. } => ErrorKind::InvalidDate,
            FetchError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            FetchError::Http { .. } => ErrorKind::HttpError,
            FetchError::Transport { .. } => ErrorKind::TransportError,
            FetchError::Api(_) => ErrorKind::ApiError,
            FetchError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            FetchError::NoResultsInRange => ErrorKind::NoResultsInRange,
            FetchError::NoImagesFound => ErrorKind::NoImagesFound,
            FetchError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// Attempts made by the fetch leg that produced this error; zero for
    /// errors raised outside the fetcher.
    pub fn attempts(&self) -> u32 {
        match self {
            FetchError::Http { attempts, .. }
            | FetchError::Transport { attempts, .. }
            | FetchError::Cancelled { attempts } => *attempts,
            _ => 0,
        }
    }

    /// Whether a presentation layer should offer a manual "try again".
    ///
    /// Only fetch-class failures qualify; validation, payload and filtering
    /// errors would fail the same way on a rerun.
    pub fn offers_retry(&self) -> bool {
        matches!(self.kind(), ErrorKind::HttpError | ErrorKind::TransportError)
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }

    pub(crate) fn with_attempts(self, attempts: u32) -> Self {
        match self {
            FetchError::Http {
                status, message, ..
            } => FetchError::Http {
                status,
                message,
                attempts,
            },
            FetchError::Transport { message, .. } => FetchError::Transport { message, attempts },
            FetchError::Cancelled { .. } => FetchError::Cancelled { attempts },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Result of one full pipeline run.
pub type FetchOutcome = Result<Vec<ImageRecord>>;

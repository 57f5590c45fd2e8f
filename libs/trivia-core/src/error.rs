//! Error types for trivia-core.

use thiserror::Error;

use crate::response::ResponseCode;
use crate::session::{SessionStatus, Transition};

/// Errors that can occur while fetching a batch of questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("no data received")]
    NoData,

    #[error("parsing error: {0}")]
    ParsingError(String),

    #[error("api error: response code {0}")]
    ApiError(i64),
}

impl FetchError {
    /// Message shown to the player, paired with a retry option.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(_) => "Invalid URL. Please try again.".to_string(),
            Self::NetworkError(detail) => format!("Network error: {}", detail),
            Self::NoData => "No data received. Please try again.".to_string(),
            Self::ParsingError(detail) => format!("Error processing data: {}", detail),
            Self::ApiError(code) => {
                let reason = match ResponseCode::from_code(*code) {
                    Some(ResponseCode::NoResults) => {
                        "No results found for these settings. Try different options."
                    }
                    Some(ResponseCode::InvalidParameter) => "Invalid parameter.",
                    Some(ResponseCode::RateLimit) => {
                        "Too many requests. Wait a few seconds and try again."
                    }
                    _ => "Please try again.",
                };
                format!("API error. {}", reason)
            }
        }
    }

    /// Whether the failure came from the API rejecting the filters.
    pub fn is_no_results(&self) -> bool {
        matches!(self, Self::ApiError(code) if *code == ResponseCode::NoResults.code())
    }
}

/// Errors raised by the session state machine on caller misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while session is {status} (answer locked: {answer_locked})")]
    InvalidTransition {
        action: Transition,
        status: SessionStatus,
        answer_locked: bool,
    },
}

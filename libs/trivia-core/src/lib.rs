//! Core trivia engine shared by the game clients.
//!
//! Provides:
//! - HTML entity decoding for question text
//! - Trivia API response parsing and validation
//! - The question session state machine (answer / reveal / advance)
//! - Answer shuffling for presentation
//! - Shared types (TriviaQuestion, GameSettings, Difficulty, etc.)

pub mod entities;
pub mod error;
pub mod response;
pub mod session;
pub mod shuffle;
pub mod types;

pub use entities::decode;
pub use error::{FetchError, SessionError};
pub use response::{parse_response, ParsedBatch, ResponseCode};
pub use session::{AnswerOutcome, Position, Session, SessionState, SessionStatus, Transition};
pub use shuffle::{present, present_with};
pub use types::{
    category_name, Category, Difficulty, GameSettings, QuestionKind, Score, TriviaQuestion,
    CATEGORIES,
};

/// Result type returned by a question fetch.
pub type FetchResult = std::result::Result<Vec<TriviaQuestion>, FetchError>;

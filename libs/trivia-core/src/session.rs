//! Question session state machine.
//!
//! A session steps through a fixed list of questions:
//!
//! ```text
//! Empty --load(non-empty)--> Active --submit/advance...--> Finished
//!                              ^                              |
//!                              +-------reset_to_start---------+
//! ```
//!
//! Each question goes through submit (locks the answer) and advance (moves
//! on and unlocks). A second submit before advancing is rejected, so a
//! question can only be scored once.

use std::fmt;

use crate::error::SessionError;
use crate::types::{Score, TriviaQuestion};

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No questions loaded.
    Empty,
    /// Questions loaded and at least one still to answer.
    Active,
    /// Every question has been answered and advanced past.
    Finished,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Active => "active",
            Self::Finished => "finished",
        })
    }
}

/// Operations that can be rejected as invalid transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SubmitAnswer,
    Advance,
    ResetToStart,
    CurrentQuestion,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SubmitAnswer => "submit an answer",
            Self::Advance => "advance",
            Self::ResetToStart => "reset to start",
            Self::CurrentQuestion => "read the current question",
        })
    }
}

/// Result of submitting an answer to the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    /// Correct answer text, so it can be highlighted either way.
    pub correct_answer: String,
    pub submitted: String,
}

/// One-based position of the current question, e.g. "Question: 3/10".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub number: usize,
    pub total: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question: {}/{}", self.number, self.total)
    }
}

/// Mutable state owned by a [`Session`].
///
/// Invariant: `current_index <= questions.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    questions: Vec<TriviaQuestion>,
    current_index: usize,
    correct_count: usize,
    answer_locked: bool,
}

impl SessionState {
    pub fn questions(&self) -> &[TriviaQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn answer_locked(&self) -> bool {
        self.answer_locked
    }

    fn rewind(&mut self) {
        self.current_index = 0;
        self.correct_count = 0;
        self.answer_locked = false;
    }
}

/// State machine for one run through a list of questions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already loaded with `questions`.
    pub fn with_questions(questions: Vec<TriviaQuestion>) -> Self {
        let mut session = Self::new();
        session.load(questions);
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        if self.state.questions.is_empty() {
            SessionStatus::Empty
        } else if self.state.current_index < self.state.questions.len() {
            SessionStatus::Active
        } else {
            SessionStatus::Finished
        }
    }

    /// Replace the question list and start from the first question.
    ///
    /// Valid from any state.
    pub fn load(&mut self, questions: Vec<TriviaQuestion>) -> SessionStatus {
        self.state.questions = questions;
        self.state.rewind();
        self.status()
    }

    /// Score the answer for the current question and lock it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is active
    /// and the current question has not been answered yet.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, SessionError> {
        if self.status() != SessionStatus::Active || self.state.answer_locked {
            return Err(self.invalid(Transition::SubmitAnswer));
        }

        self.state.answer_locked = true;
        let correct_answer = &self.state.questions[self.state.current_index].correct_answer;
        let is_correct = answer == correct_answer.as_str();
        if is_correct {
            self.state.correct_count += 1;
        }

        Ok(AnswerOutcome {
            is_correct,
            correct_answer: correct_answer.clone(),
            submitted: answer.to_string(),
        })
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if the current question has
    /// not been answered.
    pub fn advance(&mut self) -> Result<SessionStatus, SessionError> {
        if !self.state.answer_locked {
            return Err(self.invalid(Transition::Advance));
        }

        self.state.current_index += 1;
        self.state.answer_locked = false;
        Ok(self.status())
    }

    /// Restart the same questions with the score cleared.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` on an empty session.
    pub fn reset_to_start(&mut self) -> Result<SessionStatus, SessionError> {
        if self.status() == SessionStatus::Empty {
            return Err(self.invalid(Transition::ResetToStart));
        }

        self.state.rewind();
        Ok(self.status())
    }

    /// The question currently being asked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is active.
    pub fn current_question(&self) -> Result<&TriviaQuestion, SessionError> {
        if self.status() != SessionStatus::Active {
            return Err(self.invalid(Transition::CurrentQuestion));
        }
        Ok(&self.state.questions[self.state.current_index])
    }

    /// Position label for the current question, if active.
    pub fn position(&self) -> Option<Position> {
        (self.status() == SessionStatus::Active).then(|| Position {
            number: self.state.current_index + 1,
            total: self.state.questions.len(),
        })
    }

    pub fn score(&self) -> Score {
        Score::new(self.state.correct_count, self.state.questions.len())
    }

    pub fn is_finished(&self) -> bool {
        self.status() == SessionStatus::Finished
    }

    fn invalid(&self, action: Transition) -> SessionError {
        SessionError::InvalidTransition {
            action,
            status: self.status(),
            answer_locked: self.state.answer_locked,
        }
    }
}

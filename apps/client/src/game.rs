//! Game controller tying the fetcher to a question session.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use trivia_core::{
    present, AnswerOutcome, Difficulty, FetchError, GameSettings, Position, Score, Session,
    SessionError, SessionStatus, Transition,
};

use crate::fetcher::QuestionFetcher;

/// Result of a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The session was replaced with `count` fetched questions.
    Loaded { status: SessionStatus, count: usize },
    /// A newer fetch was started while this one was in flight; its result
    /// was discarded.
    Superseded,
}

/// A question ready to show, with answers in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub position: Position,
    pub category: String,
    pub question: String,
    pub difficulty: Option<Difficulty>,
    pub answers: Vec<String>,
}

struct GameState {
    settings: GameSettings,
    session: Session,
    loading: bool,
    generation: u64,
}

/// Inner state shared across clones.
struct GameInner {
    fetcher: QuestionFetcher,
    state: Mutex<GameState>,
}

/// Trivia game: settings, the current session, and fetch bookkeeping.
///
/// Clone-able because all state lives behind one `Arc`. Every transition
/// takes the same lock; the lock is never held while a fetch is in flight.
#[derive(Clone)]
pub struct Game {
    inner: Arc<GameInner>,
}

impl Game {
    pub fn new(fetcher: QuestionFetcher) -> Self {
        Self::with_settings(fetcher, GameSettings::default())
    }

    pub fn with_settings(fetcher: QuestionFetcher, settings: GameSettings) -> Self {
        Self {
            inner: Arc::new(GameInner {
                fetcher,
                state: Mutex::new(GameState {
                    settings,
                    session: Session::new(),
                    loading: false,
                    generation: 0,
                }),
            }),
        }
    }

    pub async fn settings(&self) -> GameSettings {
        self.inner.state.lock().await.settings
    }

    /// Change the filters used by the next fetch.
    pub async fn set_settings(&self, settings: GameSettings) {
        debug!(?settings, "settings changed");
        self.inner.state.lock().await.settings = settings;
    }

    /// Whether a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.inner.state.lock().await.loading
    }

    /// Fetch a new batch with the current settings and load it.
    ///
    /// Used for a new game, "Play Again" and retry after an error. If another
    /// fetch starts before this one completes, this result is discarded.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` of the latest fetch. The previous session is
    /// left untouched on error.
    pub async fn new_game(&self) -> Result<LoadOutcome, FetchError> {
        let (generation, settings) = {
            let mut state = self.inner.state.lock().await;
            state.generation += 1;
            state.loading = true;
            (state.generation, state.settings)
        };

        let result = self.inner.fetcher.fetch(&settings).await;

        let mut state = self.inner.state.lock().await;
        if state.generation != generation {
            warn!(generation, latest = state.generation, "discarding stale fetch result");
            return Ok(LoadOutcome::Superseded);
        }
        state.loading = false;

        let questions = result?;
        let count = questions.len();
        let status = state.session.load(questions);
        info!(count, %status, "session loaded");

        Ok(LoadOutcome::Loaded { status, count })
    }

    /// The current question with freshly shuffled answers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is active.
    pub async fn present_current(&self) -> Result<PresentedQuestion, SessionError> {
        let state = self.inner.state.lock().await;
        let session = &state.session;
        let question = session.current_question()?;
        let position = session
            .position()
            .ok_or(SessionError::InvalidTransition {
                action: Transition::CurrentQuestion,
                status: session.status(),
                answer_locked: session.state().answer_locked(),
            })?;

        Ok(PresentedQuestion {
            position,
            category: question.category.clone(),
            question: question.question.clone(),
            difficulty: question.difficulty,
            answers: present(question),
        })
    }

    /// Score `answer` against the current question.
    ///
    /// # Errors
    ///
    /// See [`Session::submit_answer`].
    pub async fn submit_answer(&self, answer: &str) -> Result<AnswerOutcome, SessionError> {
        let mut state = self.inner.state.lock().await;
        let outcome = state.session.submit_answer(answer)?;
        debug!(correct = outcome.is_correct, "answer submitted");
        Ok(outcome)
    }

    /// Move on to the next question.
    ///
    /// # Errors
    ///
    /// See [`Session::advance`].
    pub async fn advance(&self) -> Result<SessionStatus, SessionError> {
        let mut state = self.inner.state.lock().await;
        let status = state.session.advance()?;
        if status == SessionStatus::Finished {
            info!(score = %state.session.score(), "session finished");
        }
        Ok(status)
    }

    /// Replay the same questions with the score cleared.
    ///
    /// # Errors
    ///
    /// See [`Session::reset_to_start`].
    pub async fn reset_to_start(&self) -> Result<SessionStatus, SessionError> {
        let mut state = self.inner.state.lock().await;
        state.session.reset_to_start()
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.state.lock().await.session.status()
    }

    pub async fn score(&self) -> Score {
        self.inner.state.lock().await.session.score()
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.inner.state.lock().await.session.clone()
    }
}

//! Core types for the trivia game.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::decode;

/// Question difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Query parameter value used by the trivia API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from the API value.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Display name for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Question format reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

impl QuestionKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "multiple" => Some(Self::Multiple),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// A decoded trivia question.
///
/// All text is already HTML-entity-decoded. `incorrect_answers` never
/// contains `correct_answer`. Deserializing goes through
/// [`TriviaQuestion::new`] so both hold for stored questions too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuestionRecord")]
pub struct TriviaQuestion {
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<QuestionKind>,
}

impl TriviaQuestion {
    /// Create a question from decoded text, dropping any incorrect answer
    /// equal to the correct one.
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        let correct_answer = correct_answer.into();
        let incorrect_answers = incorrect_answers
            .into_iter()
            .filter(|answer| *answer != correct_answer)
            .collect();

        Self {
            category: category.into(),
            question: question.into(),
            correct_answer,
            incorrect_answers,
            difficulty: None,
            kind: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_kind(mut self, kind: Option<QuestionKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Number of answers offered when the question is presented.
    pub fn answer_count(&self) -> usize {
        1 + self.incorrect_answers.len()
    }
}

/// Serialized form of a question, normalized on the way in.
#[derive(Deserialize)]
struct QuestionRecord {
    category: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    kind: Option<QuestionKind>,
}

impl From<QuestionRecord> for TriviaQuestion {
    fn from(record: QuestionRecord) -> Self {
        TriviaQuestion::new(
            decode(&record.category),
            decode(&record.question),
            decode(&record.correct_answer),
            record.incorrect_answers.iter().map(|a| decode(a)).collect(),
        )
        .with_difficulty(record.difficulty)
        .with_kind(record.kind)
    }
}

/// Trivia category offered in the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: Option<u32>,
    pub name: &'static str,
}

/// Categories offered by the game. `None` means any category.
pub const CATEGORIES: &[Category] = &[
    Category { id: None, name: "Any Category" },
    Category { id: Some(9), name: "General Knowledge" },
    Category { id: Some(10), name: "Entertainment: Books" },
    Category { id: Some(11), name: "Entertainment: Film" },
    Category { id: Some(12), name: "Entertainment: Music" },
    Category { id: Some(14), name: "Entertainment: Television" },
    Category { id: Some(17), name: "Science & Nature" },
    Category { id: Some(18), name: "Science: Computers" },
    Category { id: Some(19), name: "Science: Mathematics" },
    Category { id: Some(21), name: "Sports" },
    Category { id: Some(22), name: "Geography" },
    Category { id: Some(23), name: "History" },
];

/// Resolve a category id to its display name.
pub fn category_name(id: Option<u32>) -> String {
    CATEGORIES
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| match id {
            Some(id) => format!("Category #{}", id),
            None => "Any Category".to_string(),
        })
}

/// Filters applied to the next fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl GameSettings {
    pub fn new(category_id: Option<u32>, difficulty: Option<Difficulty>) -> Self {
        Self {
            category_id,
            difficulty,
        }
    }

    pub fn category_name(&self) -> String {
        category_name(self.category_id)
    }

    pub fn difficulty_name(&self) -> &'static str {
        self.difficulty.map_or("Any Difficulty", |d| d.label())
    }

    /// Human-readable summary used to confirm a settings change.
    pub fn describe(&self) -> String {
        format!(
            "Category: {}\nDifficulty: {}",
            self.category_name(),
            self.difficulty_name()
        )
    }
}

/// Correct answers out of the questions in the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }
}

impl From<Score> for (usize, usize) {
    fn from(score: Score) -> Self {
        (score.correct, score.total)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

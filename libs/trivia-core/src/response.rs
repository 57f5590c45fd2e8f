//! Trivia API response parsing.
//!
//! # Format
//! ```json
//! {
//!   "response_code": 0,
//!   "results": [
//!     {
//!       "category": "Science: Computers",
//!       "type": "multiple",
//!       "difficulty": "easy",
//!       "question": "What does CPU stand for?",
//!       "correct_answer": "Central Processing Unit",
//!       "incorrect_answers": ["Central Process Unit", "Computer Personal Unit"]
//!     }
//!   ]
//! }
//! ```
//!
//! Entries missing a required field are dropped; the rest of the batch is
//! still returned.

use serde::Deserialize;
use serde_json::Value;

use crate::entities::decode;
use crate::error::FetchError;
use crate::types::{Difficulty, QuestionKind, TriviaQuestion};

/// Response codes reported by the trivia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    NoResults,
    InvalidParameter,
    TokenNotFound,
    TokenEmpty,
    RateLimit,
}

impl ResponseCode {
    pub fn code(self) -> i64 {
        match self {
            Self::Success => 0,
            Self::NoResults => 1,
            Self::InvalidParameter => 2,
            Self::TokenNotFound => 3,
            Self::TokenEmpty => 4,
            Self::RateLimit => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::NoResults),
            2 => Some(Self::InvalidParameter),
            3 => Some(Self::TokenNotFound),
            4 => Some(Self::TokenEmpty),
            5 => Some(Self::RateLimit),
            _ => None,
        }
    }
}

/// Questions decoded from one response, plus how many entries were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBatch {
    pub questions: Vec<TriviaQuestion>,
    pub dropped: usize,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response_code: i64,
    #[serde(default)]
    results: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    category: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    difficulty: Option<Value>,
}

impl RawResult {
    fn into_question(self) -> TriviaQuestion {
        let difficulty = self
            .difficulty
            .as_ref()
            .and_then(Value::as_str)
            .and_then(Difficulty::from_str);
        let kind = self
            .kind
            .as_ref()
            .and_then(Value::as_str)
            .and_then(QuestionKind::from_str);

        TriviaQuestion::new(
            decode(&self.category),
            decode(&self.question),
            decode(&self.correct_answer),
            self.incorrect_answers.iter().map(|a| decode(a)).collect(),
        )
        .with_difficulty(difficulty)
        .with_kind(kind)
    }
}

/// Parse a raw response body into decoded questions.
pub fn parse_response(body: &[u8]) -> Result<ParsedBatch, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::NoData);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::ParsingError(e.to_string()))?;

    if !value.is_object() {
        return Err(FetchError::ParsingError(
            "response is not a JSON object".to_string(),
        ));
    }

    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|_| FetchError::ParsingError("missing response code".to_string()))?;

    if envelope.response_code != ResponseCode::Success.code() {
        return Err(FetchError::ApiError(envelope.response_code));
    }

    let entries = match envelope.results {
        Some(Value::Array(entries)) => entries,
        _ => return Err(FetchError::ParsingError("no results found".to_string())),
    };

    if !entries.iter().all(Value::is_object) {
        return Err(FetchError::ParsingError(
            "results contain a non-object entry".to_string(),
        ));
    }

    let total = entries.len();
    let questions: Vec<TriviaQuestion> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawResult>(entry).ok())
        .map(RawResult::into_question)
        .collect();

    Ok(ParsedBatch {
        dropped: total - questions.len(),
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry(question: &str) -> Value {
        json!({
            "category": "General Knowledge",
            "type": "multiple",
            "difficulty": "easy",
            "question": question,
            "correct_answer": "Right",
            "incorrect_answers": ["Wrong 1", "Wrong 2", "Wrong 3"]
        })
    }

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn parse_valid_response() {
        let input = body(json!({
            "response_code": 0,
            "results": [entry("Q1"), entry("Q2")]
        }));
        let batch = parse_response(&input).unwrap();
        assert_eq!(batch.questions.len(), 2);
        assert_eq!(batch.dropped, 0);
        assert_eq!(batch.questions[0].question, "Q1");
        assert_eq!(batch.questions[0].correct_answer, "Right");
        assert_eq!(
            batch.questions[0].incorrect_answers,
            vec!["Wrong 1", "Wrong 2", "Wrong 3"]
        );
        assert_eq!(batch.questions[0].difficulty, Some(Difficulty::Easy));
        assert_eq!(batch.questions[0].kind, Some(QuestionKind::Multiple));
    }

    #[test]
    fn parse_decodes_every_text_field() {
        let input = body(json!({
            "response_code": 0,
            "results": [{
                "category": "Entertainment: Music",
                "question": "Who sang &quot;Don&#039;t Stop Me Now&quot;?",
                "correct_answer": "Queen &amp; friends",
                "incorrect_answers": ["Mot&ouml;rhead", "Beyonc&eacute;"]
            }]
        }));
        let batch = parse_response(&input).unwrap();
        let question = &batch.questions[0];
        assert_eq!(question.question, "Who sang \"Don't Stop Me Now\"?");
        assert_eq!(question.correct_answer, "Queen & friends");
        assert_eq!(question.incorrect_answers, vec!["Motörhead", "Beyoncé"]);
        assert_eq!(question.difficulty, None);
        assert_eq!(question.kind, None);
    }

    #[test]
    fn drop_entries_missing_required_fields() {
        let input = body(json!({
            "response_code": 0,
            "results": [
                entry("Kept 1"),
                { "category": "x", "question": "no correct", "incorrect_answers": [] },
                {
                    "category": "x",
                    "question": "bad list",
                    "correct_answer": "a",
                    "incorrect_answers": "b"
                },
                { "question": "no category", "correct_answer": "a", "incorrect_answers": [] },
                { "category": "x", "question": 42, "correct_answer": "a", "incorrect_answers": [] },
                entry("Kept 2")
            ]
        }));
        let batch = parse_response(&input).unwrap();
        let texts: Vec<&str> = batch.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["Kept 1", "Kept 2"]);
        assert_eq!(batch.dropped, 4);
    }

    #[test]
    fn unknown_metadata_does_not_drop_entry() {
        let mut raw = entry("Q");
        raw["difficulty"] = json!("impossible");
        raw["type"] = json!(7);
        let input = body(json!({ "response_code": 0, "results": [raw] }));
        let batch = parse_response(&input).unwrap();
        assert_eq!(batch.questions.len(), 1);
        assert_eq!(batch.questions[0].difficulty, None);
        assert_eq!(batch.questions[0].kind, None);
    }

    #[test]
    fn empty_results_is_success() {
        let input = body(json!({ "response_code": 0, "results": [] }));
        let batch = parse_response(&input).unwrap();
        assert!(batch.questions.is_empty());
    }

    #[test]
    fn reject_non_zero_response_code() {
        let input = br#"{"response_code": 1, "results": []}"#;
        assert_eq!(parse_response(input), Err(FetchError::ApiError(1)));

        let input = br#"{"response_code": 2}"#;
        assert_eq!(parse_response(input), Err(FetchError::ApiError(2)));
    }

    #[test]
    fn reject_malformed_body() {
        let result = parse_response(b"<html>Service Unavailable</html>");
        assert!(matches!(result, Err(FetchError::ParsingError(_))));

        let result = parse_response(b"[1, 2, 3]");
        assert!(matches!(result, Err(FetchError::ParsingError(_))));
    }

    #[test]
    fn reject_missing_response_code() {
        let result = parse_response(br#"{"results": []}"#);
        assert_eq!(
            result,
            Err(FetchError::ParsingError("missing response code".to_string()))
        );

        let result = parse_response(br#"{"response_code": "0", "results": []}"#);
        assert!(matches!(result, Err(FetchError::ParsingError(_))));
    }

    #[test]
    fn reject_missing_or_malformed_results() {
        let result = parse_response(br#"{"response_code": 0}"#);
        assert!(matches!(result, Err(FetchError::ParsingError(_))));

        let result = parse_response(br#"{"response_code": 0, "results": {"a": 1}}"#);
        assert!(matches!(result, Err(FetchError::ParsingError(_))));

        let result = parse_response(br#"{"response_code": 0, "results": [1]}"#);
        assert!(matches!(result, Err(FetchError::ParsingError(_))));
    }

    #[test]
    fn empty_body_is_no_data() {
        assert_eq!(parse_response(b""), Err(FetchError::NoData));
        assert_eq!(parse_response(b"  \n"), Err(FetchError::NoData));
    }

    #[test]
    fn response_code_mapping() {
        assert_eq!(ResponseCode::from_code(0), Some(ResponseCode::Success));
        assert_eq!(ResponseCode::from_code(5), Some(ResponseCode::RateLimit));
        assert_eq!(ResponseCode::from_code(42), None);
        assert_eq!(ResponseCode::NoResults.code(), 1);
    }
}

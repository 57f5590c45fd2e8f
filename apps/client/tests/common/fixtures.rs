//! Canned trivia API response bodies.

use serde_json::json;

/// A successful response with `count` multiple-choice questions.
///
/// Question `n` has correct answer "Answer n" and three wrong answers.
pub fn questions(count: usize) -> String {
    let results: Vec<_> = (1..=count)
        .map(|n| {
            json!({
                "category": "General Knowledge",
                "type": "multiple",
                "difficulty": "easy",
                "question": format!("Question {}?", n),
                "correct_answer": format!("Answer {}", n),
                "incorrect_answers": [
                    format!("Wrong {}a", n),
                    format!("Wrong {}b", n),
                    format!("Wrong {}c", n)
                ]
            })
        })
        .collect();

    json!({ "response_code": 0, "results": results }).to_string()
}

/// Entity-encoded text the way the API actually sends it.
pub fn encoded_question() -> String {
    json!({
        "response_code": 0,
        "results": [{
            "category": "Entertainment: Film",
            "type": "multiple",
            "difficulty": "medium",
            "question": "Who directed &quot;Schindler&#039;s List&quot;?",
            "correct_answer": "Steven Spielberg",
            "incorrect_answers": ["Martin Scorsese", "Fran&ccedil;ois Truffaut", "Ridley Scott"]
        }]
    })
    .to_string()
}

/// One complete entry between two that are missing required fields.
pub fn partially_valid() -> String {
    json!({
        "response_code": 0,
        "results": [
            {"category": "History", "question": "No answers?"},
            {
                "category": "History",
                "type": "boolean",
                "difficulty": "hard",
                "question": "The Roman Empire fell in 476 AD.",
                "correct_answer": "True",
                "incorrect_answers": ["False"]
            },
            {"question": "No category?", "correct_answer": "x", "incorrect_answers": []}
        ]
    })
    .to_string()
}

pub fn api_error(code: i64) -> String {
    json!({ "response_code": code, "results": [] }).to_string()
}

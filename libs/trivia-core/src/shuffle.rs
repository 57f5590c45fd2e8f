//! Answer ordering for presenting a question.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::TriviaQuestion;

/// Correct and incorrect answers in a fresh random order.
///
/// Call this every time the question is shown; the order is never cached.
pub fn present(question: &TriviaQuestion) -> Vec<String> {
    present_with(question, &mut rand::rng())
}

/// Like [`present`], drawing randomness from `rng`.
pub fn present_with<R: Rng + ?Sized>(question: &TriviaQuestion, rng: &mut R) -> Vec<String> {
    let mut answers = Vec::with_capacity(question.answer_count());
    answers.push(question.correct_answer.clone());
    answers.extend(question.incorrect_answers.iter().cloned());
    answers.shuffle(rng);
    answers
}

// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// A single multiple-choice question extracted from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    /// The question stem, numbering removed.
    pub question: String,

    /// Exactly four answer choices, in the order the model listed them.
    pub options: Vec<String>,

    /// One of `options`, or the answer text the model gave when its letter
    /// could not be resolved.
    pub correct_answer: String,
}

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,

    pub topic: String,

    /// Free-form difficulty label (e.g. "easy", "hard").
    pub difficulty: String,

    /// Number of questions requested, which may differ from how many parsed.
    pub num_questions: i32,

    /// Stored as a JSON array in the database.
    pub questions: Json<Vec<ParsedQuestion>>,

    pub date_created: chrono::DateTime<chrono::Utc>,
}

/// A quiz ready to be stored; the store assigns `id` and `date_created`.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub topic: String,
    pub difficulty: String,
    pub num_questions: i32,
    pub questions: Vec<ParsedQuestion>,
}

/// DTO for requesting a freshly generated quiz.
///
/// Missing fields default to empty/zero so they fail validation with a 400
/// instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Topic must be between 1 and 200 characters."))]
    pub topic: String,
    #[validate(range(min = 1, max = 50, message = "numQuestions must be between 1 and 50."))]
    pub num_questions: i32,
    #[validate(length(min = 1, max = 50, message = "Difficulty must be between 1 and 50 characters."))]
    pub difficulty: String,
}

/// Query parameters for the history listing.
#[derive(Debug, Deserialize, Validate)]
pub struct HistoryParams {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

/// DTO for submitting a quiz attempt.
///
/// `answers[i]` is the option chosen for question `i`; `None` or a missing
/// entry means the question was skipped.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Vec<Option<String>>,
}

/// Outcome for one question of a graded attempt.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Graded attempt returned to the client.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: usize,
    pub total_questions: usize,
    pub results: Vec<QuestionResult>,
}

/// Placeholder reported for skipped questions.
pub const NO_ANSWER: &str = "No Answer";

impl Quiz {
    /// Grades an attempt by exact comparison against each `correct_answer`.
    pub fn grade(&self, answers: &[Option<String>]) -> QuizResult {
        let results: Vec<QuestionResult> = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let chosen = answers.get(i).cloned().flatten();
                let is_correct = chosen.as_deref() == Some(q.correct_answer.as_str());
                QuestionResult {
                    question: q.question.clone(),
                    your_answer: chosen.unwrap_or_else(|| NO_ANSWER.to_string()),
                    correct_answer: q.correct_answer.clone(),
                    is_correct,
                }
            })
            .collect();

        QuizResult {
            score: results.iter().filter(|r| r.is_correct).count(),
            total_questions: results.len(),
            results,
        }
    }
}

// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    generator::QuizGenerator,
    models::quiz::{GenerateQuizRequest, HistoryParams, NewQuiz, Quiz, SubmitQuizRequest},
    parser,
    store::QuizStore,
};

/// Parses a path segment as a quiz id.
fn parse_quiz_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("Invalid quiz ID".to_string()))
}

async fn find_quiz(store: &dyn QuizStore, raw_id: &str) -> Result<Quiz, AppError> {
    let id = parse_quiz_id(raw_id)?;
    store
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))
}

/// Generates a new quiz.
///
/// * Asks the generator for raw quiz text.
/// * Parses it into questions; an empty result is reported as a generation failure.
/// * Stores the parsed questions as-is, returning the quiz with 201 Created.
pub async fn generate_quiz(
    State(store): State<Arc<dyn QuizStore>>,
    State(generator): State<Arc<dyn QuizGenerator>>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let text = generator.generate(&payload).await?;

    let questions = parser::parse(&text);
    if questions.is_empty() {
        tracing::warn!(topic = %payload.topic, "No questions parsed from model response");
        return Err(AppError::Upstream("No questions parsed from response".to_string()));
    }

    tracing::info!(
        topic = %payload.topic,
        requested = payload.num_questions,
        parsed = questions.len(),
        "Quiz generated"
    );

    let quiz = store
        .insert(NewQuiz {
            topic: payload.topic,
            difficulty: payload.difficulty,
            num_questions: payload.num_questions,
            questions,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Lists stored quizzes, newest first.
pub async fn get_history(
    State(store): State<Arc<dyn QuizStore>>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let quizzes = store.list(params.limit).await?;

    Ok(Json(quizzes))
}

/// Retrieves a single quiz for review or a new attempt.
pub async fn get_quiz(
    State(store): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = find_quiz(store.as_ref(), &id).await?;

    Ok(Json(quiz))
}

/// Grades an attempt against the stored answers.
///
/// Nothing is persisted; the score is computed per request.
pub async fn submit_quiz(
    State(store): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = find_quiz(store.as_ref(), &id).await?;

    Ok(Json(quiz.grade(&req.answers)))
}

/// Deletes a quiz by ID.
pub async fn delete_quiz(
    State(store): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_quiz_id(&id)?;

    if !store.delete(id).await? {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    tracing::info!(quiz_id = id, "Quiz deleted");

    Ok(Json(json!({ "message": "Quiz deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quiz_id_accepts_positive_integers_only() {
        assert_eq!(parse_quiz_id("42").unwrap(), 42);
        assert!(parse_quiz_id("0").is_err());
        assert!(parse_quiz_id("-3").is_err());
        assert!(parse_quiz_id("64f1c0ffee").is_err());
        assert!(parse_quiz_id("").is_err());
    }
}

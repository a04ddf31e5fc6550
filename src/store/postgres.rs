// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::quiz::{NewQuiz, Quiz},
    store::QuizStore,
};

/// Postgres-backed store over the `quizzes` table.
#[derive(Clone)]
pub struct PgQuizStore {
    pool: PgPool,
}

impl PgQuizStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for PgQuizStore {
    async fn insert(&self, quiz: NewQuiz) -> Result<Quiz, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (topic, difficulty, num_questions, questions)
            VALUES ($1, $2, $3, $4)
            RETURNING id, topic, difficulty, num_questions, questions, date_created
            "#,
        )
        .bind(&quiz.topic)
        .bind(&quiz.difficulty)
        .bind(quiz.num_questions)
        .bind(Json(&quiz.questions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz: {:?}", e);
            AppError::from(e)
        })?;

        Ok(quiz)
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<Quiz>, AppError> {
        // LIMIT NULL means no limit in Postgres.
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, topic, difficulty, num_questions, questions, date_created
            FROM quizzes
            ORDER BY date_created DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz history: {:?}", e);
            AppError::from(e)
        })?;

        Ok(quizzes)
    }

    async fn get(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, topic, difficulty, num_questions, questions, date_created
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete quiz {}: {:?}", id, e);
                AppError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

// src/store/mod.rs

//! Quiz persistence.
//!
//! Handlers only see the [`QuizStore`] trait; `main` wires in Postgres and
//! the integration tests use the in-memory store.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::quiz::{NewQuiz, Quiz},
};

pub use memory::MemoryQuizStore;
pub use postgres::PgQuizStore;

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Persists a quiz, assigning its id and creation date.
    async fn insert(&self, quiz: NewQuiz) -> Result<Quiz, AppError>;

    /// Lists quizzes newest first, optionally capped at `limit`.
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Quiz>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Quiz>, AppError>;

    /// Returns whether a quiz with `id` existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

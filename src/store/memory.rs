// src/store/memory.rs

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::quiz::{NewQuiz, Quiz},
    store::QuizStore,
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    quizzes: Vec<Quiz>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryQuizStore {
    inner: RwLock<Inner>,
}

impl MemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryQuizStore {
    async fn insert(&self, quiz: NewQuiz) -> Result<Quiz, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let quiz = Quiz {
            id: inner.next_id,
            topic: quiz.topic,
            difficulty: quiz.difficulty,
            num_questions: quiz.num_questions,
            questions: Json(quiz.questions),
            date_created: chrono::Utc::now(),
        };
        inner.quizzes.push(quiz.clone());

        Ok(quiz)
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<Quiz>, AppError> {
        let inner = self.inner.read().await;

        let mut quizzes = inner.quizzes.clone();
        quizzes.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = limit {
            quizzes.truncate(usize::try_from(limit).unwrap_or(0));
        }

        Ok(quizzes)
    }

    async fn get(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.quizzes.len();
        inner.quizzes.retain(|q| q.id != id);
        Ok(inner.quizzes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::ParsedQuestion;

    fn new_quiz(topic: &str) -> NewQuiz {
        NewQuiz {
            topic: topic.to_string(),
            difficulty: "easy".to_string(),
            num_questions: 1,
            questions: vec![ParsedQuestion {
                question: "Q?".to_string(),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: "A".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn lists_newest_first_and_respects_limit() {
        let store = MemoryQuizStore::new();
        store.insert(new_quiz("first")).await.unwrap();
        store.insert(new_quiz("second")).await.unwrap();
        store.insert(new_quiz("third")).await.unwrap();

        let all = store.list(None).await.unwrap();
        let topics: Vec<&str> = all.iter().map(|q| q.topic.as_str()).collect();
        assert_eq!(topics, vec!["third", "second", "first"]);

        let limited = store.list(Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].topic, "third");
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryQuizStore::new();
        let quiz = store.insert(new_quiz("math")).await.unwrap();

        assert!(store.get(quiz.id).await.unwrap().is_some());
        assert!(store.delete(quiz.id).await.unwrap());
        assert!(!store.delete(quiz.id).await.unwrap());
        assert!(store.get(quiz.id).await.unwrap().is_none());
    }
}

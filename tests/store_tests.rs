// tests/store_tests.rs

use quizgen::{
    models::quiz::{NewQuiz, ParsedQuestion},
    store::{PgQuizStore, QuizStore},
};
use sqlx::postgres::PgPoolOptions;

/// Connects to the database named by DATABASE_URL and applies migrations.
/// Returns None when no database is configured so the test can be skipped.
async fn connect() -> Option<PgQuizStore> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is valid.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Some(PgQuizStore::new(pool))
}

#[tokio::test]
async fn postgres_store_round_trip() {
    let Some(store) = connect().await else {
        eprintln!("DATABASE_URL not set, skipping Postgres store test");
        return;
    };

    let question = ParsedQuestion {
        question: "What is 2+2?".to_string(),
        options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
        correct_answer: "4".to_string(),
    };

    let inserted = store
        .insert(NewQuiz {
            topic: "arithmetic".to_string(),
            difficulty: "easy".to_string(),
            num_questions: 1,
            questions: vec![question.clone()],
        })
        .await
        .unwrap();

    let fetched = store.get(inserted.id).await.unwrap().expect("quiz stored");
    assert_eq!(fetched.topic, "arithmetic");
    assert_eq!(fetched.questions.0, vec![question]);

    let newest = store.list(Some(1)).await.unwrap();
    assert_eq!(newest.len(), 1);

    assert!(store.delete(inserted.id).await.unwrap());
    assert!(!store.delete(inserted.id).await.unwrap());
    assert!(store.get(inserted.id).await.unwrap().is_none());
}

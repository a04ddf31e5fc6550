// src/generator.rs

//! Quiz text generation through the Gemini `generateContent` API.
//!
//! The client only returns the raw text of the first candidate; turning it
//! into questions is the job of [`crate::parser`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError, models::quiz::GenerateQuizRequest};

/// Produces raw quiz text for a request.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, req: &GenerateQuizRequest) -> Result<String, AppError>;
}

/// Builds the instruction sent to the model.
///
/// The layout requested here (numbered stem, `a)`..`d)` options, closing
/// `Answer:` line) is what the parser expects.
pub fn build_prompt(topic: &str, num_questions: i32, difficulty: &str) -> String {
    format!(
        r#"
Generate {num_questions} {difficulty} level multiple-choice questions about {topic}.
Each question must have:
- A numbered question like "1. What is..."
- Four options labeled a), b), c), d)
- A clear line at the end with 'Answer: <Correct Option Text>'

Example:
1. What is the capital of France?
a) Berlin
b) Madrid
c) Paris
d) Rome
Answer: c) Paris
"#
    )
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.as_str().trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl QuizGenerator for GeminiClient {
    #[tracing::instrument(level = "info", skip(self, req), fields(model = %self.model, topic = %req.topic, num_questions = req.num_questions))]
    async fn generate(&self, req: &GenerateQuizRequest) -> Result<String, AppError> {
        let prompt = build_prompt(&req.topic, req.num_questions, &req.difficulty);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
        };

        let start = std::time::Instant::now();
        let res = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let msg = extract_api_error(&body).unwrap_or(body);
            return Err(AppError::Upstream(format!("Gemini HTTP {}: {}", status, msg)));
        }

        let body: GenerateContentResponse = res.json().await?;
        tracing::info!(elapsed = ?start.elapsed(), "Gemini response received");

        let text = first_candidate_text(body)
            .ok_or_else(|| AppError::Upstream("Failed to get response from Gemini".to_string()))?;
        tracing::debug!("Gemini response:\n{}", text);

        Ok(text)
    }
}

fn first_candidate_text(body: GenerateContentResponse) -> Option<String> {
    body.candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|t| !t.trim().is_empty())
}

// --- Gemini DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}
#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}
#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}
#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}
#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Pulls `error.message` out of a Gemini error body.
fn extract_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct EWrap {
        error: EObj,
    }
    #[derive(Deserialize)]
    struct EObj {
        message: String,
    }
    serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

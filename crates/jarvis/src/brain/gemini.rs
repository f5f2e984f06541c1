//! Google Gemini provider (`generateContent` REST API)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::AiClient;
use crate::{config::GeminiConfig, Result};

const EMPTY_ANSWER: &str = "I couldn't generate a response. Please try rephrasing your question.";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Fails when no API key is configured
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        info!("Gemini client initialized with model {}", config.model);

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Raw answer text; empty when the model returned no text parts
    pub async fn generate(&self, prompt: &str) -> std::result::Result<String, GeminiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        parse_answer(&body)
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn parse_answer(body: &str) -> std::result::Result<String, GeminiError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| GeminiError::ParseError(e.to_string()))?;

    Ok(parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default())
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn query(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => EMPTY_ANSWER.to_string(),
            Ok(text) => text,
            Err(e) => {
                error!("Gemini error: {}", e);
                format!("Sorry, I encountered an error with Gemini: {}", e)
            }
        }
    }
}

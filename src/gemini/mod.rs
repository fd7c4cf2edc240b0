pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::AppError;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::Config("GEMINI_API_KEY is not set".to_string()))?;
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

/// A single prompt-in, text-out call to a generative model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, AppError>;
}

pub struct GeminiHttpClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiHttpClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiHttpClient {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, AppError> {
        let request_body = dto::GenerateContentRequest::new(prompt, schema);

        tracing::debug!(model = %self.config.model, "Sending generateContent request");
        let response = self.client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Generation(format!("Gemini API error {}: {}", status, body_text)));
        }

        let parsed: dto::GenerateContentResponse = serde_json::from_str(&body_text)
            .map_err(|e| AppError::Generation(format!("Failed to parse Gemini response: {}", e)))?;

        parsed.text().ok_or_else(|| match parsed.block_reason() {
            Some(reason) => AppError::Generation(format!("Gemini blocked the prompt: {}", reason)),
            None => AppError::Generation("Gemini returned no text".to_string()),
        })
    }
}

/// Stand-in used when no API key is configured; every call fails.
pub struct MissingKeyGenerator;

#[async_trait]
impl TextGenerator for MissingKeyGenerator {
    async fn generate(&self, _prompt: &str, _schema: Option<&Value>) -> Result<String, AppError> {
        Err(AppError::Generation("GEMINI_API_KEY is not set".to_string()))
    }
}

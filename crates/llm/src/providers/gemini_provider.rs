use crate::errors::{LlmError, LlmResult};
use crate::TextGenerator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    /// Scheme and host only, e.g. `https://generativelanguage.googleapis.com`
    pub base_url: String,
    pub model: String,
    pub generation: GenerationConfig,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

/// Gemini `generateContent` client.
///
/// No client timeout and no retry: a call either returns text or one error.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings) -> LlmResult<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        if settings.model.trim().is_empty() {
            return Err(LlmError::Configuration("model name cannot be empty".into()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_request<'a>(&self, prompt: &'a str) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: self.settings.generation,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    #[instrument(skip(self, prompt), fields(model = %self.settings.model, prompt_chars = prompt.len()))]
    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        let start_time = Instant::now();
        let request = self.build_request(prompt);

        debug!(
            "Sending request to Gemini: {}",
            prompt.trim().chars().take(50).collect::<String>()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.settings.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Error calling Gemini API: {}", e);
                LlmError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = LlmError::from_status(status.as_u16(), body);
            error!(status = status.as_u16(), "Error calling Gemini API: {}", error);
            return Err(error);
        }

        let envelope: GeminiResponse = response.json().await?;
        let text = envelope.into_text().ok_or(LlmError::EmptyResponse)?;

        info!(
            duration_ms = start_time.elapsed().as_millis() as u64,
            response_chars = text.len(),
            "Received response from Gemini"
        );
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

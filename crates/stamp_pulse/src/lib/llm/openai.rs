use reqwest::Client;
use serde::Deserialize;

use crate::llm::{
    prompt::truncate_to_token_limit,
    segmenter::{SegmentationResponse, TopicSegmenter},
};

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Missing API key: OPENAI_API_KEY is not set")]
    MissingApiKey,
}

impl OpenAIClient {
    const SYSTEM_PROMPT: &str = include_str!("./prompts/system_0.txt");
    const MAX_COMPLETION_TOKENS: u32 = 800;
    const TEMPERATURE: f32 = 0.1;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_completion_request(
        &self,
        model_name: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        if self.api_key.trim().is_empty() {
            return Err(OpenAIError::MissingApiKey);
        }

        let body = serde_json::json!({
            "model": model_name.into(),
            "max_tokens": Self::MAX_COMPLETION_TOKENS,
            "temperature": Self::TEMPERATURE,
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice, if the model produced any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

impl TopicSegmenter for OpenAIClient {
    const SEGMENTER_MODEL: &'static str = "gpt-3.5-turbo";
    type Error = OpenAIError;

    #[tracing::instrument(skip_all)]
    async fn segment_topics(&self, content: &str) -> Result<SegmentationResponse, Self::Error> {
        let content = truncate_to_token_limit(content, Self::CONTEXT_WINDOW_LIMIT);

        let response = self
            .send_completion_request(Self::SEGMENTER_MODEL, content)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to segment content"))?;

        let text = response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| OpenAIError::Api {
                status: 0,
                message: "No content in response".into(),
            })?;

        Ok(SegmentationResponse { text })
    }
}

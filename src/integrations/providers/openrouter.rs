//! OpenRouter summarizer using the OpenAI-compatible Chat Completions API.
//!
//! One non-streaming request per item: a system message with the
//! summarization instructions, a user message with the item text.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::integrations::feed::FeedItem;
use crate::integrations::summarize::{SummarizationService, SummarizeError, item_prompt};

pub const DEFAULT_SUMMARY_PROMPT: &str = "You are a content analyst for Shorthand Studios. \
    Summarize the item you are given in at most three sentences of plain text. \
    State who is involved, what happened, and why it matters for a content team. \
    Do not speculate beyond the text provided.";

// ============================================================================
// Chat Completions API Types
// ============================================================================

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone)]
struct ChatMessage {
    role: Role,
    content: String,
}

#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Service Implementation
// ============================================================================

pub struct OpenRouterSummarizer {
    api_key: String,
    base_url: String,
    model: String,
    system_prompt: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl OpenRouterSummarizer {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            system_prompt: DEFAULT_SUMMARY_PROMPT.to_string(),
            max_tokens: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
impl SummarizationService for OpenRouterSummarizer {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn summarize(&self, item: &FeedItem) -> Result<String, SummarizeError> {
        if self.api_key.trim().is_empty() {
            return Err(SummarizeError::Config("OpenRouter API key is empty".to_string()));
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: Role::User,
                    content: item_prompt(item),
                },
            ],
            max_tokens: self.max_tokens,
        };

        info!("OpenRouter summary request: model={}, item={:?}", self.model, item.title);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Network(e.to_string()))?;

        debug!("OpenRouter response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenRouter API error: {} - {}", status, message);
            return Err(SummarizeError::Api { status, message });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| SummarizeError::Parse("response contained no message content".to_string()))
    }
}

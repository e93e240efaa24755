use super::Llm;
use crate::error::TransportError;
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestMessage, CreateChatCompletionRequestArgs},
    Client,
};
use std::time::Duration;

// Deterministic decoding; the reply is a bare label.
pub const TEMPERATURE: f32 = 0.0;
pub const TOP_P: f32 = 1.0;
pub const MAX_TOKENS: u32 = 8;

#[async_trait::async_trait]
impl Llm for LlmClient {
    async fn chat(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String, TransportError> {
        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(TEMPERATURE)
            .top_p(TOP_P)
            .max_tokens(MAX_TOKENS)
            .build()?;
        let resp = self.client.chat().create(req).await?;
        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(TransportError::EmptyResponse)
    }
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmClient {
    /// `base_url` is the server root; requests go to `{base_url}/v1`.
    pub fn new(model: impl Into<String>, base_url: &str, api_key: &str) -> Self {
        let cfg = OpenAIConfig::new()
            .with_api_base(api_base(base_url))
            .with_api_key(api_key);
        // One HTTP request per attempt; retries are with_retry's job.
        let no_backoff = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(cfg).with_backoff(no_backoff);
        Self { client, model: model.into() }
    }
}

pub fn api_base(base_url: &str) -> String {
    format!("{}/v1", base_url.trim_end_matches('/'))
}

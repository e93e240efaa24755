pub mod openai;
pub mod retry;

use crate::error::TransportError;
use async_openai::types::ChatCompletionRequestMessage;

#[async_trait::async_trait]
pub trait Llm: Send + Sync {
    /// One chat-completion round trip; returns the first choice's text as-is.
    async fn chat(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String, TransportError>;
}

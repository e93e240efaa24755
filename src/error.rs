use async_openai::error::OpenAIError;
use thiserror::Error;

/// Failure of a single chat-completion call. Every variant is retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("chat completion request failed: {0}")]
    Api(#[source] OpenAIError),
    #[error("invalid chat completion request: {0}")]
    InvalidRequest(String),
    #[error("chat completion returned no message content")]
    EmptyResponse,
}

impl From<OpenAIError> for TransportError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::InvalidArgument(msg) => TransportError::InvalidRequest(msg),
            other => TransportError::Api(other),
        }
    }
}

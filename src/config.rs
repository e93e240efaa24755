use crate::llm::retry::RetryPolicy;

pub const DEFAULT_PORT: u16 = 8009;
pub const DEFAULT_API_KEY: &str = "sk-xxx";
pub const DEFAULT_MODEL: &str = "qwen3-32b";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Everything the engine needs besides the input and output paths.
/// Built once at startup from CLI flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_retries: u32,
    /// 0 means no limit.
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(DEFAULT_PORT),
            api_key: DEFAULT_API_KEY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            limit: 0,
        }
    }
}

impl Config {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_max_retries(self.max_retries)
    }

    pub fn record_limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit)
    }
}

pub fn default_base_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}")
}

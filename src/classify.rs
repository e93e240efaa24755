use crate::error::TransportError;
use crate::llm::retry::{with_retry, RetryPolicy};
use crate::llm::Llm;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};

pub const SYSTEM_PROMPT: &str = "你是严格的事实核验分类器。只依据输入的中文陈述句本身，不查阅任何外部资料。\n\
请将该陈述句的事实状态判为以下三者之一，并且只输出其中一个标签（不要解释）：\n\
supports（支持为真）\n\
refutes（反驳为假）\n\
NOT ENOUGH INFO（信息不足，无法判断）";

pub fn user_prompt(claim: &str) -> String {
    format!("陈述句：{claim}\n只输出一个：supports / refutes / NOT ENOUGH INFO")
}

pub fn build_classify_prompt(claim: &str) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(SYSTEM_PROMPT)
        .build()?
        .into();
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(user_prompt(claim))
        .build()?
        .into();
    Ok(vec![system, user])
}

/// Asks the model for a label and returns its raw reply. Transport failures
/// are retried per `retry`; the last one is returned once attempts run out.
pub async fn classify_claim(
    client: &dyn Llm,
    claim: &str,
    retry: &RetryPolicy,
) -> Result<String, TransportError> {
    let messages = build_classify_prompt(claim)?;
    with_retry(retry, || client.chat(messages.clone())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    struct FlakyLlm {
        replies: Mutex<VecDeque<Result<String, TransportError>>>,
        calls: Mutex<Vec<Instant>>,
    }

    impl FlakyLlm {
        fn new(replies: Vec<Result<String, TransportError>>) -> Self {
            Self { replies: Mutex::new(replies.into()), calls: Mutex::new(Vec::new()) }
        }
        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Llm for FlakyLlm {
        async fn chat(&self, _m: Vec<ChatCompletionRequestMessage>) -> Result<String, TransportError> {
            self.calls.lock().unwrap().push(Instant::now());
            self.replies.lock().unwrap().pop_front().unwrap_or(Err(TransportError::EmptyResponse))
        }
    }

    fn assert_gap(a: Instant, b: Instant, expected_ms: u64) {
        let gap = b - a;
        let expected = Duration::from_millis(expected_ms);
        assert!(
            gap >= expected && gap < expected + Duration::from_millis(50),
            "gap {gap:?}, expected {expected:?}"
        );
    }

    #[test]
    fn prompt_is_system_then_user() {
        let msgs = build_classify_prompt("地球是平的。").unwrap();
        let v = serde_json::to_value(&msgs).unwrap();
        assert_eq!(v[0]["role"], "system");
        assert_eq!(v[0]["content"], SYSTEM_PROMPT);
        assert_eq!(v[1]["role"], "user");
        assert_eq!(
            v[1]["content"],
            "陈述句：地球是平的。\n只输出一个：supports / refutes / NOT ENOUGH INFO"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retries_then_returns_third_reply() {
        let llm = FlakyLlm::new(vec![
            Err(TransportError::EmptyResponse),
            Err(TransportError::EmptyResponse),
            Ok(" refutes ".into()),
        ]);
        let out = classify_claim(&llm, "地球是平的。", &RetryPolicy::default()).await.unwrap();
        // returned untrimmed
        assert_eq!(out, " refutes ");

        let t = llm.call_times();
        assert_eq!(t.len(), 3);
        assert_gap(t[0], t[1], 1000);
        assert_gap(t[1], t[2], 2500);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_propagates_without_fourth_attempt() {
        let llm = FlakyLlm::new(vec![
            Err(TransportError::EmptyResponse),
            Err(TransportError::EmptyResponse),
            Err(TransportError::EmptyResponse),
            Ok("supports".into()),
        ]);
        let err = classify_claim(&llm, "c", &RetryPolicy::default()).await.unwrap_err();
        assert!(matches!(err, TransportError::EmptyResponse));
        assert_eq!(llm.call_times().len(), 3);
    }

    #[tokio::test]
    async fn first_success_skips_backoff() {
        let llm = FlakyLlm::new(vec![Ok("supports".into())]);
        let out = classify_claim(&llm, "c", &RetryPolicy::default()).await.unwrap();
        assert_eq!(out, "supports");
        assert_eq!(llm.call_times().len(), 1);
    }
}

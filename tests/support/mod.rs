use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What the stub answers to one request.
#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    NullContent,
    Status(u16),
}

impl From<&str> for StubReply {
    fn from(s: &str) -> Self {
        StubReply::Text(s.to_string())
    }
}

/// In-process stand-in for an OpenAI-compatible `/v1/chat/completions`.
/// Replies are served in order; the last one repeats once the queue drains.
pub struct StubEndpoint {
    pub base_url: String,
    state: Arc<StubState>,
}

struct StubState {
    replies: Mutex<VecDeque<StubReply>>,
    last: Mutex<StubReply>,
    requests: Mutex<Vec<Value>>,
}

impl StubEndpoint {
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

fn error_body(status: StatusCode) -> Value {
    let kind = if status == StatusCode::TOO_MANY_REQUESTS { "rate_limit_exceeded" } else { "server_error" };
    json!({
        "error": { "message": "stub failure", "type": kind, "param": null, "code": null }
    })
}

async fn completions(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    let reply = {
        let mut q = state.replies.lock().unwrap();
        let mut last = state.last.lock().unwrap();
        if let Some(r) = q.pop_front() {
            *last = r;
        }
        last.clone()
    };
    let model = body.get("model").cloned().unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(body);

    let content = match reply {
        StubReply::Text(t) => Value::String(t),
        StubReply::NullContent => Value::Null,
        StubReply::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            return (status, Json(error_body(status))).into_response();
        }
    };
    Json(json!({
        "id": "chatcmpl-stub",
        "object": "chat.completion",
        "created": 0,
        "model": model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
            "logprobs": null
        }]
    }))
    .into_response()
}

pub async fn spawn_stub(replies: &[&str]) -> StubEndpoint {
    spawn_scripted(replies.iter().map(|r| StubReply::from(*r)).collect()).await
}

pub async fn spawn_scripted(replies: Vec<StubReply>) -> StubEndpoint {
    let state = Arc::new(StubState {
        replies: Mutex::new(replies.into()),
        last: Mutex::new(StubReply::Text(String::new())),
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    StubEndpoint { base_url: format!("http://{addr}/"), state }
}

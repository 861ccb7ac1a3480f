use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
};
use config::Config;
use gemini::{BackendError, GeminiAdapter, GeminiError};
use indoc::formatdoc;
use prompt::{ChatCompletionParameters, ChatMessage, ChatPrompt, CompletionParameters, StopReason, TextPrompt};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Received {
    target: String,
    key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct GoogleMock {
    status: StatusCode,
    reply: Value,
    received: Arc<Mutex<Vec<Received>>>,
}

impl GoogleMock {
    fn new(reply: Value) -> Self {
        Self {
            status: StatusCode::OK,
            reply,
            received: Default::default(),
        }
    }

    fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    async fn spawn(&self) -> SocketAddr {
        let app = Router::new()
            .route("/v1beta/models/{target}", post(generate_content))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        address
    }
}

async fn generate_content(
    State(mock): State<GoogleMock>,
    Path(target): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.received.lock().unwrap().push(Received {
        target,
        key: query.get("key").cloned(),
        body,
    });

    (mock.status, Json(mock.reply.clone()))
}

fn adapter(address: SocketAddr, api_key: Option<&str>) -> GeminiAdapter {
    let api_key = api_key.map(|key| format!("api_key = \"{key}\"")).unwrap_or_default();

    let config = Config::parse(&formatdoc! {r#"
        [google]
        base_url = "http://{address}/v1beta/"
        timeout = "5s"
        {api_key}
    "#})
    .unwrap();

    GeminiAdapter::from_config(&config.google).unwrap()
}

#[tokio::test]
async fn text_completion_over_http() {
    let mock = GoogleMock::new(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "Hello!"}]},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 2, "totalTokenCount": 4},
        "modelVersion": "gemini-1.5-flash-002"
    }));
    let address = mock.spawn().await;

    let completion = adapter(address, Some("test-key"))
        .complete_text(TextPrompt::new("Say hi"), CompletionParameters::default())
        .await
        .unwrap();

    assert_eq!(completion.text, "Hello!");

    let received = mock.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].target, "gemini-1.5-flash:generateContent");
    assert_eq!(received[0].key.as_deref(), Some("test-key"));

    assert_eq!(
        received[0].body,
        json!({
            "contents": [{"role": "user", "parts": [{"text": "Say hi"}]}],
            "generationConfig": {"candidateCount": 1}
        })
    );
}

#[tokio::test]
async fn chat_completion_over_http() {
    let mock = GoogleMock::new(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "4"}]},
            "finishReason": "STOP"
        }]
    }));
    let address = mock.spawn().await;

    let prompt = ChatPrompt::new(vec![ChatMessage::system("Be terse"), ChatMessage::user("2+2?")]);

    let completion = adapter(address, Some("test-key"))
        .complete_chat(prompt, ChatCompletionParameters::default())
        .await
        .unwrap();

    assert_eq!(completion.message, ChatMessage::assistant("4"));
    assert_eq!(completion.stop_reason, StopReason::EndTurn);

    let received = mock.received();
    assert_eq!(received[0].body["systemInstruction"]["parts"][0]["text"], "Be terse");
}

#[tokio::test]
async fn error_status_is_classified() {
    let mock = GoogleMock::new(json!({
        "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
    }))
    .with_status(StatusCode::TOO_MANY_REQUESTS);
    let address = mock.spawn().await;

    let error = adapter(address, Some("test-key"))
        .complete_text(TextPrompt::new("Say hi"), CompletionParameters::default())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        GeminiError::Backend(BackendError::RateLimitExceeded { ref message }) if message.contains("RESOURCE_EXHAUSTED")
    ));
}

#[tokio::test]
async fn unknown_model_status_is_classified() {
    let mock = GoogleMock::new(json!({
        "error": {"code": 404, "message": "models/gemini-1.5-flash is not found", "status": "NOT_FOUND"}
    }))
    .with_status(StatusCode::NOT_FOUND);
    let address = mock.spawn().await;

    let error = adapter(address, Some("test-key"))
        .complete_text(TextPrompt::new("Say hi"), CompletionParameters::default())
        .await
        .unwrap_err();

    assert!(matches!(error, GeminiError::Backend(BackendError::ModelNotFound(_))));
}

#[tokio::test]
async fn missing_api_key_fails_before_sending() {
    let mock = GoogleMock::new(json!({}));
    let address = mock.spawn().await;

    let error = adapter(address, None)
        .complete_text(TextPrompt::new("Say hi"), CompletionParameters::default())
        .await
        .unwrap_err();

    insta::assert_snapshot!(error, @"No API key configured for the Google provider");
    assert!(mock.received().is_empty());
}

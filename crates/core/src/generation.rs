//! Outbound calls to the hosted text-generation service.
//!
//! [`GenerationClient`] is the seam between the symptom service and the network. The production
//! implementation, [`HttpGenerationClient`], speaks the `generateContent` REST API; tests and
//! offline runs use [`StubGenerationClient`].
//!
//! One call is made per invocation. There is no retry, caching or rate limiting here.

use crate::config::CoreConfig;
use crate::constants::GENERATION_API_KEY_HEADER;
use crate::{AssistError, AssistResult};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A client able to turn a prompt into a raw completion.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Submit `prompt` and return the raw completion text.
    ///
    /// # Errors
    /// - [`AssistError::TransportFailure`] if the call cannot complete or the service reports an
    ///   error status (timeout, quota, unavailable).
    /// - [`AssistError::SchemaMismatch`] if the service replied but carried no completion text.
    async fn generate(&self, prompt: &str) -> AssistResult<String>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Generation client backed by the hosted `generateContent` HTTP API.
#[derive(Clone)]
pub struct HttpGenerationClient {
    http: reqwest::Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl HttpGenerationClient {
    /// Build a client from startup configuration.
    ///
    /// # Errors
    /// Returns [`AssistError::Config`] if no API key is configured or the HTTP client cannot be
    /// constructed.
    pub fn new(cfg: &CoreConfig) -> AssistResult<Self> {
        let api_key = cfg.require_generation_api_key()?.to_string();
        let endpoint = generate_content_url(cfg.generation_base_url(), cfg.generation_model())?;
        let http = reqwest::Client::builder()
            .timeout(cfg.generation_timeout())
            .build()
            .map_err(|e| AssistError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            model: cfg.generation_model().to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> AssistResult<String> {
        let started = Instant::now();

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(GENERATION_API_KEY_HEADER, &self.api_key)
            .json(&build_request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(model = %self.model, "generation request failed: {}", e);
                AssistError::TransportFailure(describe_reqwest_error(&e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(model = %self.model, "failed to read generation response: {}", e);
            AssistError::TransportFailure(describe_reqwest_error(&e))
        })?;

        tracing::debug!(
            model = %self.model,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation call completed"
        );

        if !status.is_success() {
            return Err(AssistError::TransportFailure(describe_error_response(
                status, &body,
            )));
        }

        extract_completion_text(&body)
    }
}

/// Endpoint for `model` under `base`, preserving any path prefix on `base`.
pub fn generate_content_url(base: &Url, model: &str) -> AssistResult<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| AssistError::Config(format!("invalid generation endpoint: {e}")))
}

fn build_request_body(prompt: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
        },
    }
}

/// Pull the completion text out of a successful `generateContent` reply.
///
/// Text parts of the first candidate are concatenated in order.
fn extract_completion_text(body: &str) -> AssistResult<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        AssistError::SchemaMismatch(format!("unexpected generation response shape: {e}"))
    })?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Err(AssistError::SchemaMismatch(
            "generation response contained no candidates".into(),
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AssistError::SchemaMismatch(format!(
            "generation response contained no completion text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

fn describe_error_response(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = envelope.error.message.unwrap_or_else(|| "no message".into());
            match envelope.error.status {
                Some(kind) => format!("HTTP {status} ({kind}): {message}"),
                None => format!("HTTP {status}: {message}"),
            }
        }
        Err(_) => format!("HTTP {status}"),
    }
}

fn describe_reqwest_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".into()
    } else if err.is_connect() {
        "could not connect to generation service".into()
    } else {
        err.to_string()
    }
}

type Responder = dyn Fn(&str) -> AssistResult<String> + Send + Sync;

/// In-process generation client that answers from a closure.
///
/// Used by tests across the workspace and for running the servers without network access.
pub struct StubGenerationClient {
    responder: Box<Responder>,
    calls: AtomicUsize,
}

impl StubGenerationClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> AssistResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always reply with `completion`.
    pub fn replying(completion: impl Into<String>) -> Self {
        let completion = completion.into();
        Self::new(move |_| Ok(completion.clone()))
    }

    /// Always fail with a transport failure carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(AssistError::TransportFailure(message.clone())))
    }

    /// Number of prompts submitted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for StubGenerationClient {
    fn model(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &str) -> AssistResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(prompt)
    }
}

#[cfg(test)]
mod generation_tests {
    use super::*;
    use std::time::Duration;

    fn config(base_url: &str) -> CoreConfig {
        CoreConfig::new(
            base_url,
            "gemini-2.0-flash",
            Some("test-key".into()),
            Duration::from_secs(5),
        )
        .expect("valid config")
    }

    #[test]
    fn endpoint_is_built_under_base_url() {
        let client =
            HttpGenerationClient::new(&config("https://example.test")).expect("client builds");
        assert_eq!(
            client.endpoint().as_str(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );

        let prefixed =
            HttpGenerationClient::new(&config("https://proxy.test/genai")).expect("client builds");
        assert_eq!(
            prefixed.endpoint().as_str(),
            "https://proxy.test/genai/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn client_requires_api_key() {
        let cfg = CoreConfig::new("https://example.test", "m", None, Duration::from_secs(5))
            .expect("valid config");
        assert!(matches!(
            HttpGenerationClient::new(&cfg),
            Err(AssistError::Config(_))
        ));
    }

    #[test]
    fn request_body_carries_prompt_and_json_mime_type() {
        let body = serde_json::to_value(build_request_body("Symptoms: cough")).expect("json");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Symptoms: cough");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn completion_text_concatenates_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[\"Common cold\", "}, {"text": "\"Influenza\"]"}]}},
                {"content": {"parts": [{"text": "[\"ignored\"]"}]}}
            ]
        }"#;
        assert_eq!(
            extract_completion_text(body).expect("text"),
            r#"["Common cold", "Influenza"]"#
        );
    }

    #[test]
    fn missing_completion_is_schema_mismatch() {
        for body in [
            r#"{"candidates": []}"#,
            r#"{}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            "not json",
        ] {
            assert!(
                matches!(
                    extract_completion_text(body),
                    Err(AssistError::SchemaMismatch(_))
                ),
                "body {body:?}"
            );
        }
    }

    #[test]
    fn error_response_is_described_with_status_and_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let described = describe_error_response(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(described.contains("429"));
        assert!(described.contains("RESOURCE_EXHAUSTED"));
        assert!(described.contains("Quota exceeded"));

        let opaque = describe_error_response(StatusCode::BAD_GATEWAY, "<html>");
        assert!(opaque.contains("502"));
    }

    /// Serve `body` with `status` for any request carrying the test key; returns the base URL.
    async fn serve(status: StatusCode, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = axum::Router::new().fallback(move |headers: axum::http::HeaderMap| async move {
            let key = headers
                .get(GENERATION_API_KEY_HEADER)
                .and_then(|v| v.to_str().ok());
            if key != Some("test-key") {
                return (StatusCode::UNAUTHORIZED, "missing key");
            }
            (status, body)
        });
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    async fn generate_against(base_url: &str) -> AssistResult<String> {
        HttpGenerationClient::new(&config(base_url))
            .expect("client builds")
            .generate("Symptoms: cough")
            .await
    }

    #[tokio::test]
    async fn generate_returns_candidate_text() {
        let base = serve(
            StatusCode::OK,
            r#"{"candidates": [{"content": {"parts": [{"text": "[\"Bronchitis\"]"}]}}]}"#,
        )
        .await;
        assert_eq!(
            generate_against(&base).await.expect("completion"),
            r#"["Bronchitis"]"#
        );
    }

    #[tokio::test]
    async fn quota_status_is_transport_failure() {
        let base = serve(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#,
        )
        .await;
        match generate_against(&base).await {
            Err(AssistError::TransportFailure(msg)) => assert!(msg.contains("429"), "{msg}"),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reply_without_candidates_is_schema_mismatch() {
        let base = serve(StatusCode::OK, r#"{"candidates": []}"#).await;
        assert!(matches!(
            generate_against(&base).await,
            Err(AssistError::SchemaMismatch(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        assert!(matches!(
            generate_against(&format!("http://{addr}")).await,
            Err(AssistError::TransportFailure(_))
        ));
    }

    #[tokio::test]
    async fn stub_counts_calls_and_sees_prompt() {
        let stub = StubGenerationClient::new(|prompt| Ok(format!("[{:?}]", prompt)));
        let reply = stub.generate("hello").await.expect("stub reply");
        assert_eq!(reply, "[\"hello\"]");
        assert_eq!(stub.calls(), 1);
    }
}

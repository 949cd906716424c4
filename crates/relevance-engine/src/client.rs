//! HTTP client for the classification service.
//!
//! The service exposes two endpoints:
//! - `GET {base}/health` for liveness and the active model name
//! - `POST {base}/predict` with `{"review": {...}}` for a verdict
//!
//! Both calls normalize failures into [`ClientError`]. There are no retries
//! and no client-side timeout.

use crate::config::Config;
use crate::review::Review;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::future::Future;
use tracing::{debug, warn};

/// Body of a successful `/health` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Name of the model the service is serving, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Any other fields the service reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a successful `/predict` response.
///
/// The client only interprets `final_decision` and `confidence` for display;
/// everything else, including unknown fields, is passed through untouched.
/// Results read off the wire keep the body as received in `raw`, which is
/// what gets attached to the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Model that produced the verdict.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,

    /// Relevance decision, e.g. `"relevant"` or `"spam"`.
    pub final_decision: String,

    /// Confidence in `0..=1`. Missing is treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Free-text rationale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Auxiliary model features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Value>,

    /// Per-model votes from the LLM ensemble.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_vote: Option<Value>,

    /// Any other fields the service reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Response body exactly as the service sent it.
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl PredictionResult {
    /// Decision label for display (uppercased).
    pub fn decision_label(&self) -> String {
        self.final_decision.to_uppercase()
    }

    /// Confidence rounded to the nearest whole percent.
    #[allow(clippy::cast_possible_truncation)]
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence.unwrap_or(0.0) * 100.0).round() as i64
    }

    /// The full result as JSON, for attaching to a conversation entry.
    ///
    /// Prefers the body as received so key order and fields survive.
    pub fn to_value(&self) -> Value {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    review: &'a Review,
}

/// Anything that can classify a review.
///
/// [`ApiClient`] is the production implementation; tests substitute their own.
pub trait Classifier {
    /// Classify a single review.
    fn classify(
        &self,
        review: &Review,
    ) -> impl Future<Output = Result<PredictionResult, ClientError>> + Send;
}

/// Client for the classification service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// The base is used as given; resolve it through [`Config`] to get
    /// trailing-slash normalization.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Create a client from a resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base.clone())
    }

    /// The base URL requests are sent to.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Probe the liveness endpoint.
    pub async fn check_health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.url("health");
        debug!(%url, "checking service health");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        let body = read_body(response, status).await?;

        if !status.is_success() {
            let err = ClientError::status_text(status, body);
            warn!(status = status.as_u16(), error = %err, "health check failed");
            return Err(err);
        }

        parse_health(body)
    }

    /// Submit a review for classification.
    pub async fn predict(&self, review: &Review) -> Result<PredictionResult, ClientError> {
        let url = self.url("predict");
        debug!(%url, fields = review.as_map().len(), "submitting review");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&PredictRequest { review })
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        let body = read_body(response, status).await?;

        if !status.is_success() {
            let err = ClientError::from_detail(status, body);
            warn!(status = status.as_u16(), error = %err, "prediction failed");
            return Err(err);
        }

        parse_prediction(body)
    }
}

impl Classifier for ApiClient {
    fn classify(
        &self,
        review: &Review,
    ) -> impl Future<Output = Result<PredictionResult, ClientError>> + Send {
        self.predict(review)
    }
}

/// Read the response body. On error statuses an unreadable body is treated
/// as empty so the status still surfaces.
async fn read_body(response: reqwest::Response, status: StatusCode) -> Result<String, ClientError> {
    match response.text().await {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Ok(String::new()),
        Err(e) => Err(ClientError::Network(e)),
    }
}

/// Parse a success body; an empty body is an empty object.
fn parse_body<T: DeserializeOwned>(body: String) -> Result<T, ClientError> {
    let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
    serde_json::from_str(text).map_err(|source| ClientError::Decode { source, body })
}

/// Any JSON answer from `/health` means the service is up; only objects
/// carry fields worth reading.
fn parse_health(body: String) -> Result<HealthStatus, ClientError> {
    let value: Value = parse_body(body.clone())?;
    if !value.is_object() {
        debug!(%value, "health body is not an object");
        return Ok(HealthStatus::default());
    }
    serde_json::from_value(value).map_err(|source| ClientError::Decode { source, body })
}

fn parse_prediction(body: String) -> Result<PredictionResult, ClientError> {
    let raw: Value = parse_body(body.clone())?;
    let mut result: PredictionResult = serde_json::from_value(raw.clone())
        .map_err(|source| ClientError::Decode { source, body })?;
    result.raw = Some(raw);
    Ok(result)
}

/// Render an error followed by each distinct cause, joined by `": "`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Errors from talking to the classification service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Human-readable message.
        message: String,
        /// Raw response body, if any.
        body: Option<String>,
    },

    /// The request never completed (DNS, connection refused, TLS, ...).
    #[error("{}", error_chain(.0))]
    Network(#[source] reqwest::Error),

    /// A success response whose body is not the expected JSON.
    #[error("Invalid response from server: {source}")]
    Decode {
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
        /// Raw response body.
        body: String,
    },
}

impl ClientError {
    /// HTTP status, for transport errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode { .. } => None,
        }
    }

    /// Build a transport error from the status line and raw body:
    /// `HTTP 503 Service Unavailable: <body>`.
    fn status_text(status: StatusCode, body: String) -> Self {
        let mut message = format!("HTTP {}", status.as_u16());
        if let Some(reason) = status.canonical_reason() {
            message.push(' ');
            message.push_str(reason);
        }
        if !body.is_empty() {
            message.push_str(": ");
            message.push_str(&body);
        }
        Self::Transport {
            status: status.as_u16(),
            message,
            body: non_empty(body),
        }
    }

    /// Build a transport error preferring the server's `detail` field.
    fn from_detail(status: StatusCode, body: String) -> Self {
        let message = detail_message(&body)
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        Self::Transport {
            status: status.as_u16(),
            message,
            body: non_empty(body),
        }
    }
}

/// Extract `detail` from an error body. Strings are used verbatim; other
/// non-null values (e.g. validation error lists) are rendered as JSON.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn non_empty(body: String) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(decision: &str, confidence: Option<f64>) -> PredictionResult {
        PredictionResult {
            model: "m".into(),
            final_decision: decision.into(),
            confidence,
            explanation: None,
            features: None,
            llm_vote: None,
            extra: Map::new(),
            raw: None,
        }
    }

    #[test]
    fn test_confidence_percent_rounds() {
        assert_eq!(result("x", Some(0.873)).confidence_percent(), 87);
        assert_eq!(result("x", Some(0.875)).confidence_percent(), 88);
        assert_eq!(result("x", Some(1.0)).confidence_percent(), 100);
        assert_eq!(result("x", None).confidence_percent(), 0);
    }

    #[test]
    fn test_decision_label_uppercases() {
        assert_eq!(result("spam", Some(0.5)).decision_label(), "SPAM");
        assert_eq!(result("Relevant", Some(0.5)).decision_label(), "RELEVANT");
    }

    #[test]
    fn test_prediction_keeps_unknown_fields() {
        let body = r#"{
            "model": "gbdt+llm",
            "final_decision": "relevant",
            "confidence": 0.9,
            "explanation": "mentions food",
            "features": {"len": 22},
            "llm_vote": {"a": "relevant"},
            "latency_ms": 41
        }"#;
        let parsed = parse_prediction(body.to_string()).unwrap();
        assert_eq!(parsed.explanation.as_deref(), Some("mentions food"));
        assert_eq!(parsed.extra["latency_ms"], 41);

        let value = parsed.to_value();
        assert_eq!(value["features"]["len"], 22);
        assert_eq!(value["latency_ms"], 41);
        assert_eq!(value["final_decision"], "relevant");
    }

    #[test]
    fn test_prediction_attachment_is_body_as_sent() {
        let body = r#"{"final_decision":"spam","model":"m","zeta":1,"alpha":2}"#;
        let parsed = parse_prediction(body.to_string()).unwrap();

        assert_eq!(parsed.to_value().to_string(), body);
        assert_eq!(parsed.confidence_percent(), 0);
    }

    #[test]
    fn test_built_prediction_omits_absent_fields() {
        let mut built = result("spam", None);
        built.model = String::new();
        assert_eq!(
            built.to_value().to_string(),
            r#"{"final_decision":"spam"}"#
        );
    }

    #[test]
    fn test_prediction_requires_decision() {
        let err = parse_prediction(r#"{"model": "m"}"#.into()).unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[test]
    fn test_empty_health_body_is_empty_object() {
        let health = parse_health(String::new()).unwrap();
        assert_eq!(health, HealthStatus::default());
    }

    #[test]
    fn test_non_object_health_body_is_healthy() {
        for body in [r#""ok""#, "true", "[]"] {
            assert_eq!(parse_health(body.into()).unwrap(), HealthStatus::default());
        }
        assert!(matches!(
            parse_health("<html>".into()),
            Err(ClientError::Decode { .. })
        ));
    }

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_error_chain_appends_causes() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer(
                "client error (Connect)",
                Some(Box::new(Layer("Connection refused", None))),
            ))),
        );
        assert_eq!(
            error_chain(&err),
            "error sending request: client error (Connect): Connection refused"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_cause() {
        let err = Layer("tcp connect error: timed out", Some(Box::new(Layer("timed out", None))));
        assert_eq!(error_chain(&err), "tcp connect error: timed out");
    }

    #[test]
    fn test_health_keeps_extra_fields() {
        let health = parse_health(r#"{"model": "m1", "status": "ok"}"#.into()).unwrap();
        assert_eq!(health.model.as_deref(), Some("m1"));
        assert_eq!(health.extra["status"], "ok");
    }

    #[test]
    fn test_detail_preferred() {
        let err = ClientError::from_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "X"}"#.into(),
        );
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_detail_fallback() {
        for body in ["", "not json", r#"{"error": "boom"}"#, r#"{"detail": null}"#] {
            let err = ClientError::from_detail(StatusCode::INTERNAL_SERVER_ERROR, body.into());
            assert_eq!(err.to_string(), "request failed with status 500");
        }
    }

    #[test]
    fn test_structured_detail_rendered_as_json() {
        let err = ClientError::from_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"msg": "field required"}]}"#.into(),
        );
        assert_eq!(err.to_string(), r#"[{"msg":"field required"}]"#);
    }

    #[test]
    fn test_status_text_includes_body() {
        let err = ClientError::status_text(StatusCode::SERVICE_UNAVAILABLE, "warming up".into());
        assert_eq!(err.to_string(), "HTTP 503 Service Unavailable: warming up");
        match err {
            ClientError::Transport { body, .. } => assert_eq!(body.as_deref(), Some("warming up")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_text_without_body() {
        let err = ClientError::status_text(StatusCode::NOT_FOUND, String::new());
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
        match err {
            ClientError::Transport { body, .. } => assert!(body.is_none()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_url_joins_base() {
        let client = ApiClient::new("http://localhost:8000");
        assert_eq!(client.url("predict"), "http://localhost:8000/predict");
        assert_eq!(client.base(), "http://localhost:8000");
    }
}

//! HTTP implementation of the `Gateway` trait.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use gradebook_core::error::GatewayError;
use gradebook_core::model::{
    AuthPayload, Lecturer, LoginRequest, Marks, MarksInput, RegisterRequest, Student,
};
use gradebook_core::session::Session;
use gradebook_core::statistics::ClassAggregate;
use gradebook_core::traits::{ApiSuccess, Gateway, GatewayResult};

use crate::config::GatewayConfig;

/// Gateway speaking JSON over HTTP to the grading backend.
///
/// Adds `Authorization: Bearer <token>` whenever the shared [`Session`] holds
/// a token. Identifiers are percent-encoded as single path segments.
pub struct HttpGateway {
    base_url: Url,
    timeout_secs: u64,
    session: Session,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig, session: Session) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let base_url = Url::parse(config.normalized_base_url())
            .with_context(|| format!("invalid base URL: {}", config.base_url))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "base URL cannot carry a path: {}",
            config.base_url
        );

        Ok(Self {
            base_url,
            timeout_secs: config.timeout_secs,
            session,
            client,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Endpoint URL for `segments`, each pushed as one encoded segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, self.url(segments))
            .header("accept", "application/json");
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send a request and return the raw payload plus any top-level message.
    async fn execute_value(&self, req: RequestBuilder) -> GatewayResult<Value> {
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.timeout_secs)
            } else {
                GatewayError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = api_error(status.as_u16(), &text);
            tracing::debug!(status = status.as_u16(), code = err.code(), "backend returned an error");
            return Err(err);
        }

        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?
        };

        Ok(split_envelope(body))
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> GatewayResult<T> {
        let ApiSuccess { data, message } = self.execute_value(req).await?;
        let data = serde_json::from_value(data).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(ApiSuccess { data, message })
    }
}

/// Accept either `{"data": ..., "message": ...}` or a bare payload.
fn split_envelope(mut body: Value) -> ApiSuccess<Value> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    match body.as_object_mut().and_then(|obj| obj.remove("data")) {
        Some(data) => ApiSuccess { data, message },
        None => ApiSuccess {
            data: body,
            message,
        },
    }
}

/// Map a non-2xx response body to a gateway error.
fn api_error(status: u16, text: &str) -> GatewayError {
    let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };

    let error = field("error");
    let message = field("message");
    let code = field("code")
        .or_else(|| message.as_ref().and(error.clone()))
        .unwrap_or_else(|| format!("HTTP_{status}"));
    let message = message
        .or(error)
        .unwrap_or_else(|| format!("Request failed with status {status}"));

    GatewayError::Api {
        status,
        code,
        message,
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthPayload> {
        self.execute(self.request(Method::POST, &["auth", "login"]).json(request))
            .await
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthPayload> {
        self.execute(self.request(Method::POST, &["auth", "register"]).json(request))
            .await
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> GatewayResult<()> {
        let ApiSuccess { message, .. } = self
            .execute_value(self.request(Method::POST, &["auth", "logout"]))
            .await?;
        Ok(ApiSuccess { data: (), message })
    }

    #[instrument(skip(self))]
    async fn profile(&self) -> GatewayResult<Lecturer> {
        self.execute(self.request(Method::GET, &["auth", "profile"]))
            .await
    }

    #[instrument(skip(self))]
    async fn students_by_course(&self, course_id: &str) -> GatewayResult<Vec<Student>> {
        self.execute(self.request(Method::GET, &["students", "course", course_id]))
            .await
    }

    #[instrument(skip(self))]
    async fn student(&self, student_id: &str) -> GatewayResult<Student> {
        self.execute(self.request(Method::GET, &["students", student_id]))
            .await
    }

    #[instrument(skip(self, input), fields(student = %input.student_id))]
    async fn create_marks(&self, input: &MarksInput) -> GatewayResult<Marks> {
        self.execute(self.request(Method::POST, &["marks"]).json(input))
            .await
    }

    #[instrument(skip(self, input))]
    async fn update_marks(&self, marks_id: &str, input: &MarksInput) -> GatewayResult<Marks> {
        self.execute(
            self.request(Method::PUT, &["marks", marks_id])
                .json(input),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn marks_by_student(&self, student_id: &str) -> GatewayResult<Vec<Marks>> {
        self.execute(self.request(Method::GET, &["marks", "student", student_id]))
            .await
    }

    #[instrument(skip(self))]
    async fn marks_by_course(&self, course_id: &str) -> GatewayResult<Vec<Marks>> {
        self.execute(self.request(Method::GET, &["marks", "course", course_id]))
            .await
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn bulk_create_marks(&self, entries: &[MarksInput]) -> GatewayResult<Vec<Marks>> {
        let body = serde_json::json!({ "marks": entries });
        self.execute(self.request(Method::POST, &["marks", "bulk"]).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn course_statistics(&self, course_id: &str) -> GatewayResult<ClassAggregate> {
        self.execute(self.request(Method::GET, &["marks", "statistics", course_id]))
            .await
    }
}

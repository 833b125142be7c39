//! Tutor service — recognized LaTeX in, tutoring answer out.
//!
//! The service accepts `{input, submissionType}` and answers with
//! `{response, validation}`. A missing or empty `response` is an empty
//! result, not a failure; the orchestrator substitutes a fixed no-output
//! string.

#[cfg(test)]
#[path = "tutor_test.rs"]
mod tutor_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Submission-type tag for input that came from the drawing pad.
pub const SUBMISSION_DRAWING: &str = "drawing";

/// One tutoring call's payload.
#[derive(Debug, Clone, Serialize)]
pub struct TutorRequest {
    /// The LaTeX expression to tutor on.
    pub input: String,
    #[serde(rename = "submissionType")]
    pub submission_type: String,
}

impl TutorRequest {
    #[must_use]
    pub fn new(input: impl Into<String>, submission_type: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            submission_type: submission_type.into(),
        }
    }
}

/// The tutor's answer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TutorReply {
    #[serde(default)]
    pub response: Option<String>,
    /// Validation detail attached alongside the answer; carried as-is.
    #[serde(default)]
    pub validation: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("missing environment variable {var}")]
    MissingEnv { var: String },
    #[error("tutor request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("tutor service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// The tutoring collaborator. The orchestrator is generic over this so
/// tests substitute scripted services.
#[allow(async_fn_in_trait)]
pub trait Tutor {
    async fn advise(&self, request: TutorRequest) -> Result<TutorReply, TutorError>;
}

/// HTTP-backed tutor client.
pub struct TutorClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TutorClient {
    /// # Errors
    ///
    /// Returns [`TutorError::Http`] if the HTTP client fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TutorError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Build a client from the `TUTOR_URL` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`TutorError::MissingEnv`] when the variable is absent, or
    /// [`TutorError::Http`] if the client fails to build.
    pub fn from_env() -> Result<Self, TutorError> {
        let endpoint = std::env::var("TUTOR_URL").map_err(|_| TutorError::MissingEnv {
            var: "TUTOR_URL".to_owned(),
        })?;
        Self::new(endpoint)
    }
}

impl Tutor for TutorClient {
    async fn advise(&self, request: TutorRequest) -> Result<TutorReply, TutorError> {
        tracing::debug!(endpoint = %self.endpoint, submission_type = %request.submission_type, "tutor request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TutorError::Status(status));
        }

        Ok(response.json::<TutorReply>().await?)
    }
}

//! Recognition service — drawing snapshot in, structured math out.
//!
//! The service accepts a JSON body of `{src, formats, data_options}` where
//! `src` is a base64 PNG data URL, authenticated by `app_id`/`app_key`
//! headers, and answers with one string field per requested format.
//! `latex_styled` is the canonical format the rest of the pipeline
//! consumes; everything else is pass-through.

#[cfg(test)]
#[path = "recognition_test.rs"]
mod recognition_test;

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// The response field the pipeline requires.
pub const FORMAT_LATEX_STYLED: &str = "latex_styled";

/// Auxiliary recognition options forwarded verbatim to the service.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DataOptions {
    pub include_asciimath: bool,
}

/// One recognition call's payload.
#[derive(Debug, Clone, Serialize)]
pub struct RecognitionRequest {
    /// Base64 PNG data URL of the drawing surface.
    pub src: String,
    /// Requested output formats; `latex_styled` is always ensured present.
    pub formats: Vec<String>,
    pub data_options: DataOptions,
}

impl RecognitionRequest {
    /// The request the drawing pipeline sends: plain text plus styled
    /// LaTeX, with asciimath detection enabled.
    #[must_use]
    pub fn for_drawing(src: String) -> Self {
        Self {
            src,
            formats: vec!["text".to_owned(), FORMAT_LATEX_STYLED.to_owned()],
            data_options: DataOptions {
                include_asciimath: true,
            },
        }
    }

    /// Append `latex_styled` to the requested formats if absent.
    pub fn ensure_latex_styled(&mut self) {
        if !self.formats.iter().any(|f| f == FORMAT_LATEX_STYLED) {
            self.formats.push(FORMAT_LATEX_STYLED.to_owned());
        }
    }
}

/// A successful recognition, keyed on the canonical LaTeX rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    /// Every string-valued field of the service response, by format name.
    pub raw_formats: BTreeMap<String, String>,
    /// The `latex_styled` rendition.
    pub latex: String,
}

impl RecognitionResult {
    /// Build a result from a service response body.
    ///
    /// # Errors
    ///
    /// [`RecognitionError::MissingLatex`] when the body is not an object or
    /// lacks a string `latex_styled` field.
    pub fn from_response(body: &serde_json::Value) -> Result<Self, RecognitionError> {
        let map = body.as_object().ok_or(RecognitionError::MissingLatex)?;
        let mut raw_formats = BTreeMap::new();
        for (key, value) in map {
            if let Some(text) = value.as_str() {
                raw_formats.insert(key.clone(), text.to_owned());
            }
        }
        let latex = raw_formats
            .get(FORMAT_LATEX_STYLED)
            .cloned()
            .ok_or(RecognitionError::MissingLatex)?;
        Ok(Self { raw_formats, latex })
    }
}

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("missing environment variable {var}")]
    MissingEnv { var: String },
    #[error("recognition request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("recognition service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("recognition response is missing the latex_styled field")]
    MissingLatex,
}

/// The recognition collaborator. The orchestrator is generic over this so
/// tests substitute scripted services.
#[allow(async_fn_in_trait)]
pub trait Recognizer {
    async fn recognize(
        &self,
        request: RecognitionRequest,
    ) -> Result<RecognitionResult, RecognitionError>;
}

/// HTTP-backed recognition client.
pub struct RecognitionClient {
    http: reqwest::Client,
    endpoint: String,
    app_id: String,
    app_key: String,
}

impl RecognitionClient {
    /// # Errors
    ///
    /// Returns [`RecognitionError::Http`] if the HTTP client fails to build.
    pub fn new(
        endpoint: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Result<Self, RecognitionError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            endpoint: endpoint.into(),
            app_id: app_id.into(),
            app_key: app_key.into(),
        })
    }

    /// Build a client from environment variables.
    ///
    /// - `RECOGNITION_URL`: service endpoint
    /// - `RECOGNITION_APP_ID` / `RECOGNITION_APP_KEY`: credentials
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::MissingEnv`] naming the first absent
    /// variable, or [`RecognitionError::Http`] if the client fails to build.
    pub fn from_env() -> Result<Self, RecognitionError> {
        let endpoint = env_var("RECOGNITION_URL")?;
        let app_id = env_var("RECOGNITION_APP_ID")?;
        let app_key = env_var("RECOGNITION_APP_KEY")?;
        Self::new(endpoint, app_id, app_key)
    }
}

impl Recognizer for RecognitionClient {
    async fn recognize(
        &self,
        mut request: RecognitionRequest,
    ) -> Result<RecognitionResult, RecognitionError> {
        request.ensure_latex_styled();
        tracing::debug!(endpoint = %self.endpoint, formats = ?request.formats, "recognition request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("app_id", &self.app_id)
            .header("app_key", &self.app_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognitionError::Status(status));
        }

        let body = response.json::<serde_json::Value>().await?;
        RecognitionResult::from_response(&body)
    }
}

fn env_var(var: &'static str) -> Result<String, RecognitionError> {
    std::env::var(var).map_err(|_| RecognitionError::MissingEnv {
        var: var.to_owned(),
    })
}

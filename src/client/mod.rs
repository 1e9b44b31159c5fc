// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the classification backend.
//!
//! The backend exposes four endpoints:
//!
//! - `POST /predict` (multipart, field `file`) returns an [`AnalysisResult`]
//! - `GET /examples` lists the example gallery
//! - `POST /set_language` stores the UI language in the server session and
//!   answers with localized texts, including a description of the model
//! - `GET <example url>` serves the example images themselves
//!
//! The client keeps a cookie store so that the session language set through
//! `/set_language` applies to later predictions.

pub mod types;

pub use types::{AnalysisResult, ExampleEntry, FetchedImage, ModelDetails};

use crate::error::AnalysisError;
use crate::i18n::Language;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use std::fmt;
use std::time::Duration;
use types::{
    ErrorResponse, ExamplesResponse, PredictResponse, SetLanguageRequest, SetLanguageResponse,
};

/// Error type for backend requests.
///
/// Payloads are strings so the error can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The base URL or a server-provided URL could not be parsed.
    InvalidUrl(String),
    /// The request could not be sent or the body could not be read.
    Network(String),
    /// Non-2xx status, with the server's `error` string when it sent one.
    Status { status: u16, message: Option<String> },
    /// 2xx response whose body reports failure.
    Rejected(Option<String>),
    /// The body is not the expected payload.
    Malformed(String),
    /// A download exceeded the allowed size.
    TooLarge { limit: usize },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            ClientError::Network(e) => write!(f, "Network error: {}", e),
            ClientError::Status { status, message } => match message {
                Some(message) => write!(f, "Server error ({}): {}", status, message),
                None => write!(f, "Server error ({})", status),
            },
            ClientError::Rejected(Some(message)) => write!(f, "Rejected: {}", message),
            ClientError::Rejected(None) => write!(f, "Rejected without reason"),
            ClientError::Malformed(e) => write!(f, "Malformed response: {}", e),
            ClientError::TooLarge { limit } => {
                write!(f, "Response larger than {} bytes", limit)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Malformed(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<ClientError> for AnalysisError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::InvalidUrl(_) | ClientError::Network(_) => AnalysisError::NetworkFailure,
            ClientError::Status {
                message: Some(message),
                ..
            }
            | ClientError::Rejected(Some(message)) => AnalysisError::BackendRejected(message),
            ClientError::Status { message: None, .. }
            | ClientError::Rejected(None)
            | ClientError::Malformed(_)
            | ClientError::TooLarge { .. } => AnalysisError::MalformedResponse,
        }
    }
}

/// Image payload for `POST /predict`.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Encoded image. Cloning shares the buffer.
    pub bytes: Bytes,
    pub filename: String,
    pub mime: String,
}

/// Client for the classification backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    base_url: Url,
}

impl PredictionClient {
    /// Builds a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(concat!("SkinLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a server-provided URL the way a browser would: absolute URLs
    /// are kept, paths are taken relative to the base URL.
    pub fn resolve_url(&self, url: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(url)
            .map_err(|_| ClientError::InvalidUrl(url.to_string()))
    }

    /// Sends one image for classification.
    pub async fn predict(&self, upload: Upload) -> Result<AnalysisResult, ClientError> {
        let length = upload.bytes.len() as u64;
        let part = Part::stream_with_length(upload.bytes, length)
            .file_name(upload.filename)
            .mime_str(&upload.mime)
            .map_err(|e| ClientError::Malformed(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.resolve_url("predict")?)
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.bytes().await?;
        let payload: PredictResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::Malformed(e.to_string()))?;

        if !payload.success {
            return Err(ClientError::Rejected(non_blank(payload.error)));
        }

        let value = payload
            .result
            .ok_or_else(|| ClientError::Malformed("missing result".to_string()))?;
        let result: AnalysisResult =
            serde_json::from_value(value).map_err(|e| ClientError::Malformed(e.to_string()))?;
        if !result.is_well_formed() {
            return Err(ClientError::Malformed("non-finite probability".to_string()));
        }

        tracing::info!(
            name = %result.name,
            confidence = result.confidence,
            "prediction received"
        );
        Ok(result)
    }

    /// Lists the example gallery with every URL resolved.
    ///
    /// Entries whose URL cannot be resolved are skipped.
    pub async fn examples(&self) -> Result<Vec<ExampleEntry>, ClientError> {
        let response = self.http.get(self.resolve_url("examples")?).send().await?;
        let response = check_status(response).await?;
        let payload: ExamplesResponse = response.json().await?;

        let entries = payload
            .examples
            .into_iter()
            .filter_map(|entry| match self.resolve_url(&entry.url) {
                Ok(url) => Some(ExampleEntry {
                    url: url.to_string(),
                    class_name: entry.class_name,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping example with invalid url");
                    None
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = entries.len(), "examples loaded");
        Ok(entries)
    }

    /// Stores `language` in the server session.
    ///
    /// Returns the server's model description in that language, when the
    /// reply contains one.
    pub async fn set_language(
        &self,
        language: Language,
    ) -> Result<Option<ModelDetails>, ClientError> {
        let response = self
            .http
            .post(self.resolve_url("set_language")?)
            .json(&SetLanguageRequest {
                lang: language.code(),
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        let payload: SetLanguageResponse = response.json().await?;

        if !payload.success {
            return Err(ClientError::Rejected(None));
        }
        Ok(payload
            .translations
            .model_info_text
            .as_deref()
            .and_then(ModelDetails::from_markup))
    }

    /// Downloads an image, refusing bodies larger than `max_bytes`.
    pub async fn fetch_image(&self, url: &str, max_bytes: usize) -> Result<FetchedImage, ClientError> {
        let response = self.http.get(self.resolve_url(url)?).send().await?;
        let response = check_status(response).await?;

        if response.content_length().is_some_and(|len| len > max_bytes as u64) {
            return Err(ClientError::TooLarge { limit: max_bytes });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .split(';')
                    .next()
                    .unwrap_or(value)
                    .trim()
                    .to_ascii_lowercase()
            })
            .filter(|value| !value.is_empty());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ClientError::TooLarge { limit: max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

/// Parses the base URL, making sure relative endpoint paths are appended to
/// it rather than replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|_| ClientError::InvalidUrl(trimmed.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(trimmed.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turns a non-2xx response into [`ClientError::Status`].
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
            .ok()
            .and_then(|body| non_blank(body.error)),
        Err(_) => None,
    };
    tracing::warn!(status = status.as_u16(), message = ?message, "backend returned an error status");

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

fn non_blank(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

#![warn(missing_docs)]
//! # swing-upload
//!
//! ## Purpose
//! Implements the boundary between the client and the external swing analysis
//! service.
//!
//! ## Responsibilities
//! - Validate candidate video files (type and size limits).
//! - Resolve the backend base URL from the environment.
//! - Upload a video through an injectable transport and normalize the reply.
//! - Support cooperative cancellation of the in-flight request.
//!
//! ## Data flow
//! [`VideoUpload`] -> [`AnalysisClient::analyze`] -> [`AnalysisTransport::send`]
//! (`POST {base}/analyze`, multipart field `file`) -> status/body checks ->
//! `swing_analysis_contract::parse_analysis_response` -> [`AnalysisResult`].
//!
//! ## Ownership and lifetimes
//! Uploads own their bytes so a transport can build request bodies without
//! borrowing from caller buffers across await points.
//!
//! ## Error model
//! Every boundary failure maps to one [`AnalysisRequestError`] variant;
//! [`classify_request_error`] tells callers which ones warrant the local
//! fallback and which are terminal.
//!
//! ## Security and privacy notes
//! Endpoint URLs are logged through [`redacted_endpoint`], which strips
//! embedded credentials. Video bytes are never logged.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use swing_analysis_contract::{AnalysisContractError, parse_analysis_response};
use swing_core::{AnalysisResult, human_file_size};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};
use url::Url;

/// Path appended to the backend base URL.
pub const ANALYZE_PATH: &str = "/analyze";

/// Multipart field carrying the video.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Largest accepted upload (200 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Accepted MIME types.
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["video/mp4", "video/quicktime"];

/// Accepted file name extensions, used when the MIME type is absent or wrong.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".mp4", ".mov"];

/// Primary environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "SWING_API_BASE";

/// Secondary environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "SWING_BACKEND_URL";

/// Metadata describing one candidate video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// File name as chosen by the user.
    pub name: String,
    /// Reported MIME type, if any.
    pub content_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl VideoFile {
    /// Creates file metadata, inferring the MIME type from the extension when
    /// `content_type` is `None`.
    pub fn new(name: impl Into<String>, content_type: Option<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let content_type =
            content_type.or_else(|| content_type_for_name(&name).map(str::to_string));
        Self {
            name,
            content_type,
            size_bytes,
        }
    }
}

/// Checks that `file` is an MP4/MOV video within the size limit.
///
/// The MIME type is preferred, but a matching extension is also accepted since
/// some sources misreport video types.
///
/// # Errors
/// Returns [`UploadValidationError::UnsupportedType`] for other formats.
/// Returns [`UploadValidationError::TooLarge`] above [`MAX_UPLOAD_BYTES`].
pub fn validate_video_file(file: &VideoFile) -> Result<(), UploadValidationError> {
    let type_ok = file
        .content_type
        .as_deref()
        .is_some_and(|content_type| ACCEPTED_CONTENT_TYPES.contains(&content_type));
    let name = file.name.to_lowercase();
    let extension_ok = ACCEPTED_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension));

    if !type_ok && !extension_ok {
        return Err(UploadValidationError::UnsupportedType {
            name: file.name.clone(),
        });
    }

    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadValidationError::TooLarge {
            size_bytes: file.size_bytes,
            size_label: human_file_size(file.size_bytes),
        });
    }

    Ok(())
}

/// Infers a MIME type from an accepted extension.
pub fn content_type_for_name(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    if name.ends_with(".mp4") {
        Some("video/mp4")
    } else if name.ends_with(".mov") {
        Some("video/quicktime")
    } else {
        None
    }
}

/// Video selected for analysis, with its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUpload {
    /// File metadata; `size_bytes` always equals `bytes.len()`.
    pub file: VideoFile,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl VideoUpload {
    /// Builds an upload from in-memory bytes.
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let file = VideoFile::new(name, content_type, bytes.len() as u64);
        Self { file, bytes }
    }

    /// Validates the upload metadata.
    ///
    /// # Errors
    /// See [`validate_video_file`].
    pub fn validate(&self) -> Result<(), UploadValidationError> {
        validate_video_file(&self.file)
    }
}

/// Resolved analysis backend location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    analyze_url: Url,
}

impl BackendConfig {
    /// Builds config from a base URL, stripping trailing slashes.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyBaseUrl`] when nothing but slashes or
    /// whitespace remains, and [`ConfigError::InvalidBaseUrl`] when the
    /// endpoint cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let analyze_url = Url::parse(&format!("{base_url}{ANALYZE_PATH}")).map_err(|source| {
            ConfigError::InvalidBaseUrl {
                value: base_url.to_string(),
                source,
            }
        })?;

        Ok(Self {
            base_url: base_url.to_string(),
            analyze_url,
        })
    }

    /// Resolves config from process environment variables.
    ///
    /// Returns `Ok(None)` when neither [`API_BASE_ENV`] nor [`BACKEND_URL_ENV`]
    /// holds a usable value, which selects demo mode.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] for an unparseable URL.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves config through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] for an unparseable URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match resolve_base_url(lookup) {
            Some(base_url) => Self::new(&base_url).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the normalized base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full analysis endpoint.
    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }
}

/// Returns the first non-empty base URL among [`API_BASE_ENV`] and
/// [`BACKEND_URL_ENV`], trimmed and without trailing slashes.
pub fn resolve_base_url<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    [API_BASE_ENV, BACKEND_URL_ENV]
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(|value| value.trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

/// Renders `url` for logs with any user/password component removed.
pub fn redacted_endpoint(url: &Url) -> String {
    let mut redacted = url.clone();
    if !redacted.username().is_empty() || redacted.password().is_some() {
        // Only fails for cannot-be-a-base URLs, which carry no credentials.
        let _ = redacted.set_username("");
        let _ = redacted.set_password(None);
    }
    redacted.to_string()
}

/// Caller side of a cancellation signal.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Creates a handle that has not been cancelled.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Returns a token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            receiver: self.sender.subscribe(),
        }
    }

    /// Signals cancellation to every token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns `true` once [`CancelHandle::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    /// Returns `true` when cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once cancellation is requested.
    ///
    /// Never completes if the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        let handle_dropped = receiver.wait_for(|cancelled| *cancelled).await.is_err();
        if handle_dropped {
            std::future::pending::<()>().await;
        }
    }
}

/// Raw reply from the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the analysis client.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Posts `upload` as multipart form data to `endpoint`.
    ///
    /// Implementations return non-2xx replies as responses, reserving errors
    /// for failures to exchange a response at all.
    async fn send(
        &self,
        endpoint: &Url,
        upload: &VideoUpload,
    ) -> Result<TransportResponse, AnalysisRequestError>;
}

/// [`AnalysisTransport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalysisTransport for ReqwestTransport {
    async fn send(
        &self,
        endpoint: &Url,
        upload: &VideoUpload,
    ) -> Result<TransportResponse, AnalysisRequestError> {
        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file.name.clone());
        if let Some(content_type) = upload.file.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|error| {
                AnalysisRequestError::Transport(format!("invalid content type: {error}"))
            })?;
        }
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|error| AnalysisRequestError::Transport(error.to_string()))?;

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(error) if (200..300).contains(&status) => {
                return Err(AnalysisRequestError::Transport(format!(
                    "failed to read response body: {error}"
                )));
            }
            // Error bodies are diagnostics only.
            Err(_) => Vec::new(),
        };

        Ok(TransportResponse { status, body })
    }
}

/// Client for the swing analysis service.
#[derive(Clone)]
pub struct AnalysisClient {
    config: Option<BackendConfig>,
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalysisClient {
    /// Creates a client; `None` config means no backend is available.
    pub fn new(config: Option<BackendConfig>, transport: Arc<dyn AnalysisTransport>) -> Self {
        Self { config, transport }
    }

    /// Creates a client using [`ReqwestTransport`].
    pub fn with_reqwest(config: Option<BackendConfig>) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()))
    }

    /// Returns `true` when a backend base URL is configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Returns the resolved backend config.
    pub fn config(&self) -> Option<&BackendConfig> {
        self.config.as_ref()
    }

    /// Uploads `upload` and normalizes the service reply.
    ///
    /// When `cancel` fires before or during the request, the call returns
    /// [`AnalysisRequestError::Cancelled`] without normalizing anything.
    ///
    /// # Errors
    /// - [`AnalysisRequestError::NoBackendConfigured`] without a base URL.
    /// - [`AnalysisRequestError::Cancelled`] on cancellation.
    /// - [`AnalysisRequestError::Transport`] when no response was exchanged.
    /// - [`AnalysisRequestError::Http`] for non-2xx statuses.
    /// - [`AnalysisRequestError::MalformedResponse`] for non-JSON bodies.
    /// - [`AnalysisRequestError::InvalidPayload`] for JSON that is not an object.
    pub async fn analyze(
        &self,
        upload: &VideoUpload,
        cancel: Option<&CancelToken>,
    ) -> Result<AnalysisResult, AnalysisRequestError> {
        let config = self
            .config
            .as_ref()
            .ok_or(AnalysisRequestError::NoBackendConfigured)?;

        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(AnalysisRequestError::Cancelled);
        }

        let endpoint = config.analyze_url();
        info!(
            endpoint = %redacted_endpoint(endpoint),
            file = %upload.file.name,
            size_bytes = upload.file.size_bytes,
            "dispatching analysis request"
        );

        let request = self.transport.send(endpoint, upload);
        let response = match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(AnalysisRequestError::Cancelled),
                response = request => response?,
            },
            None => request.await?,
        };

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            warn!(status = response.status, "analysis service returned an error status");
            return Err(AnalysisRequestError::Http {
                status: response.status,
                body,
            });
        }

        Ok(parse_analysis_response(&response.body)?)
    }
}

/// How the caller should react to a failed analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Continue with the deterministic local result.
    Fallback,
    /// Stop; the user ended the attempt.
    Terminal,
}

/// Classifies request failures for fallback routing.
pub fn classify_request_error(error: &AnalysisRequestError) -> FailureClass {
    match error {
        AnalysisRequestError::Cancelled => FailureClass::Terminal,
        AnalysisRequestError::NoBackendConfigured
        | AnalysisRequestError::Http { .. }
        | AnalysisRequestError::MalformedResponse(_)
        | AnalysisRequestError::InvalidPayload(_)
        | AnalysisRequestError::Transport(_) => FailureClass::Fallback,
    }
}

/// Upload validation failures, worded for direct display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadValidationError {
    /// Neither MIME type nor extension identifies an MP4/MOV video.
    #[error("Please choose an MP4 or MOV video.")]
    UnsupportedType {
        /// Rejected file name.
        name: String,
    },
    /// File exceeds [`MAX_UPLOAD_BYTES`].
    #[error("File too large ({size_label}). Max is 200 MB.")]
    TooLarge {
        /// Actual file size.
        size_bytes: u64,
        /// Human-readable file size.
        size_label: String,
    },
}

/// Backend configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL is blank after normalization.
    #[error("backend base url is empty")]
    EmptyBaseUrl,
    /// Base URL could not be parsed.
    #[error("invalid backend base url '{value}': {source}")]
    InvalidBaseUrl {
        /// Normalized base URL value.
        value: String,
        /// Parser failure.
        source: url::ParseError,
    },
}

/// Analysis request failures.
#[derive(Debug, Error)]
pub enum AnalysisRequestError {
    /// No backend base URL was configured.
    #[error("no backend configured")]
    NoBackendConfigured,
    /// Service answered with a non-2xx status.
    #[error("request failed ({status})")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text, possibly empty.
        body: String,
    },
    /// Response body was not JSON.
    #[error("failed to parse JSON response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
    /// Response JSON was not an object.
    #[error("{0}")]
    InvalidPayload(#[source] AnalysisContractError),
    /// No response could be exchanged with the service.
    #[error("analysis transport failure: {0}")]
    Transport(String),
    /// Caller cancelled the in-flight request.
    #[error("analysis cancelled")]
    Cancelled,
}

impl From<AnalysisContractError> for AnalysisRequestError {
    fn from(error: AnalysisContractError) -> Self {
        match error {
            AnalysisContractError::Decode(source) => AnalysisRequestError::MalformedResponse(source),
            other => AnalysisRequestError::InvalidPayload(other),
        }
    }
}

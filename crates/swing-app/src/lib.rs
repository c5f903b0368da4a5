#![warn(missing_docs)]
//! # swing-app
//!
//! ## Purpose
//! Orchestrates upload validation, backend analysis, deterministic fallback
//! and UI state for the swing analyzer.
//!
//! ## Responsibilities
//! - Load and validate a video from disk.
//! - Run one analysis attempt, falling back to the demo result on boundary
//!   failures and stopping on cancellation.
//! - Project outcomes into [`UiState`] and render a text report.
//!
//! ## Data flow
//! Path -> [`probe_video_file`] / [`load_upload`] -> [`analyze_with_fallback`]
//! (or [`fallback_for_config_error`]) -> [`AnalysisOutcome`] -> [`apply_outcome`]
//! -> [`render_report`].
//!
//! ## Ownership and lifetimes
//! Outcomes own their results so the UI state can keep them after the request
//! future is gone.
//!
//! ## Error model
//! Setup failures (I/O, validation, configuration) are wrapped in
//! [`AppError`]. Analysis failures never surface as errors: they become a demo
//! result plus advisory, or a cancelled outcome.

use std::path::{Path, PathBuf};

use swing_core::AnalysisResult;
use swing_demo::generate_fallback;
use swing_ui::{ResultsPanel, UiState};
use swing_upload::{
    AnalysisClient, AnalysisRequestError, CancelToken, ConfigError, FailureClass,
    UploadValidationError, VideoFile, VideoUpload, classify_request_error,
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("SWING_ANALYZER_VERSION");

/// Message shown when the user cancels an attempt.
pub const CANCELLED_MESSAGE: &str = "Analysis cancelled.";

/// Advisory shown when the client reports no backend.
pub const NO_BACKEND_ADVISORY: &str = "No backend configured. Using Demo Analysis.";

/// Advisory shown when the backend call failed.
pub const REQUEST_FAILED_ADVISORY: &str = "Request failed. Using Demo Analysis.";

/// Result of one analysis attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// A result is available, possibly from the fallback generator.
    Completed {
        /// Canonical result.
        result: AnalysisResult,
        /// Non-blocking advisory when the fallback replaced a failed request.
        advisory: Option<String>,
    },
    /// The user cancelled; no result was produced.
    Cancelled {
        /// User-facing message.
        message: String,
    },
}

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Returns `true` when endpoint URL is HTTPS.
pub fn is_https_endpoint(endpoint: &str) -> bool {
    Url::parse(endpoint)
        .map(|url| url.scheme() == "https")
        .unwrap_or(false)
}

/// Returns the advisory for a failure that falls back to the demo result, or
/// `None` for terminal failures.
pub fn advisory_for(error: &AnalysisRequestError) -> Option<&'static str> {
    match classify_request_error(error) {
        FailureClass::Terminal => None,
        FailureClass::Fallback => match error {
            AnalysisRequestError::NoBackendConfigured => Some(NO_BACKEND_ADVISORY),
            _ => Some(REQUEST_FAILED_ADVISORY),
        },
    }
}

/// Runs one analysis attempt.
///
/// Without a configured backend the demo result is returned directly. With a
/// backend, failures other than cancellation fall back to the demo result with
/// an advisory. Cancellation ends the attempt without any result.
pub async fn analyze_with_fallback(
    client: &AnalysisClient,
    upload: &VideoUpload,
    cancel: Option<&CancelToken>,
) -> AnalysisOutcome {
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return cancelled();
    }

    if !client.is_configured() {
        info!(file = %upload.file.name, "no backend configured; using demo analysis");
        return AnalysisOutcome::Completed {
            result: generate_fallback(&upload.file.name),
            advisory: None,
        };
    }

    match client.analyze(upload, cancel).await {
        Ok(result) => AnalysisOutcome::Completed {
            result,
            advisory: None,
        },
        Err(error) => match advisory_for(&error) {
            Some(advisory) => {
                warn!(%error, "analysis request failed; using demo analysis");
                AnalysisOutcome::Completed {
                    result: generate_fallback(&upload.file.name),
                    advisory: Some(advisory.to_string()),
                }
            }
            None => {
                info!("analysis cancelled by user");
                cancelled()
            }
        },
    }
}

/// Resolves an attempt whose configured backend URL could not be parsed.
///
/// This is treated like an unreachable backend: the demo result is returned
/// with the request-failed advisory, unless the attempt was already cancelled.
pub fn fallback_for_config_error(
    upload: &VideoUpload,
    error: &ConfigError,
    cancel: Option<&CancelToken>,
) -> AnalysisOutcome {
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return cancelled();
    }

    warn!(%error, "backend url is unusable; using demo analysis");
    AnalysisOutcome::Completed {
        result: generate_fallback(&upload.file.name),
        advisory: Some(REQUEST_FAILED_ADVISORY.to_string()),
    }
}

fn cancelled() -> AnalysisOutcome {
    AnalysisOutcome::Cancelled {
        message: CANCELLED_MESSAGE.to_string(),
    }
}

/// Applies an outcome to UI state.
pub fn apply_outcome(state: &mut UiState, outcome: &AnalysisOutcome) {
    match outcome {
        AnalysisOutcome::Completed { result, advisory } => {
            state.apply_result(result.clone(), advisory.clone());
        }
        AnalysisOutcome::Cancelled { message } => state.apply_cancelled(message.clone()),
    }
}

/// Reads file metadata for validation without loading the contents.
///
/// # Errors
/// Returns [`AppError::Io`] when the file cannot be inspected.
pub async fn probe_video_file(
    path: &Path,
    content_type: Option<String>,
) -> Result<VideoFile, AppError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(VideoFile::new(file_name_of(path), content_type, metadata.len()))
}

/// Validates and loads a video from disk.
///
/// Size and type are checked before the contents are read.
///
/// # Errors
/// Returns [`AppError::Validation`] for unsupported or oversized files and
/// [`AppError::Io`] for read failures.
pub async fn load_upload(
    path: &Path,
    content_type: Option<String>,
) -> Result<VideoUpload, AppError> {
    let file = probe_video_file(path, content_type).await?;
    swing_upload::validate_video_file(&file)?;

    let bytes = tokio::fs::read(path).await.map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(VideoUpload::new(file.name, file.content_type, bytes))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Renders the UI state as a plain-text report.
pub fn render_report(state: &UiState) -> String {
    let mut lines = vec![format!("mode: {}", state.mode.label())];
    if let Some(summary) = state.file_summary() {
        lines.push(format!("file: {summary}"));
    }

    match state.results_panel() {
        ResultsPanel::Empty => lines.push("no analysis yet".to_string()),
        ResultsPanel::Loading => lines.push("analyzing video...".to_string()),
        ResultsPanel::Failed(message) => lines.push(message),
        ResultsPanel::Ready(view) => {
            lines.push(format!("direction: {}", view.direction));
            lines.push(format!("angle: {}", view.angle));
            lines.push(format!("speed: {}", view.speed));
            lines.push(format!("feedback: {}", view.feedback));
            if !state.error_message.is_empty() {
                lines.push(format!("note: {}", state.error_message));
            }
        }
    }

    lines.join("\n")
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Selected file failed validation.
    #[error("{0}")]
    Validation(#[from] UploadValidationError),
    /// File system failure.
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Output encoding failure.
    #[error("output encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
}

#![warn(missing_docs)]
//! # swing-ui
//!
//! ## Purpose
//! Defines the UI-facing state model for the swing analyzer, independent of
//! any rendering toolkit.
//!
//! ## Responsibilities
//! - Track the selected file, loading flag, latest result and messages.
//! - Guard when analysis may start.
//! - Project the latest result into display-ready text.
//!
//! ## Data flow
//! File selection and analysis outcomes mutate [`UiState`]; front ends render
//! [`UiState::results_panel`] and the mode notes.
//!
//! ## Ownership and lifetimes
//! `UiState` owns every string and result so reducers never borrow from
//! in-flight requests.
//!
//! ## Error model
//! Invalid files are reported as [`UploadValidationError`] and mirrored into
//! the visible error message; everything else is explicit state.

use swing_core::{
    AnalysisResult, DEFAULT_SPEED_UNIT, ResultSource, format_angle, format_speed,
    human_file_size,
};
use swing_upload::{
    API_BASE_ENV, BACKEND_URL_ENV, UploadValidationError, VideoFile, validate_video_file,
};

/// Shown when a result carries no feedback.
pub const EMPTY_FEEDBACK_TEXT: &str =
    "No additional feedback was provided. Try another clip for more context.";

/// Where results are currently coming from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Results come from the configured analysis service.
    Backend,
    /// Results are generated locally.
    Demo,
}

impl AnalysisMode {
    /// Mode implied by backend availability.
    pub fn for_backend(backend_configured: bool) -> Self {
        if backend_configured {
            AnalysisMode::Backend
        } else {
            AnalysisMode::Demo
        }
    }

    /// Short lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::Backend => "backend",
            AnalysisMode::Demo => "demo",
        }
    }

    /// Explanatory note shown next to the analyze action.
    pub fn note(self) -> &'static str {
        match self {
            AnalysisMode::Backend => "Backend configured. Results will be fetched from your API.",
            AnalysisMode::Demo => {
                "Demo mode active. Results are generated locally if backend isn't configured or fails."
            }
        }
    }
}

impl From<ResultSource> for AnalysisMode {
    fn from(source: ResultSource) -> Self {
        match source {
            ResultSource::Backend => AnalysisMode::Backend,
            ResultSource::Demo => AnalysisMode::Demo,
        }
    }
}

/// Display-ready projection of one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Direction label.
    pub direction: String,
    /// Angle text, e.g. `24°`.
    pub angle: String,
    /// Speed text with unit, e.g. `79 mph`.
    pub speed: String,
    /// Feedback text, never empty.
    pub feedback: String,
}

impl ResultView {
    /// Projects `result` using `speed_unit` for the speed badge.
    pub fn new(result: &AnalysisResult, speed_unit: &str) -> Self {
        let feedback = if result.feedback.is_empty() {
            EMPTY_FEEDBACK_TEXT.to_string()
        } else {
            result.feedback.clone()
        };

        Self {
            direction: result.direction.to_string(),
            angle: format_angle(result.angle),
            speed: format_speed(result.speed, speed_unit),
            feedback,
        }
    }
}

/// What the results area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPanel {
    /// Nothing analyzed yet.
    Empty,
    /// Analysis in progress.
    Loading,
    /// Attempt ended without a result.
    Failed(String),
    /// Latest result.
    Ready(ResultView),
}

/// Aggregate UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// App version string.
    pub version: String,
    /// Whether a backend base URL was resolved at startup.
    pub backend_configured: bool,
    /// Current result mode.
    pub mode: AnalysisMode,
    /// Selected, validated file.
    pub file: Option<VideoFile>,
    /// Whether an analysis attempt is running.
    pub is_loading: bool,
    /// Latest result.
    pub result: Option<AnalysisResult>,
    /// Visible error or advisory text, empty when none.
    pub error_message: String,
    /// Unit appended to speed values.
    pub speed_unit: String,
}

impl UiState {
    /// Creates the initial state.
    pub fn new(version: impl Into<String>, backend_configured: bool) -> Self {
        Self {
            version: version.into(),
            backend_configured,
            mode: AnalysisMode::for_backend(backend_configured),
            file: None,
            is_loading: false,
            result: None,
            error_message: String::new(),
            speed_unit: DEFAULT_SPEED_UNIT.to_string(),
        }
    }

    /// Validates and selects `file`, clearing any previous result.
    ///
    /// # Errors
    /// Returns the validation failure and shows it as the error message; the
    /// previous selection is kept.
    pub fn select_file(&mut self, file: VideoFile) -> Result<(), UploadValidationError> {
        if let Err(error) = validate_video_file(&file) {
            self.error_message = error.to_string();
            return Err(error);
        }

        self.error_message.clear();
        self.result = None;
        self.file = Some(file);
        Ok(())
    }

    /// Returns `true` when a file is selected and no attempt is running.
    pub fn can_analyze(&self) -> bool {
        self.file.is_some() && !self.is_loading
    }

    /// Marks an attempt as started. Returns `false` when analysis may not
    /// start.
    pub fn begin_analysis(&mut self) -> bool {
        if !self.can_analyze() {
            return false;
        }

        self.error_message.clear();
        self.result = None;
        self.is_loading = true;
        true
    }

    /// Records a completed attempt and an optional advisory message.
    pub fn apply_result(&mut self, result: AnalysisResult, advisory: Option<String>) {
        self.mode = result.source.into();
        self.result = Some(result);
        self.error_message = advisory.unwrap_or_default();
        self.is_loading = false;
    }

    /// Records a cancelled attempt; no result is shown.
    pub fn apply_cancelled(&mut self, message: impl Into<String>) {
        self.result = None;
        self.error_message = message.into();
        self.is_loading = false;
    }

    /// Clears selection, result and messages.
    pub fn reset(&mut self) {
        self.file = None;
        self.result = None;
        self.error_message.clear();
        self.is_loading = false;
        self.mode = AnalysisMode::for_backend(self.backend_configured);
    }

    /// Returns the selected file summary, e.g. `serve.mp4 (1.5 MB, video/mp4)`.
    pub fn file_summary(&self) -> Option<String> {
        self.file.as_ref().map(|file| {
            format!(
                "{} ({}, {})",
                file.name,
                human_file_size(file.size_bytes),
                file.content_type.as_deref().unwrap_or("video")
            )
        })
    }

    /// Returns what the results area should show.
    pub fn results_panel(&self) -> ResultsPanel {
        if self.is_loading {
            return ResultsPanel::Loading;
        }

        match &self.result {
            Some(result) => ResultsPanel::Ready(ResultView::new(result, &self.speed_unit)),
            None if !self.error_message.is_empty() => {
                ResultsPanel::Failed(self.error_message.clone())
            }
            None => ResultsPanel::Empty,
        }
    }

    /// Footer note describing backend detection.
    pub fn backend_note(&self) -> String {
        if self.backend_configured {
            format!("Backend URL detected via {API_BASE_ENV} or {BACKEND_URL_ENV}.")
        } else {
            "No backend configured. The app will run in Demo mode by default.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for UI state transitions.

    use swing_core::SwingDirection;

    use super::*;

    fn demo_result() -> AnalysisResult {
        AnalysisResult {
            direction: SwingDirection::Neutral,
            angle: Some(24.0),
            speed: Some(79.0),
            feedback: String::new(),
            source: ResultSource::Demo,
        }
    }

    #[test]
    fn analyze_requires_file_and_idle_state() {
        let mut state = UiState::new("0.1.0", false);
        assert!(!state.begin_analysis());

        state
            .select_file(VideoFile::new("serve.mp4", None, 1_024))
            .expect("mp4 should be accepted");
        assert!(state.begin_analysis());
        assert!(!state.begin_analysis());
        assert_eq!(state.results_panel(), ResultsPanel::Loading);
    }

    #[test]
    fn rejected_file_keeps_previous_selection() {
        let mut state = UiState::new("0.1.0", true);
        state
            .select_file(VideoFile::new("serve.mp4", None, 1_024))
            .expect("mp4 should be accepted");

        let error = state
            .select_file(VideoFile::new("notes.txt", None, 10))
            .expect_err("txt should be rejected");
        assert_eq!(state.error_message, error.to_string());
        assert_eq!(
            state.file.as_ref().map(|file| file.name.as_str()),
            Some("serve.mp4")
        );
    }

    #[test]
    fn result_with_advisory_shows_result_and_switches_mode() {
        let mut state = UiState::new("0.1.0", true);
        state.apply_result(
            demo_result(),
            Some("Request failed. Using Demo Analysis.".to_string()),
        );

        assert_eq!(state.mode, AnalysisMode::Demo);
        assert_eq!(state.error_message, "Request failed. Using Demo Analysis.");
        match state.results_panel() {
            ResultsPanel::Ready(view) => {
                assert_eq!(view.direction, "neutral");
                assert_eq!(view.angle, "24°");
                assert_eq!(view.speed, "79 mph");
                assert_eq!(view.feedback, EMPTY_FEEDBACK_TEXT);
            }
            other => panic!("unexpected panel: {other:?}"),
        }

        state.reset();
        assert_eq!(state.mode, AnalysisMode::Backend);
        assert_eq!(state.results_panel(), ResultsPanel::Empty);
    }

    #[test]
    fn cancelled_attempt_shows_message_without_result() {
        let mut state = UiState::new("0.1.0", true);
        state.apply_cancelled("Analysis cancelled.");
        assert_eq!(
            state.results_panel(),
            ResultsPanel::Failed("Analysis cancelled.".to_string())
        );
    }
}

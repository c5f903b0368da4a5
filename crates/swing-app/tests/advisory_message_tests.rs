//! Integration tests for failure advisories.

use swing_app::{NO_BACKEND_ADVISORY, REQUEST_FAILED_ADVISORY, advisory_for};
use swing_upload::AnalysisRequestError;

#[test]
fn advisory_message_tests_match_failure_kind() {
    assert_eq!(
        advisory_for(&AnalysisRequestError::NoBackendConfigured),
        Some(NO_BACKEND_ADVISORY)
    );
    assert_eq!(
        advisory_for(&AnalysisRequestError::Http {
            status: 404,
            body: String::new(),
        }),
        Some(REQUEST_FAILED_ADVISORY)
    );
    assert_eq!(
        advisory_for(&AnalysisRequestError::Transport("dns".to_string())),
        Some(REQUEST_FAILED_ADVISORY)
    );
    assert_eq!(advisory_for(&AnalysisRequestError::Cancelled), None);
}

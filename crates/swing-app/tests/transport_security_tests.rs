//! Integration tests for endpoint scheme checks.

use swing_app::is_https_endpoint;

#[test]
fn transport_security_tests_flags_plain_http_endpoints() {
    assert!(is_https_endpoint("https://api.example.test/analyze"));
    assert!(!is_https_endpoint("http://localhost:3001/analyze"));
    assert!(!is_https_endpoint("not a url"));
}

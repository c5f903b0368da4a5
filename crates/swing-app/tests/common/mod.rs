//! Shared fixtures for app integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use swing_upload::{
    AnalysisClient, AnalysisRequestError, AnalysisTransport, BackendConfig, TransportResponse,
    VideoUpload,
};
use url::Url;

/// Canned reply returned by [`FixedTransport`].
#[allow(dead_code)]
#[derive(Debug)]
pub enum Reply {
    /// Respond with a status and body.
    Respond(u16, &'static str),
    /// Fail to exchange a response.
    Unreachable,
    /// Never respond.
    Hang,
}

/// Transport replaying one canned reply.
#[allow(dead_code)]
#[derive(Debug)]
pub struct FixedTransport(pub Reply);

#[async_trait]
impl AnalysisTransport for FixedTransport {
    async fn send(
        &self,
        _endpoint: &Url,
        _upload: &VideoUpload,
    ) -> Result<TransportResponse, AnalysisRequestError> {
        match &self.0 {
            Reply::Respond(status, body) => Ok(TransportResponse {
                status: *status,
                body: body.as_bytes().to_vec(),
            }),
            Reply::Unreachable => Err(AnalysisRequestError::Transport(
                "connection refused".to_string(),
            )),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// Creates a client against a fake configured backend.
#[allow(dead_code)]
pub fn backend_client(reply: Reply) -> AnalysisClient {
    let config = BackendConfig::new("https://api.example.test").expect("valid url");
    AnalysisClient::new(Some(config), Arc::new(FixedTransport(reply)))
}

/// Creates a client with no backend configured.
#[allow(dead_code)]
pub fn demo_client() -> AnalysisClient {
    AnalysisClient::new(None, Arc::new(FixedTransport(Reply::Hang)))
}

/// Creates an in-memory upload fixture.
#[allow(dead_code)]
pub fn fixture_upload(name: &str) -> VideoUpload {
    VideoUpload::new(name, None, vec![0, 0, 0, 32, 102, 116, 121, 112])
}

//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use tutorial_client::{AnalyticsClient, ClientError, TutorialKind};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a client pointed at the mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> AnalyticsClient {
    AnalyticsClient::builder()
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

/// An address on localhost that nothing is listening on.
#[allow(dead_code)]
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

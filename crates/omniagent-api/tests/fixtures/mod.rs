use std::sync::Arc;
use std::time::Duration;

use omniagent_agents::AgentRegistry;
use omniagent_api::{Dispatcher, DispatcherConfig, HttpTransport};
use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock agent API for exercising the dispatcher over real HTTP
pub struct AgentMockServer {
    server: MockServer,
}

impl AgentMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Dispatcher pointed at this mock server
    pub fn dispatcher(&self) -> Dispatcher {
        dispatcher_for(&self.uri())
    }

    /// Mock a successful JSON answer on `endpoint`, only matching the expected payload
    pub async fn mock_answer(&self, endpoint: &str, expected_payload: Value, body: Value) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(expected_payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock an HTTP error status on `endpoint`
    pub async fn mock_status(&self, endpoint: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "detail": "Internal server error"
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 whose body is not JSON
    pub async fn mock_plain_text(&self, endpoint: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_string(text))
            .mount(&self.server)
            .await;
    }
}

/// Dispatcher for an arbitrary base URL, with a short simulated delay
pub fn dispatcher_for(base_url: &str) -> Dispatcher {
    let transport = HttpTransport::new(Some(Duration::from_secs(5)), false)
        .expect("failed to build HTTP client");
    Dispatcher::new(
        Arc::new(AgentRegistry::builtin()),
        Arc::new(transport),
        DispatcherConfig {
            base_url: base_url.to_string(),
            simulated_delay: Duration::from_millis(5),
            ..DispatcherConfig::default()
        },
    )
}

/// Base URL of a port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind probe port");
    let addr = listener.local_addr().expect("probe port has no address");
    drop(listener);
    format!("http://{}", addr)
}

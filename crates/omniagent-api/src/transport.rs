use async_trait::async_trait;
use omniagent_logging::{log_request, log_response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::dispatcher::AskRequest;

/// Why a remote call produced no usable body
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API request failed with status {0}")]
    HttpStatus(u16),
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

/// Delivers one ask request and returns the decoded JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_ask(&self, url: &str, request: &AskRequest) -> Result<Value, TransportError>;
}

/// reqwest-backed transport. One attempt per call, no retries.
pub struct HttpTransport {
    client: reqwest::Client,
    verbose: bool,
}

impl HttpTransport {
    /// `timeout` of `None` keeps reqwest's default behavior
    pub fn new(timeout: Option<Duration>, verbose: bool) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            verbose,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_ask(&self, url: &str, request: &AskRequest) -> Result<Value, TransportError> {
        log_request(url, request, self.verbose);

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        log_response(url, status, &body, self.verbose);

        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

use super::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub token: String,
    pub form: Vec<(String, String)>,
    /// Upper bound for this round trip, `None` for unbounded. The client
    /// races it against the caller's context as well.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!("Posting alert to: {}", request.url);

        let mut builder = self.client
            .post(&request.url)
            .header("Authorization", format!("Bearer {}", request.token))
            .form(&request.form);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        debug!("Notify responded with HTTP {} ({} bytes)", status, body.len());

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn classify(error: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    if let (true, Some(timeout)) = (error.is_timeout(), timeout) {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Http(error)
    }
}

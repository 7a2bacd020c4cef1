use super::config::Config;
use super::context::Context;
use super::error::{AlertError, Result, TransportError};
use super::transport::{ReqwestTransport, Transport, TransportRequest};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::debug;

/// Status code the notify service puts in the body of a delivered alert.
pub const STATUS_OK: i64 = 200;

#[derive(Debug, Deserialize)]
struct AlertResponse {
    status: i64,
    message: String,
}

pub struct Client {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Arc<Config>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one alert describing `err` as coming from `source`.
    ///
    /// The round trip is bounded by whichever comes first: the context's
    /// deadline, `request_timeout` from now, or the context being cancelled.
    /// Success is decided by the `status` field of the JSON body; the HTTP
    /// status line is ignored.
    pub async fn alert(
        &self,
        ctx: &Context,
        source: &str,
        err: &(dyn std::error::Error + Send + Sync + '_),
    ) -> Result<()> {
        if let Some(done) = ctx.err() {
            return Err(done.into());
        }

        let timeout = self.config.request_timeout;
        // A timeout too large to add to now() means no per-call limit
        let (deadline, expired) = match (ctx.deadline(), Instant::now().checked_add(timeout)) {
            (Some(ctx_deadline), Some(call_deadline)) if ctx_deadline < call_deadline => {
                (Some(ctx_deadline), TransportError::DeadlineExceeded)
            }
            (Some(ctx_deadline), None) => (Some(ctx_deadline), TransportError::DeadlineExceeded),
            (_, call_deadline) => (call_deadline, TransportError::Timeout(timeout)),
        };

        let request = TransportRequest {
            url: self.config.endpoint.clone(),
            token: self.config.token.clone(),
            form: vec![("message".to_string(), format_message(source, err))],
            timeout: deadline.map(|d| d.saturating_duration_since(Instant::now())),
        };

        debug!("Sending alert from {}", source);

        let response = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(TransportError::Cancelled.into()),
            sent = run_until(deadline, self.transport.post(request)) => match sent {
                Some(response) => response?,
                None => return Err(expired.into()),
            },
        };

        let body: AlertResponse = serde_json::from_slice(&response.body)?;

        if body.status == STATUS_OK {
            debug!("Alert delivered (HTTP {})", response.status);
            Ok(())
        } else {
            Err(AlertError::Rejected {
                status: body.status,
                message: body.message,
            })
        }
    }
}

/// `None` once `deadline` passes before `fut` completes.
async fn run_until<F: Future>(deadline: Option<Instant>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut).await.ok(),
        None => Some(fut.await),
    }
}

fn format_message(source: &str, err: &(dyn std::error::Error + Send + Sync + '_)) -> String {
    format!("Error on {}: {}", source, err)
}

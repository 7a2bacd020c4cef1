use super::error::{AlertError, Result};
use std::time::Duration;

pub const NOTIFY_ENDPOINT: &str = "https://notify-api.line.me/api/notify";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

pub const TOKEN_ENV: &str = "LINE_NOTIFY_TOKEN";
pub const TIMEOUT_ENV: &str = "LINE_NOTIFY_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token issued by the notify service. Empty until the caller sets it.
    pub token: String,
    pub request_timeout: Duration,
    pub endpoint: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            token: String::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            endpoint: NOTIFY_ENDPOINT.to_string(),
        }
    }

    /// Build a config from `LINE_NOTIFY_TOKEN` and the optional
    /// `LINE_NOTIFY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| AlertError::Config(format!("{TOKEN_ENV} is not set")))?;
        let timeout = std::env::var(TIMEOUT_ENV).ok();

        Self::from_values(&token, timeout.as_deref())
    }

    /// Validate a raw token and optional timeout in seconds, as read from the
    /// environment or the command line.
    pub fn from_values(token: &str, timeout_secs: Option<&str>) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AlertError::Config(format!("{TOKEN_ENV} is empty")));
        }

        let mut config = Self::new().with_token(token);

        if let Some(raw) = timeout_secs {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                AlertError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"))
            })?;
            if secs == 0 {
                return Err(AlertError::Config(format!("{TIMEOUT_ENV} must be greater than zero")));
            }
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

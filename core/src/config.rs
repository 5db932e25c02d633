//! Client configuration.

use std::time::Duration;

use crate::error::ApiError;

pub const ENDPOINT_VAR: &str = "ARGUS_ENDPOINT";
pub const TOKEN_VAR: &str = "ARGUS_TOKEN";
pub const TIMEOUT_VAR: &str = "ARGUS_TIMEOUT_SECS";

/// Where the service lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the web service, e.g. `https://argus.example.com/argusws`.
    pub endpoint: String,
    /// Bearer token issued by the session layer.
    pub token: Option<String>,
    /// Overall timeout for one round trip. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `ARGUS_ENDPOINT`, `ARGUS_TOKEN` and `ARGUS_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let endpoint = lookup(ENDPOINT_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{ENDPOINT_VAR} is not set")))?;

        let token = lookup(TOKEN_VAR).filter(|v| !v.is_empty());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ApiError::Config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))
                })?;
                if secs == 0 {
                    return Err(ApiError::Config(format!(
                        "{TIMEOUT_VAR} must be greater than zero"
                    )));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            endpoint,
            token,
            timeout,
        })
    }
}

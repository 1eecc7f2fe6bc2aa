//! Client configuration.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{ApiError, ApiResult};

/// Default GitHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default User-Agent header. GitHub rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("gitem/", env!("CARGO_PKG_VERSION"));

/// Default request timeout, handed to the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An opaque access token credential.
///
/// Owned by the caller, configured at construction time, and read-only
/// thereafter. The token material is kept in a [`SecretString`] so it never
/// appears in debug output or logs.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wraps a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Exposes the token material for header construction.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// True for an empty token, which never satisfies the auth gate.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Configuration for a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL.
    pub base_url: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// Optional access token for authenticated endpoints.
    pub token: Option<AccessToken>,
    /// Request timeout, delegated to the transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The configured token, treating an empty string as absent.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref().filter(|token| !token.is_empty())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("invalid base URL `{}`: {}", self.base_url, e))
        })?;

        if self.user_agent.is_empty() {
            return Err(ApiError::InvalidRequest(
                "User-Agent is required by the GitHub API".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    token: Option<AccessToken>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(AccessToken::new(token));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> ApiResult<ClientConfig> {
        let config = ClientConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            token: self.token,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.token().is_none());
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder()
            .base_url("https://github.example.com/api/v3")
            .user_agent("probe/1.0")
            .token("t0ken")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://github.example.com/api/v3");
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.token().unwrap().expose(), "t0ken");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ClientConfig::builder().base_url("not a url").build().is_err());
    }

    #[test]
    fn empty_user_agent_is_rejected() {
        assert!(ClientConfig::builder().user_agent("").build().is_err());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let config = ClientConfig::builder().token("").build().unwrap();
        assert!(config.token().is_none());
    }

    #[test]
    fn token_is_not_debug_printed() {
        let token = AccessToken::new("t0ken");
        assert!(!format!("{:?}", token).contains("t0ken"));
    }
}

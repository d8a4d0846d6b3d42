//! Client configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORTAL_BASE_URL` | `http://localhost:8080` | Server origin the `/api/...` paths are joined to |
//! | `PORTAL_TIMEOUT_MS` | `3000` | Per-request timeout in milliseconds |

use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Settings shared by every service client of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("portal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Builds a validated config for `base_url` with default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ValidationError> {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .validated()
    }

    /// Reads `PORTAL_BASE_URL` and `PORTAL_TIMEOUT_MS`, falling back to defaults.
    ///
    /// An unparsable timeout falls back to the default.
    pub fn from_env() -> Result<Self, ValidationError> {
        let defaults = Self::default();
        let base_url = std::env::var("PORTAL_BASE_URL").unwrap_or(defaults.base_url.clone());
        let timeout_ms = std::env::var("PORTAL_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(defaults.timeout_ms);
        Self {
            base_url,
            timeout_ms,
            ..defaults
        }
        .validated()
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        self.timeout_ms = timeout_ms;
        self.validated()
    }

    /// Joins an `/api/...` path onto the base url.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn validated(self) -> Result<Self, ValidationError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl {
                value: self.base_url,
            });
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        Ok(Self {
            base_url: base.to_owned(),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slash() {
        let config = ClientConfig::new("https://portal.test/").expect("valid");
        assert_eq!(
            config.url_for("/api/service_locator/login"),
            "https://portal.test/api/service_locator/login"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ClientConfig::new("ftp://portal.test").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::default()
            .with_timeout_ms(0)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::ZeroTimeout);
    }
}

//! Service clients for the portal's HTTP API.
//!
//! Each operation is a single POST of a JSON body to a fixed `/api/...` path
//! and a JSON response decoded with serde. The clients share one
//! [`ServiceTransport`], which owns the [`HttpClient`] and [`ClientConfig`].
//!
//! | Client | Service |
//! |--------|---------|
//! | [`ServiceLocatorClient`] | login, current account, passwords, parents |
//! | [`AdministrationClient`] | roles, identity, groups, entitlements, risk |
//! | [`DefinitionsClient`] | country, currency and market databases |
//! | [`ComplianceClient`] | rule entries and schemas |

mod administration;
mod compliance;
mod definitions;
mod service_clients;
mod service_locator;

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpError, HttpRequest};

pub use administration::AdministrationClient;
pub use compliance::ComplianceClient;
pub use definitions::DefinitionsClient;
pub use service_clients::{ReferenceDatabases, ServiceClients};
pub use service_locator::ServiceLocatorClient;

/// Client-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Transport,
    Status,
    Unauthorized,
    Decode,
    Encode,
}

/// Structured error raised by a service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    kind: ClientErrorKind,
    message: String,
    retryable: bool,
}

impl ClientError {
    pub fn transport(error: &HttpError) -> Self {
        Self {
            kind: ClientErrorKind::Transport,
            message: format!("transport error: {}", error.message()),
            retryable: error.retryable(),
        }
    }

    pub fn status(path: &str, status: u16, body: &str) -> Self {
        let detail = body.trim();
        let message = if detail.is_empty() {
            format!("{path} returned status {status}")
        } else {
            format!("{path} returned status {status}: {detail}")
        };
        if status == 401 || status == 403 {
            return Self {
                kind: ClientErrorKind::Unauthorized,
                message,
                retryable: false,
            };
        }
        Self {
            kind: ClientErrorKind::Status,
            message,
            retryable: status >= 500,
        }
    }

    pub fn decode(path: &str, error: &serde_json::Error) -> Self {
        Self {
            kind: ClientErrorKind::Decode,
            message: format!("{path} returned an unexpected body: {error}"),
            retryable: false,
        }
    }

    pub fn encode(path: &str, error: &serde_json::Error) -> Self {
        Self {
            kind: ClientErrorKind::Encode,
            message: format!("failed to encode request for {path}: {error}"),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ClientErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ClientErrorKind::Transport => "client.transport",
            ClientErrorKind::Status => "client.status",
            ClientErrorKind::Unauthorized => "client.unauthorized",
            ClientErrorKind::Decode => "client.decode",
            ClientErrorKind::Encode => "client.encode",
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ClientError {}

/// Empty request body, serialized as `{}`.
#[derive(Debug, Serialize)]
pub(crate) struct Empty {}

/// Shared POST-and-decode plumbing for the service clients.
#[derive(Clone)]
pub struct ServiceTransport {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl ServiceTransport {
    pub fn new(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Posts `body` to `path` and decodes the JSON response.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(path, body).await?;
        serde_json::from_str(&response).map_err(|error| ClientError::decode(path, &error))
    }

    /// Posts `body` to `path`, discarding the response body.
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send(path, body).await.map(|_| ())
    }

    async fn send<B>(&self, path: &str, body: &B) -> Result<String, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let payload =
            serde_json::to_string(body).map_err(|error| ClientError::encode(path, &error))?;
        let request = HttpRequest::post_json(self.config.url_for(path), payload)
            .with_timeout_ms(self.config.timeout_ms);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| ClientError::transport(&error))?;
        debug!(path, status = response.status, "service call completed");

        if !response.is_success() {
            return Err(ClientError::status(path, response.status, &response.body));
        }
        Ok(response.body)
    }
}

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::config::ClientConfig;

/// HTTP request envelope used by service client calls.
///
/// Every portal call is a POST carrying a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            String::from("content-type"),
            String::from("application/json"),
        );
        Self {
            url: url.into(),
            headers,
            body: body.into(),
            timeout_ms: 3_000,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// HTTP response envelope returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    retryable: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport contract used by every service client.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Canned-response transport for deterministic offline use.
///
/// Responses are keyed by the request path (the URL suffix starting at `/api/`).
/// Every executed request is recorded so callers can count round trips.
#[derive(Debug, Default)]
pub struct StaticHttpClient {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StaticHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` with status 200 for `path`.
    pub fn with_json(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.route(path, HttpResponse::ok_json(body));
        self
    }

    /// Serves an arbitrary response for `path`.
    pub fn with_response(self, path: impl Into<String>, response: HttpResponse) -> Self {
        self.route(path, response);
        self
    }

    /// Installs or replaces the response for `path`.
    pub fn route(&self, path: impl Into<String>, response: HttpResponse) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert(path.into(), response);
        }
    }

    /// Returns a copy of every request executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests executed against `path`.
    pub fn call_count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request_path(&request.url) == path)
            .count()
    }
}

impl HttpClient for StaticHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let path = request_path(&request.url).to_owned();
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request);
            }
            let routes = self
                .routes
                .lock()
                .map_err(|_| HttpError::non_retryable("static route table is poisoned"))?;
            match routes.get(&path) {
                Some(response) => Ok(response.clone()),
                None => Ok(HttpResponse::with_status(404, "")),
            }
        })
    }
}

fn request_path(url: &str) -> &str {
    url.find("/api/").map(|index| &url[index..]).unwrap_or(url)
}

/// Production HTTP client using reqwest with a session cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    /// Create a client configured from `config`, keeping cookies across calls.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(config.user_agent.as_str())
                    .cookie_store(true)
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    /// Create a ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let timeout = std::time::Duration::from_millis(request.timeout_ms);
            builder = builder.timeout(timeout).body(request.body);

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::new(format!("request timeout: {}", e))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {}", e))
                } else {
                    HttpError::new(format!("request failed: {}", e))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {}", e)))?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_json_sets_content_type() {
        let request = HttpRequest::post_json("http://portal.test/api/x", "{}");

        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body, "{}");
    }

    #[test]
    fn custom_header_is_lowercased() {
        let request = HttpRequest::post_json("http://portal.test/api/x", "{}")
            .with_header("X-Request-Id", "abc");

        assert_eq!(
            request.headers.get("x-request-id").map(String::as_str),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn static_client_serves_routes_and_records_calls() {
        let client = StaticHttpClient::new().with_json("/api/a/b", "[1]");

        let hit = client
            .execute(HttpRequest::post_json("http://portal.test/api/a/b", "{}"))
            .await
            .expect("transport");
        let miss = client
            .execute(HttpRequest::post_json("http://portal.test/api/a/c", "{}"))
            .await
            .expect("transport");

        assert_eq!(hit.body, "[1]");
        assert!(hit.is_success());
        assert_eq!(miss.status, 404);
        assert_eq!(client.call_count("/api/a/b"), 1);
        assert_eq!(client.requests().len(), 2);
    }
}

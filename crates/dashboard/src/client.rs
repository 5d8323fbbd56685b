use protocol::{HealthStatus, QueryRequest, QueryResult, error_detail};
use thiserror::Error;
use tracing::debug;

use crate::config::BackendConfig;

/// Shown when a failed response carries no usable `detail`.
pub const GENERIC_FAILURE: &str = "Failed to fetch data";

/// Status and body of an HTTP exchange, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, refused connection, CORS, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP seam between the dashboard and whatever runtime hosts it.
///
/// The browser build implements this over `fetch`, the terminal client over
/// `reqwest`. Futures are not required to be `Send`: both hosts drive them on
/// a single thread.
#[allow(async_fn_in_trait)]
pub trait QueryTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;

    /// POST `body` with `Content-Type: application/json`.
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError>;
}

/// A failed query. `Display` is exactly the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{0}")]
    Transport(String),
    /// Non-2xx response; `detail` is the backend's message or [`GENERIC_FAILURE`].
    #[error("{detail}")]
    Backend { status: u16, detail: String },
    /// A 2xx response whose body is not the expected JSON.
    #[error("{0}")]
    Decode(String),
}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        QueryError::Transport(err.0)
    }
}

fn backend_failure(response: &RawResponse) -> QueryError {
    QueryError::Backend {
        status: response.status,
        detail: error_detail(&response.body).unwrap_or_else(|| GENERIC_FAILURE.to_string()),
    }
}

/// Maps a `/query` response onto the result or the user-facing failure.
pub fn interpret_query_response(response: RawResponse) -> Result<QueryResult, QueryError> {
    if !response.is_success() {
        return Err(backend_failure(&response));
    }
    serde_json::from_str(&response.body).map_err(|e| QueryError::Decode(e.to_string()))
}

pub fn interpret_health_response(response: RawResponse) -> Result<HealthStatus, QueryError> {
    if !response.is_success() {
        return Err(backend_failure(&response));
    }
    serde_json::from_str(&response.body).map_err(|e| QueryError::Decode(e.to_string()))
}

pub struct QueryClient<T> {
    config: BackendConfig,
    transport: T,
}

impl<T: QueryTransport> QueryClient<T> {
    pub fn new(config: BackendConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `query` as-is; blank-query filtering is the controller's job.
    pub async fn query(&self, query: &str) -> Result<QueryResult, QueryError> {
        interpret_query_response(self.post_query(query).await?)
    }

    /// Posts `query` and returns the response uninterpreted.
    pub async fn post_query(&self, query: &str) -> Result<RawResponse, QueryError> {
        let url = self.config.query_url();
        let body = serde_json::to_string(&QueryRequest::new(query))
            .map_err(|e| QueryError::Decode(e.to_string()))?;

        debug!(%url, "posting query");
        let response = self.transport.post_json(&url, body).await?;
        debug!(status = response.status, bytes = response.body.len(), "query response");
        Ok(response)
    }

    pub async fn health(&self) -> Result<HealthStatus, QueryError> {
        let url = self.config.health_url();
        debug!(%url, "checking backend health");
        let response = self.transport.get(&url).await?;
        interpret_health_response(response)
    }
}

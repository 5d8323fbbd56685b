//! Terminal client for the mission dashboard backend.

pub mod text;
pub mod transport;

use std::cell::RefCell;

use dashboard::{
    interpret_query_response, submit_with, BackendConfig, DisplayState, QueryClient,
    QueryController, QueryError, QueryTransport,
};
use protocol::QueryRequest;
use serde_json::Value;
use thiserror::Error;

pub use transport::ReqwestTransport;

/// Resolves the backend from an explicit flag, then the environment.
pub fn backend_config(flag: Option<&str>) -> BackendConfig {
    match flag {
        Some(url) => BackendConfig::new(url),
        None => BackendConfig::from_env(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("{0}")]
    Query(String),
}

impl From<QueryError> for CommandError {
    fn from(err: QueryError) -> Self {
        CommandError::Query(err.to_string())
    }
}

/// Runs one query and returns what to print: the rendered result, or the
/// backend's response body as pretty JSON when `json` is set.
pub async fn run_query<T: QueryTransport>(
    client: &QueryClient<T>,
    query: &str,
    json: bool,
) -> Result<String, CommandError> {
    if json {
        return run_query_json(client, query).await;
    }

    let controller = RefCell::new(QueryController::new());
    controller.borrow_mut().set_query(query);
    if submit_with(&controller, client, query).await.is_none() {
        return Err(CommandError::EmptyQuery);
    }

    let controller = controller.borrow();
    match controller.display() {
        DisplayState::Result(result) => Ok(text::render_result(result)),
        DisplayState::Error(message) => Err(CommandError::Query(message.to_string())),
        DisplayState::Welcome | DisplayState::Loading => {
            Err(CommandError::Query(dashboard::GENERIC_FAILURE.to_string()))
        }
    }
}

/// The body is validated like any other result, then printed as received.
/// Only whitespace and key order may change.
async fn run_query_json<T: QueryTransport>(
    client: &QueryClient<T>,
    query: &str,
) -> Result<String, CommandError> {
    if !QueryRequest::new(query).is_submittable() {
        return Err(CommandError::EmptyQuery);
    }

    let response = client.post_query(query).await?;
    let body = response.body.clone();
    interpret_query_response(response)?;

    let payload: Value =
        serde_json::from_str(&body).map_err(|e| CommandError::Query(e.to_string()))?;
    serde_json::to_string_pretty(&payload).map_err(|e| CommandError::Query(e.to_string()))
}

pub async fn run_health<T: QueryTransport>(client: &QueryClient<T>) -> Result<String, CommandError> {
    let health = client.health().await?;
    Ok(text::render_health(&health))
}

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use dashboard::{BackendConfig, QueryClient, GENERIC_FAILURE};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use cli::{run_health, run_query, CommandError, ReqwestTransport};

async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            eprintln!("stub backend error: {err}");
        }
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> QueryClient<ReqwestTransport> {
    QueryClient::new(BackendConfig::new(base_url), ReqwestTransport::default())
}

async fn answer(Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    Json(json!({
        "query": query,
        "insights": "SpaceX flew 134 missions.",
        "timestamp": "2024-12-31T23:59:59.000001",
        "visualizations": [
            {"type": "bar", "title": "Launches by vehicle", "description": "2024",
             "data": [{"label": "Falcon 9", "value": 132}, {"label": "Falcon Heavy", "value": "2"}]},
            {"type": "sankey", "title": "Flows", "description": "", "data": []}
        ]
    }))
}

#[tokio::test]
async fn query_renders_backend_result() {
    let base = spawn_backend(Router::new().route("/query", post(answer))).await;
    let out = run_query(&client(&base), "SpaceX launches in 2024", false)
        .await
        .unwrap();

    assert!(out.starts_with("Insights\nSpaceX flew 134 missions.\n"));
    assert!(out.contains("== Launches by vehicle =="));
    assert!(out.contains("Falcon Heavy"));
    assert!(out.contains("Unsupported visualization type: sankey"));
    assert!(out.contains("Query: SpaceX launches in 2024"));
    assert!(out.contains("Timestamp: 2024-12-31 23:59:59"));
}

fn loose_payload() -> Value {
    json!({
        "query": "NASA launches",
        "insights": "Mixed data quality.",
        "timestamp": "2024-01-01T00:00:00",
        "visualizations": [
            {"type": "bar", "title": "By year", "description": "",
             "data": [{"label": 2021, "value": "n/a", "agency": "NASA"}, {"label": "2022", "value": "2"}]}
        ]
    })
}

#[tokio::test]
async fn json_output_is_the_response_body_unchanged() {
    let app = Router::new().route("/query", post(|| async { Json(loose_payload()) }));
    let base = spawn_backend(app).await;
    let out = run_query(&client(&base), "NASA launches", true).await.unwrap();
    let printed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(printed, loose_payload());
}

#[tokio::test]
async fn json_output_still_reports_backend_errors() {
    let app = Router::new().route(
        "/query",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"detail": "Query too vague"}))) }),
    );
    let base = spawn_backend(app).await;
    let err = run_query(&client(&base), "stuff", true).await.unwrap_err();
    assert_eq!(err, CommandError::Query("Query too vague".to_string()));
}

#[tokio::test]
async fn json_output_rejects_blank_queries() {
    let err = run_query(&client("http://127.0.0.1:9"), " ", true)
        .await
        .unwrap_err();
    assert_eq!(err, CommandError::EmptyQuery);
}

#[tokio::test]
async fn backend_detail_is_the_error() {
    let app = Router::new().route(
        "/query",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Query too vague"})),
            )
        }),
    );
    let base = spawn_backend(app).await;
    let err = run_query(&client(&base), "stuff", false).await.unwrap_err();
    assert_eq!(err, CommandError::Query("Query too vague".to_string()));
}

#[tokio::test]
async fn unparsable_failure_uses_generic_message() {
    let app = Router::new().route(
        "/query",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let base = spawn_backend(app).await;
    let err = run_query(&client(&base), "stuff", false).await.unwrap_err();
    assert_eq!(err.to_string(), GENERIC_FAILURE);
}

#[tokio::test]
async fn blank_query_is_rejected_locally() {
    // Nothing listens here; a network attempt would surface a transport error instead.
    let err = run_query(&client("http://127.0.0.1:9"), "   ", false)
        .await
        .unwrap_err();
    assert_eq!(err, CommandError::EmptyQuery);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = run_query(&client(&format!("http://{addr}")), "anything", false)
        .await
        .unwrap_err();
    match err {
        CommandError::Query(message) => assert!(!message.is_empty()),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn health_reports_status() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            Json(json!({"status": "healthy", "timestamp": "2024-01-01T00:00:00", "api_configured": false}))
        }),
    );
    let base = spawn_backend(app).await;
    let out = run_health(&client(&base)).await.unwrap();
    assert_eq!(
        out,
        "status: healthy\ntimestamp: 2024-01-01T00:00:00\napi configured: no\n"
    );
}

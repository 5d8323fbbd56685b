use dashboard::{QueryTransport, RawResponse, TransportError};
use gloo_net::http::{Request, Response};

/// `fetch`-backed transport for the browser build.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

async fn read(resp: Response) -> Result<RawResponse, TransportError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError(e.to_string()))?;
    Ok(RawResponse::new(status, body))
}

impl QueryTransport for GlooTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        read(resp).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        let resp = Request::post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        read(resp).await
    }
}

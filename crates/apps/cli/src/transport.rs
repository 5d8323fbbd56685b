use dashboard::{QueryTransport, RawResponse, TransportError};
use reqwest::Client;

/// Native transport over a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

async fn read(resp: reqwest::Response) -> Result<RawResponse, TransportError> {
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError(e.to_string()))?;
    Ok(RawResponse::new(status, body))
}

impl QueryTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        read(resp).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        read(resp).await
    }
}

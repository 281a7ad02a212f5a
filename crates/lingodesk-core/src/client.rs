use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::auth::AuthContext;
use crate::error::GatewayError;

/// Thin wrapper over a shared `reqwest::Client` bound to one admin API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: AuthContext) -> Self {
        Self::with_http(Client::new(), base_url, auth)
    }

    pub fn with_timeout(base_url: impl Into<String>, auth: AuthContext, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self::with_http(http, base_url, auth))
    }

    pub fn with_http(http: Client, base_url: impl Into<String>, auth: AuthContext) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, auth }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(method = method.as_str(), url = url.as_str(), "api request");
        let builder = self.http.request(method, url);
        match self.auth.authorization_header() {
            Some(header) => builder.header(reqwest::header::AUTHORIZATION, header),
            None => builder,
        }
    }

    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        builder.send().await.map_err(|e| GatewayError::Network(e.to_string()))
    }
}

/// Reads the body of a successful response. `Ok(None)` means the body was empty.
pub(crate) async fn read_json(response: Response) -> Result<Option<Value>, GatewayError> {
    let text = response.text().await.map_err(|e| GatewayError::Network(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&text).map(Some).map_err(|e| GatewayError::Format(format!("invalid JSON: {e}")))
}

/// Turns a non-2xx response into an `Api` error, preferring the server's `message` field.
pub(crate) async fn api_error(response: Response) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    GatewayError::Api { status: status.as_u16(), message: error_message(status, &body) }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error", "detail"].iter().find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
    });
    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().chars().take(200).collect(),
        None => status.canonical_reason().unwrap_or("request failed").to_string(),
    }
}

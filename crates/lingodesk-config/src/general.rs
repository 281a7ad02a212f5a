use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    #[serde(alias = "tick-rate-ms")]
    pub tick_rate_ms: u64,
    #[serde(alias = "default-view")]
    pub default_view: String,
    #[serde(alias = "log-filter")]
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            default_view: "vocabularies".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(alias = "base-url")]
    pub base_url: String,
    #[serde(alias = "page-size")]
    pub page_size: u32,
    pub sort: String,
    #[serde(alias = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1/admin".into(),
            page_size: 10,
            sort: "id,asc".into(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(alias = "token-env")]
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token: None, token_env: "LINGODESK_TOKEN".into() }
    }
}

impl AuthConfig {
    /// An explicit `token` wins over the environment variable named by `token_env`.
    pub fn resolve_token(&self) -> Option<String> {
        if let Some(token) = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return Some(token.to_string());
        }
        if self.token_env.is_empty() {
            return None;
        }
        std::env::var(&self.token_env).ok().map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }
}

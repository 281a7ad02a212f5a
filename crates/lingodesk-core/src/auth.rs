use std::fmt;

/// Credentials attached to every request. The token is never logged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self { token: (!token.is_empty()).then(|| token.to_string()) }
    }

    pub fn from_token(token: Option<String>) -> Self {
        token.map(Self::bearer).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() { "<redacted>" } else { "<none>" };
        f.debug_struct("AuthContext").field("token", &token).finish()
    }
}

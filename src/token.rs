use serde::{Deserialize, Serialize};

/// Token represents the OAuth2 access token returned by the code exchange.
/// Dribbble tokens do not expire and carry no refresh token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Access token passed as `access_token` on every call
    pub access_token: String,

    /// Token type (usually "bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Space-separated scopes granted by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Token {
    /// Create a new Token
    pub fn new(access_token: String) -> Self {
        Token {
            access_token,
            token_type: default_token_type(),
            scope: None,
        }
    }

    /// Check whether a scope was granted
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|s| s.split_whitespace().any(|granted| granted == scope))
    }
}

// Implement Debug manually to avoid exposing the access token in logs
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

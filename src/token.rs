use crate::error::{RestError, Result};

/// Management API access token (personal access token or OAuth token).
///
/// The secret never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    /// Create a new AccessToken, rejecting empty secrets
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into().trim().to_string();
        if secret.is_empty() {
            return Err(RestError::InvalidToken("token is empty".to_string()));
        }
        if secret.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(RestError::InvalidToken(
                "token contains whitespace or control characters".to_string(),
            ));
        }
        Ok(AccessToken { secret })
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.secret)
    }

    /// The raw secret
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .finish()
    }
}

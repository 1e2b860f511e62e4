//! Bearer token issued by the identity provider

use std::fmt;

/// Opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// `Bearer <token>`
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = AccessToken::new("eyJ0eXAi");
        assert_eq!(format!("{:?}", token), "AccessToken(<redacted>)");
        assert_eq!(token.bearer(), "Bearer eyJ0eXAi");
    }
}

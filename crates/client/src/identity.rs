//! Authenticated identity handed to the client by the auth layer.
//!
//! Token issuance, refresh, and logout are external concerns; this crate only
//! consumes an access token and observes auth-state transitions.

use secrecy::{ExposeSecret, SecretString};

/// An authenticated user identity carrying a bearer access token.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Identity {
    access_token: SecretString,
}

impl Identity {
    /// Create an identity from an access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_value() {
        let identity = Identity::new("tok-123");
        assert_eq!(identity.bearer(), "Bearer tok-123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let identity = Identity::new("super-secret-token");
        let debug_output = format!("{identity:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }
}

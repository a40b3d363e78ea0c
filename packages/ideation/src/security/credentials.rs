//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so API keys never show up in logs or debug
//! output.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when building the request that needs it.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Blank keys are treated as absent.
    pub fn non_blank(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self::new(value.trim()))
        }
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Credentials for a keyed upstream API.
#[derive(Clone)]
pub struct ApiCredentials {
    /// API key (secret)
    pub api_key: SecretString,

    /// Model identifier, for generators
    pub model: Option<String>,
}

impl ApiCredentials {
    /// Create credentials from a key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            model: None,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_or_display() {
        let secret = SecretString::new("s2-private-key");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_works() {
        let secret = SecretString::new("s2-private-key");
        assert_eq!(secret.expose(), "s2-private-key");
        assert_eq!(secret.clone().expose(), "s2-private-key");
    }

    #[test]
    fn test_blank_keys_are_absent() {
        assert!(SecretString::non_blank("   ").is_none());
        assert_eq!(SecretString::non_blank(" k ").unwrap().expose(), "k");
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = ApiCredentials::new("AIza-secret").with_model("gemini-1.5-flash-latest");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("AIza"));
        assert!(debug.contains("gemini-1.5-flash-latest"));
    }
}

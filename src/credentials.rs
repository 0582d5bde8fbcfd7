//! Notion integration token loading.
//!
//! The token comes from `NOTION_API_KEY`. It is checked for the shapes Notion
//! issues (`ntn_...` for current integrations, `secret_...` for older ones)
//! and for stray whitespace that usually means a copy/paste accident.

use std::sync::Arc;

/// Environment variable holding the integration token.
pub const API_KEY_ENV_VAR: &str = "NOTION_API_KEY";

const VALID_PREFIXES: [&str; 2] = ["ntn_", "secret_"];

/// A validated Notion integration token.
///
/// Never printed; `Debug` renders as `ApiKey(****)`.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("NOTION_API_KEY environment variable not set")]
    Missing,

    #[error(
        "Invalid API key format: key should start with 'ntn_' or 'secret_' (length: {length} characters)"
    )]
    InvalidPrefix { length: usize },

    #[error("API key contains invalid whitespace characters (newlines/tabs)")]
    InvalidCharacters,
}

impl ApiKey {
    /// Load and validate the token from `NOTION_API_KEY`.
    pub fn from_env() -> Result<Self, CredentialError> {
        let raw = std::env::var(API_KEY_ENV_VAR).map_err(|_| CredentialError::Missing)?;
        let key = Self::parse(&raw)?;

        tracing::info!(length = key.len(), "API key loaded");

        Ok(key)
    }

    /// Validate a raw token. Surrounding whitespace is trimmed first.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let key = raw.trim();

        if key.is_empty() {
            return Err(CredentialError::Missing);
        }

        if !VALID_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
            return Err(CredentialError::InvalidPrefix { length: key.len() });
        }

        if key.contains(['\n', '\r', '\t']) {
            return Err(CredentialError::InvalidCharacters);
        }

        Ok(Self(Arc::from(key)))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::current_prefix("ntn_abc123")]
    #[case::legacy_prefix("secret_abc123")]
    #[case::surrounding_whitespace("  ntn_abc123\n")]
    fn test_valid_keys(#[case] raw: &str) {
        let key = ApiKey::parse(raw).unwrap();
        assert_eq!(key.expose(), raw.trim());
    }

    #[rstest]
    #[case::empty("", CredentialError::Missing)]
    #[case::blank("   ", CredentialError::Missing)]
    #[case::wrong_prefix("sk-abc123", CredentialError::InvalidPrefix { length: 9 })]
    #[case::embedded_newline("ntn_abc\n123", CredentialError::InvalidCharacters)]
    #[case::embedded_tab("secret_abc\t123", CredentialError::InvalidCharacters)]
    fn test_invalid_keys(#[case] raw: &str, #[case] expected: CredentialError) {
        assert_eq!(ApiKey::parse(raw).unwrap_err(), expected);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = ApiKey::parse("ntn_supersecret").unwrap();
        let rendered = format!("{:?}", key);
        assert_eq!(rendered, "ApiKey(****)");
    }

    #[test]
    fn test_from_env() {
        temp_env::with_var(API_KEY_ENV_VAR, Some("ntn_from_env"), || {
            assert_eq!(ApiKey::from_env().unwrap().expose(), "ntn_from_env");
        });
        temp_env::with_var_unset(API_KEY_ENV_VAR, || {
            assert_eq!(ApiKey::from_env().unwrap_err(), CredentialError::Missing);
        });
    }
}

//! Token based authorizer

use serde::Deserialize;
use tracing::debug;

use crate::domain::auth::token_digest;
use crate::domain::{Actor, Authorizer};

/// Capabilities granted to the holder of one token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    /// `sha256$<base64url>` hash of the bearer token
    pub token_hash: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl TokenGrant {
    pub fn new(token_hash: impl Into<String>, capabilities: Vec<String>) -> Self {
        Self {
            token_hash: token_hash.into(),
            capabilities,
        }
    }

    /// Grant built from a plain token, mostly for tests and tooling
    pub fn for_token(token: &str, capabilities: Vec<String>) -> Self {
        Self::new(hash_token(token), capabilities)
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Hash a bearer token for storage in the configuration
pub fn hash_token(token: &str) -> String {
    format!("sha256${}", token_digest(token))
}

/// Verify a token against a stored hash
pub fn verify_token(token: &str, stored_hash: &str) -> bool {
    constant_time_compare(&hash_token(token), stored_hash)
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Grants administration to actors whose token carries the required capability
#[derive(Debug, Clone)]
pub struct TokenAuthorizer {
    capability: String,
    grants: Vec<TokenGrant>,
}

impl TokenAuthorizer {
    pub fn new(capability: impl Into<String>, grants: Vec<TokenGrant>) -> Self {
        Self {
            capability: capability.into(),
            grants,
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }
}

impl Authorizer for TokenAuthorizer {
    fn may_administer(&self, actor: &Actor) -> bool {
        let Some(token) = actor.token() else {
            return false;
        };

        let allowed = self
            .grants
            .iter()
            .filter(|grant| verify_token(token, &grant.token_hash))
            .any(|grant| grant.has_capability(&self.capability));

        debug!(actor = %actor.label(), capability = %self.capability, allowed, "Capability check");
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPABILITY: &str = "manage_h4ac";

    fn authorizer() -> TokenAuthorizer {
        TokenAuthorizer::new(
            CAPABILITY,
            vec![
                TokenGrant::for_token("admin-token", vec![CAPABILITY.to_string()]),
                TokenGrant::for_token("editor-token", vec!["edit_posts".to_string()]),
            ],
        )
    }

    #[test]
    fn test_hash_token_format() {
        let hash = hash_token("admin-token");

        assert!(hash.starts_with("sha256$"));
        // 32 bytes base64-encoded without padding = 43 chars
        assert_eq!(hash.len(), "sha256$".len() + 43);
        assert_eq!(hash, hash_token("admin-token"));
        assert_ne!(hash, hash_token("admin-token2"));
    }

    #[test]
    fn test_verify_token() {
        let hash = hash_token("admin-token");

        assert!(verify_token("admin-token", &hash));
        assert!(!verify_token("wrong-token", &hash));
        assert!(!verify_token("admin-token", "sha256$short"));
    }

    #[test]
    fn test_capability_holder_may_administer() {
        assert!(authorizer().may_administer(&Actor::with_token("admin-token")));
    }

    #[test]
    fn test_missing_capability_is_denied() {
        assert!(!authorizer().may_administer(&Actor::with_token("editor-token")));
    }

    #[test]
    fn test_unknown_token_is_denied() {
        assert!(!authorizer().may_administer(&Actor::with_token("guess")));
    }

    #[test]
    fn test_anonymous_is_denied() {
        assert!(!authorizer().may_administer(&Actor::anonymous()));
    }

    #[test]
    fn test_no_grants_denies_everyone() {
        let authorizer = TokenAuthorizer::new(CAPABILITY, Vec::new());
        assert!(!authorizer.may_administer(&Actor::with_token("admin-token")));
    }

    #[test]
    fn test_grant_deserializes_without_capabilities() {
        let grant: TokenGrant =
            serde_json::from_str(r#"{"token_hash": "sha256$abc"}"#).unwrap();

        assert!(grant.capabilities.is_empty());
        assert!(!grant.has_capability(CAPABILITY));
    }
}

//! Authorization domain module
//!
//! Who may administer the club's teams is decided behind a single question,
//! so the HTTP layer never needs to know how capabilities are granted.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

/// Unpadded base64url SHA-256 of a bearer token
pub fn token_digest(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

/// The caller of an administrative request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    token: Option<String>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }

    /// Label for log lines: a digest prefix, never token characters
    pub fn label(&self) -> String {
        match &self.token {
            Some(token) => format!("token:{}", &token_digest(token)[..8]),
            None => "anonymous".to_string(),
        }
    }
}

/// Decides whether an actor may perform administrative actions
pub trait Authorizer: Send + Sync + std::fmt::Debug {
    fn may_administer(&self, actor: &Actor) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_actor() {
        let actor = Actor::anonymous();
        assert!(actor.is_anonymous());
        assert_eq!(actor.token(), None);
        assert_eq!(actor.label(), "anonymous");
    }

    #[test]
    fn test_actor_label_hides_token() {
        let actor = Actor::with_token("secret-token-value");
        let label = actor.label();

        assert!(!actor.is_anonymous());
        assert_eq!(label.len(), "token:".len() + 8);
        assert!(label.starts_with("token:"));
        assert!(!label.contains("secr"));
        assert!(token_digest("secret-token-value").starts_with(&label["token:".len()..]));
    }

    #[test]
    fn test_label_is_stable_per_token() {
        assert_eq!(
            Actor::with_token("admin-token").label(),
            Actor::with_token("admin-token").label()
        );
        assert_ne!(
            Actor::with_token("admin-token").label(),
            Actor::with_token("other-token").label()
        );
    }
}

//! Wire DTOs and the shared token handle.
//!
//! # Design
//! The DTOs mirror the login endpoint's schema but are defined independently
//! from the mock-server crate; integration tests catch schema drift.
//! `AuthToken` is the one piece of shared mutable state in the crate: a
//! cloneable handle whose single writer is the login completion handler.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Login credentials supplied by the caller. Transient: serialized into the
/// request body and dropped.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload of a successful login response. `hash` becomes the new
/// authorization token; the rest is logged and dropped.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    pub hash: String,
}

/// Shared handle to the current authorization token.
///
/// Reads clone the value out under a read guard; writes are confined to the
/// login completion handler via the crate-private `set`. A request built
/// while a login completion is writing observes either the old or the new
/// token; the next build observes the new one.
#[derive(Clone)]
pub struct AuthToken(Arc<RwLock<String>>);

impl AuthToken {
    pub fn new(initial: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(initial.into())))
    }

    /// Current token value.
    pub fn get(&self) -> String {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub(crate) fn set(&self, value: String) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = value;
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_serialize_with_wire_field_names() {
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_value(&credentials).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn login_response_deserializes_wire_shape() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"id":7,"name":"Ann","hash":"tok123"}"#).unwrap();
        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Ann");
        assert_eq!(response.hash, "tok123");
    }

    #[test]
    fn login_response_rejects_missing_hash() {
        let result: Result<LoginResponse, _> =
            serde_json::from_str(r#"{"id":7,"name":"Ann"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn token_handle_clones_share_state() {
        let token = AuthToken::new("placeholder");
        let other = token.clone();
        other.set("rotated".to_string());
        assert_eq!(token.get(), "rotated");
    }
}

//! Mock identity-provider helpers for integration tests.
//!
//! The session service accepts HS256 assertions signed by the identity provider. In tests,
//! `TestIdentity` signs them directly so no real provider is needed.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderName, HeaderValue};

use vivexa_auth_types::cookie::VIVEXA_SESSION;
use vivexa_auth_types::token::{IdentityClaims, issue_identity_token};
use vivexa_domain::id::SessionId;

/// Shared secret used by tests that mint assertions.
pub const TEST_IDENTITY_SECRET: &str = "test-identity-secret-for-tests-only";

/// Identity as the provider would report it after sign-in.
#[derive(Debug, Clone)]
pub struct TestIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl TestIdentity {
    pub fn new(uid: &str, email: &str) -> Self {
        Self {
            uid: uid.to_owned(),
            email: email.to_owned(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_owned());
        self
    }

    /// Assertion valid for one hour, signed with [`TEST_IDENTITY_SECRET`].
    pub fn token(&self) -> String {
        self.token_expiring_at(now_secs() + 3600, TEST_IDENTITY_SECRET)
    }

    /// Assertion signed with an arbitrary secret and expiry.
    pub fn token_expiring_at(&self, exp: u64, secret: &str) -> String {
        let claims = IdentityClaims {
            sub: self.uid.clone(),
            email: self.email.clone(),
            name: self.display_name.clone(),
            exp,
        };
        issue_identity_token(&claims, secret).unwrap()
    }
}

/// `Cookie` header carrying the given session id.
pub fn session_cookie_header(id: SessionId) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("cookie"),
        HeaderValue::from_str(&format!("{VIVEXA_SESSION}={id}")).unwrap(),
    )
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

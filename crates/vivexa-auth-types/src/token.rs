//! Identity-provider assertion (JWT) validation.
//!
//! The identity provider signs a short-lived HS256 token after an interactive sign-in.
//! The session service accepts it as proof of an authenticated identity.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_TOKEN_ISSUERS", test))]
use serde::Serialize;

/// Authenticated identity extracted from a validated assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAssertion {
    /// Opaque identity id assigned by the provider.
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub expires_at: u64,
}

/// Errors returned by [`validate_identity_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token encoding failed")]
    Encoding,
}

/// JWT claims payload of an identity assertion.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | provider identity id |
/// | `email` | custom | account email, as the provider reports it |
/// | `name` | custom, optional | display name |
/// | `exp` | `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_TOKEN_ISSUERS`** feature; only test tooling
/// and provider shims mint assertions.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_TOKEN_ISSUERS", test), derive(Serialize))]
pub struct IdentityClaims {
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: u64,
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<IdentityClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an identity assertion, returning the authenticated identity.
///
/// Blank `sub` or `email` claims are rejected as malformed.
pub fn validate_identity_token(token: &str, secret: &str) -> Result<IdentityAssertion, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.sub.trim().is_empty() || claims.email.trim().is_empty() {
        return Err(AuthError::Malformed);
    }
    let display_name = claims.name.filter(|n| !n.trim().is_empty());
    Ok(IdentityAssertion {
        uid: claims.sub,
        email: claims.email,
        display_name,
        expires_at: claims.exp,
    })
}

/// Sign an identity assertion with the shared secret.
#[cfg(any(feature = "USE_ONLY_IN_TOKEN_ISSUERS", test))]
pub fn issue_identity_token(claims: &IdentityClaims, secret: &str) -> Result<String, AuthError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Encoding)
}

//! Session-id cookie extractors.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::request::Parts;

use vivexa_domain::id::SessionId;

use crate::cookie::VIVEXA_SESSION;

fn session_id_from_parts(parts: &Parts) -> Option<SessionId> {
    CookieJar::from_headers(&parts.headers)
        .get(VIVEXA_SESSION)
        .and_then(|c| c.value().parse::<SessionId>().ok())
}

/// Session id carried by the `vivexa_session` cookie, if present and well formed.
///
/// Never rejects; handlers decide whether a missing session is an error.
#[derive(Debug, Clone, Copy)]
pub struct OptionalSessionCookie(pub Option<SessionId>);

impl<S> FromRequestParts<S> for OptionalSessionCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    // Extract synchronously and return a 'static future; `async fn` here trips E0195 with
    // axum-core 0.5's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let id = session_id_from_parts(parts);
        async move { Ok(Self(id)) }
    }
}

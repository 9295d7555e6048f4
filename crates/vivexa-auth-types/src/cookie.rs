//! Cookie builders for the session id.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use vivexa_domain::id::SessionId;

/// Cookie name carrying the session id.
pub const VIVEXA_SESSION: &str = "vivexa_session";

/// Session cookie Max-Age in seconds (12 hours).
pub const SESSION_COOKIE_MAX_AGE: i64 = 43200;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use vivexa_auth_types::cookie::{set_session_cookie, VIVEXA_SESSION};
/// use vivexa_domain::id::SessionId;
///
/// let id = SessionId::generate();
/// let jar = set_session_cookie(CookieJar::new(), id, "example.com".to_string());
/// let cookie = jar.get(VIVEXA_SESSION).unwrap();
/// assert_eq!(cookie.value(), id.to_string());
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(43200)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, id: SessionId, domain: String) -> CookieJar {
    let cookie = Cookie::build((VIVEXA_SESSION, id.to_string()))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use vivexa_auth_types::cookie::{clear_session_cookie, set_session_cookie, VIVEXA_SESSION};
/// use vivexa_domain::id::SessionId;
///
/// let jar = set_session_cookie(CookieJar::new(), SessionId::generate(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(VIVEXA_SESSION).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((VIVEXA_SESSION, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

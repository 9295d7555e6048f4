use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure of a backing-store lookup (user record by id, staff record by email).
///
/// Never leaves the authorization boundary: every variant is converted into a verdict.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The store reports the record as missing (treated like an empty result).
    #[error("record not found")]
    NotFound,
    /// The store refused the read for lack of privilege.
    #[error("permission denied")]
    PermissionDenied,
    /// Network failure, timeout, or any other store error.
    #[error("lookup failed: {0}")]
    Transient(#[from] anyhow::Error),
}

/// Session service error variants surfaced over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("invalid identity token")]
    InvalidIdentityToken,
    #[error("session not found")]
    SessionNotFound,
    #[error("sign-out failed")]
    SignOutFailed(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SessionServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentityToken => "INVALID_IDENTITY_TOKEN",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SignOutFailed(_) => "SIGN_OUT_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for SessionServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidIdentityToken | Self::SessionNotFound => StatusCode::UNAUTHORIZED,
            Self::SignOutFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors and already covered by the TraceLayer.
        match &self {
            Self::SignOutFailed(e) => {
                tracing::error!(error = %e, kind = "SIGN_OUT_FAILED", "identity provider sign-out failed");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

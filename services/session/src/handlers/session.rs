use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vivexa_auth_types::{
    cookie::{clear_session_cookie, set_session_cookie},
    session::OptionalSessionCookie,
    token::validate_identity_token,
};
use vivexa_domain::id::SessionId;

use crate::domain::repository::Notifier;
use crate::domain::types::{Identity, LOGIN_FAILED, Notification};
use crate::error::SessionServiceError;
use crate::infra::registry::SessionEntry;
use crate::state::AppState;
use crate::usecase::guard::{GuardOutcome, Route, guard};
use crate::usecase::session::{SessionSnapshot, SessionState};

fn live_session(
    state: &AppState,
    cookie: Option<SessionId>,
) -> Result<Arc<SessionEntry>, SessionServiceError> {
    cookie
        .and_then(|id| state.sessions.get(id))
        .ok_or(SessionServiceError::SessionNotFound)
}

// ── POST /session ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub id_token: String,
}

pub async fn create_session(
    State(state): State<AppState>,
    OptionalSessionCookie(cookie): OptionalSessionCookie,
    jar: CookieJar,
    Json(body): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, SessionServiceError> {
    let assertion = match validate_identity_token(&body.id_token, &state.identity_secret) {
        Ok(assertion) => assertion,
        Err(e) => {
            debug!(error = %e, "rejecting identity assertion");
            if let Some(entry) = cookie.and_then(|id| state.sessions.get(id)) {
                entry.notices.notify(Notification::error(LOGIN_FAILED));
            }
            return Err(SessionServiceError::InvalidIdentityToken);
        }
    };

    let (id, entry) = state.sessions.get_or_create(cookie);
    let snapshot = state
        .authorizer
        .sign_in(&entry.store, &entry.notices, Identity::from(assertion))
        .await;

    let jar = set_session_cookie(jar, id, state.cookie_domain.clone());
    Ok((StatusCode::OK, jar, Json(snapshot)))
}

// ── GET /session ──────────────────────────────────────────────────────────────

pub async fn get_session(
    State(state): State<AppState>,
    OptionalSessionCookie(cookie): OptionalSessionCookie,
) -> Result<Json<SessionSnapshot>, SessionServiceError> {
    let entry = live_session(&state, cookie)?;
    Ok(Json(entry.store.snapshot()))
}

// ── DELETE /session ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LogoutResponse {
    pub notifications: Vec<Notification>,
}

pub async fn delete_session(
    State(state): State<AppState>,
    OptionalSessionCookie(cookie): OptionalSessionCookie,
    jar: CookieJar,
) -> Result<impl IntoResponse, SessionServiceError> {
    let entry = live_session(&state, cookie)?;
    state
        .authorizer
        .logout(&entry.store, &entry.notices)
        .await?;

    if let Some(id) = cookie {
        state.sessions.remove(id);
    }
    let body = LogoutResponse {
        notifications: entry.notices.drain(),
    };
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::OK, jar, Json(body)))
}

// ── GET /session/guard ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GuardQuery {
    pub route: Route,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcomeKind {
    Loading,
    Allow,
    Redirect,
}

#[derive(Serialize)]
pub struct GuardResponse {
    pub outcome: GuardOutcomeKind,
    pub redirect_to: Option<Route>,
}

impl From<GuardOutcome> for GuardResponse {
    fn from(outcome: GuardOutcome) -> Self {
        match outcome {
            GuardOutcome::Loading => Self {
                outcome: GuardOutcomeKind::Loading,
                redirect_to: None,
            },
            GuardOutcome::Allow => Self {
                outcome: GuardOutcomeKind::Allow,
                redirect_to: None,
            },
            GuardOutcome::Redirect(route) => Self {
                outcome: GuardOutcomeKind::Redirect,
                redirect_to: Some(route),
            },
        }
    }
}

/// Clients without a live session are evaluated as unauthenticated.
pub async fn check_guard(
    State(state): State<AppState>,
    OptionalSessionCookie(cookie): OptionalSessionCookie,
    Query(query): Query<GuardQuery>,
) -> Json<GuardResponse> {
    let snapshot = cookie
        .and_then(|id| state.sessions.get(id))
        .map(|entry| entry.store.snapshot())
        .unwrap_or_else(|| SessionSnapshot::from(&SessionState::Unauthenticated));
    let is_super_admin = state.authorizer.is_super_admin(&snapshot);
    Json(guard(&snapshot, query.route, is_super_admin).into())
}

// ── GET /session/notifications ────────────────────────────────────────────────

pub async fn drain_notifications(
    State(state): State<AppState>,
    OptionalSessionCookie(cookie): OptionalSessionCookie,
) -> Result<Json<Vec<Notification>>, SessionServiceError> {
    let entry = live_session(&state, cookie)?;
    Ok(Json(entry.notices.drain()))
}

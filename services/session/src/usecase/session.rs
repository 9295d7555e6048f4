//! Session state machine and its owning container.
//!
//! Every change to a session goes through [`reduce`]. [`SessionStore`] assigns generations
//! to sign-ins so that a resolution computed for a superseded sign-in is dropped instead of
//! overwriting the newer decision.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

use vivexa_domain::role::Role;

use crate::domain::types::{DenialReason, Identity, SessionProfile, StaffRecord, Verdict};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedSession {
    pub identity: Identity,
    pub profile: SessionProfile,
    pub staff_profile: Option<StaffRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Resolving {
        identity: Identity,
        generation: u64,
    },
    Authorized(AuthorizedSession),
    /// Identity and profiles are already cleared; only the reason is kept.
    Denied {
        reason: DenialReason,
    },
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn { identity: Identity, generation: u64 },
    Resolved { generation: u64, verdict: Verdict },
    SignedOut,
}

pub fn reduce(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::SignedIn {
            identity,
            generation,
        } => SessionState::Resolving {
            identity,
            generation,
        },
        SessionEvent::SignedOut => SessionState::Unauthenticated,
        SessionEvent::Resolved {
            generation,
            verdict,
        } => match state {
            SessionState::Resolving {
                identity,
                generation: current,
            } if *current == generation => match verdict {
                Verdict::Granted {
                    profile,
                    staff_profile,
                    ..
                } => SessionState::Authorized(AuthorizedSession {
                    identity: identity.clone(),
                    profile,
                    staff_profile,
                }),
                Verdict::Denied(reason) => SessionState::Denied { reason },
            },
            // Superseded or unsolicited resolution.
            _ => state.clone(),
        },
    }
}

/// What the route guard observes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub decision: bool,
    pub loading: bool,
    pub identity: Option<Identity>,
    pub profile: Option<SessionProfile>,
    pub staff_profile: Option<StaffRecord>,
    pub role: Option<Role>,
    pub denial: Option<DenialReason>,
}

impl SessionSnapshot {
    fn empty() -> Self {
        Self {
            decision: false,
            loading: false,
            identity: None,
            profile: None,
            staff_profile: None,
            role: None,
            denial: None,
        }
    }
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Unauthenticated => Self::empty(),
            SessionState::Resolving { identity, .. } => Self {
                loading: true,
                identity: Some(identity.clone()),
                ..Self::empty()
            },
            SessionState::Authorized(session) => Self {
                decision: true,
                loading: false,
                identity: Some(session.identity.clone()),
                profile: Some(session.profile.clone()),
                staff_profile: session.staff_profile.clone(),
                role: Some(session.profile.role),
                denial: None,
            },
            SessionState::Denied { reason } => Self {
                denial: Some(*reason),
                ..Self::empty()
            },
        }
    }
}

/// Explicit owner of one session's state, observable through [`SessionStore::subscribe`].
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&*self.state.borrow())
    }

    /// Identity currently resolving or authorized.
    pub fn current_identity(&self) -> Option<Identity> {
        match &*self.state.borrow() {
            SessionState::Resolving { identity, .. } => Some(identity.clone()),
            SessionState::Authorized(session) => Some(session.identity.clone()),
            SessionState::Unauthenticated | SessionState::Denied { .. } => None,
        }
    }

    /// Enter `Resolving` for a fresh sign-in and return its generation.
    pub fn begin(&self, identity: Identity) -> u64 {
        let mut assigned = 0;
        // Generation assignment happens under the channel's write lock so that generation
        // order and state order agree.
        self.state.send_modify(|state| {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            assigned = generation;
            *state = reduce(
                state,
                SessionEvent::SignedIn {
                    identity,
                    generation,
                },
            );
        });
        assigned
    }

    /// Apply a verdict. Returns `false` when the generation was superseded.
    pub fn resolve(&self, generation: u64, verdict: Verdict) -> bool {
        self.apply(SessionEvent::Resolved {
            generation,
            verdict,
        })
    }

    pub fn sign_out(&self) -> bool {
        self.apply(SessionEvent::SignedOut)
    }

    fn apply(&self, event: SessionEvent) -> bool {
        self.state.send_if_modified(|state| {
            let next = reduce(state, event);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        })
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use vivexa_auth_types::token::IdentityAssertion;
use vivexa_core::serde::to_rfc3339_ms;
use vivexa_domain::id::StaffId;
use vivexa_domain::role::Role;
use vivexa_domain::staff::{StaffKind, StaffStatus};

/// Identity delivered by the identity provider on sign-in. Read-only to this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<IdentityAssertion> for Identity {
    fn from(assertion: IdentityAssertion) -> Self {
        Self {
            id: assertion.uid,
            email: assertion.email,
            display_name: assertion.display_name,
        }
    }
}

/// Administrator-tier account stored under the identity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Free-form role as stored; see [`Role::from_record`].
    pub role: String,
    pub is_active: bool,
}

/// Employee/intern account matched by normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffRecord {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    pub status: StaffStatus,
    pub kind: StaffKind,
    /// Job title, distinct from the session [`Role`].
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Role-scoped profile of an authorized session. Rebuilt on every sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProfile {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

/// Why a session was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    AccountInactive,
    UserNotFound,
    StaffRecordNotFound,
    VerificationFailed,
    StaffVerificationFailed,
}

impl DenialReason {
    pub fn kind(self) -> &'static str {
        match self {
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::StaffRecordNotFound => "STAFF_RECORD_NOT_FOUND",
            Self::VerificationFailed => "VERIFICATION_FAILED",
            Self::StaffVerificationFailed => "STAFF_VERIFICATION_FAILED",
        }
    }

    /// User-facing notification text.
    pub fn message(self) -> &'static str {
        match self {
            Self::AccountInactive => "Access denied: your account is inactive",
            Self::UserNotFound => "Access denied: user not found. Please contact an administrator.",
            Self::StaffRecordNotFound => {
                "Access denied: staff record not found. Please contact an administrator."
            }
            Self::VerificationFailed => "Error verifying access. Please try again later.",
            Self::StaffVerificationFailed => {
                "Error verifying staff access. Please try again later."
            }
        }
    }
}

/// Advisory attached to a super-admin session granted without a readable user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantNotice {
    MissingUserRecord,
    UnreadableUserRecord,
}

impl GrantNotice {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingUserRecord => "Create a user record for this account for full functionality",
            Self::UnreadableUserRecord => {
                "User records are not readable; update the store rules to allow reading them"
            }
        }
    }
}

/// Outcome of the authorization procedure for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Granted {
        profile: SessionProfile,
        /// Full staff record; kept apart from `profile` so department and title survive.
        staff_profile: Option<StaffRecord>,
        notice: Option<GrantNotice>,
    },
    Denied(DenialReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Display name of a bootstrapped super-admin whose provider reports none.
pub const DEFAULT_SUPER_ADMIN_NAME: &str = "Super Admin";

pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGGED_OUT: &str = "Logged out successfully";
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Pending notifications kept per session; older entries are dropped first.
pub const NOTIFICATION_CAPACITY: usize = 32;

/// Default bound on a single backing-store lookup.
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 10_000;

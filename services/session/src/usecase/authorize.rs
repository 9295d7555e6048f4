use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use vivexa_domain::email::normalize_email;
use vivexa_domain::role::Role;

use crate::domain::allow_list::SuperAdminAllowList;
use crate::domain::repository::{StaffDirectory, UserRecordPort};
use crate::domain::types::{
    DEFAULT_SUPER_ADMIN_NAME, DenialReason, GrantNotice, Identity, SessionProfile, Verdict,
};
use crate::error::LookupError;

/// Decides whether an identity may hold a session, and with which profile.
///
/// Allow-listed identities take the super-admin path. Everyone else takes the staff-record
/// path when `staff_accounts` is on, or the plain user-record path when it is off.
pub struct AuthorizeSessionUseCase<U, S>
where
    U: UserRecordPort,
    S: StaffDirectory,
{
    pub users: U,
    pub staff: S,
    pub allow_list: SuperAdminAllowList,
    pub staff_accounts: bool,
    /// Upper bound per lookup; `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
}

impl<U, S> AuthorizeSessionUseCase<U, S>
where
    U: UserRecordPort,
    S: StaffDirectory,
{
    pub async fn execute(&self, identity: &Identity) -> Verdict {
        if self.allow_list.contains(&identity.email) {
            self.authorize_super_admin(identity).await
        } else if self.staff_accounts {
            self.authorize_staff(identity).await
        } else {
            self.authorize_user_record(identity).await
        }
    }

    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, LookupError>>,
    ) -> Result<T, LookupError> {
        match self.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .unwrap_or_else(|_| {
                    Err(LookupError::Transient(anyhow::anyhow!(
                        "lookup timed out after {}ms",
                        limit.as_millis()
                    )))
                }),
            None => lookup.await,
        }
    }

    async fn authorize_super_admin(&self, identity: &Identity) -> Verdict {
        match self.bounded(self.users.find_by_id(&identity.id)).await {
            Ok(Some(record)) if record.is_active => Verdict::Granted {
                profile: SessionProfile {
                    name: record.name,
                    email: record.email,
                    role: Role::Admin,
                    is_active: true,
                },
                staff_profile: None,
                notice: None,
            },
            Ok(Some(_)) => Verdict::Denied(DenialReason::AccountInactive),
            Ok(None) | Err(LookupError::NotFound) => {
                bootstrap_super_admin(identity, GrantNotice::MissingUserRecord)
            }
            Err(LookupError::PermissionDenied) => {
                warn!(
                    identity_id = %identity.id,
                    "user record unreadable; granting allow-listed identity"
                );
                bootstrap_super_admin(identity, GrantNotice::UnreadableUserRecord)
            }
            Err(e) => {
                warn!(identity_id = %identity.id, error = %e, "super-admin lookup failed");
                Verdict::Denied(DenialReason::VerificationFailed)
            }
        }
    }

    async fn authorize_staff(&self, identity: &Identity) -> Verdict {
        let email = normalize_email(&identity.email);
        match self.bounded(self.staff.find_by_email(&email)).await {
            Ok(records) => {
                if records.len() > 1 {
                    debug!(
                        identity_id = %identity.id,
                        matches = records.len(),
                        "several staff records share an email; using the first"
                    );
                }
                match records.into_iter().next() {
                    Some(record) if record.status.is_active() => Verdict::Granted {
                        profile: SessionProfile {
                            name: record.name.clone(),
                            email: record.email.clone(),
                            role: Role::Staff,
                            is_active: true,
                        },
                        staff_profile: Some(record),
                        notice: None,
                    },
                    Some(_) => Verdict::Denied(DenialReason::AccountInactive),
                    None => Verdict::Denied(DenialReason::StaffRecordNotFound),
                }
            }
            Err(LookupError::NotFound) => Verdict::Denied(DenialReason::StaffRecordNotFound),
            Err(e) => {
                warn!(identity_id = %identity.id, error = %e, "staff lookup failed");
                Verdict::Denied(DenialReason::StaffVerificationFailed)
            }
        }
    }

    async fn authorize_user_record(&self, identity: &Identity) -> Verdict {
        match self.bounded(self.users.find_by_id(&identity.id)).await {
            Ok(Some(record)) if record.is_active => Verdict::Granted {
                profile: SessionProfile {
                    role: Role::from_record(&record.role),
                    name: record.name,
                    email: record.email,
                    is_active: true,
                },
                staff_profile: None,
                notice: None,
            },
            Ok(Some(_)) => Verdict::Denied(DenialReason::AccountInactive),
            Ok(None) | Err(LookupError::NotFound) => Verdict::Denied(DenialReason::UserNotFound),
            Err(e) => {
                warn!(identity_id = %identity.id, error = %e, "user record lookup failed");
                Verdict::Denied(DenialReason::VerificationFailed)
            }
        }
    }
}

/// Grant an allow-listed identity a synthesized admin profile without a readable record.
///
/// The only path that authorizes without a backing record. Callers must have checked
/// allow-list membership; staff identities never reach here.
fn bootstrap_super_admin(identity: &Identity, notice: GrantNotice) -> Verdict {
    Verdict::Granted {
        profile: SessionProfile {
            name: identity
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_SUPER_ADMIN_NAME.to_owned()),
            email: identity.email.clone(),
            role: Role::Admin,
            is_active: true,
        },
        staff_profile: None,
        notice: Some(notice),
    }
}

use std::sync::Arc;

use tracing::{debug, info, warn};

use vivexa_domain::role::Role;

use crate::domain::repository::{IdentityProvider, Notifier, StaffDirectory, UserRecordPort};
use crate::domain::types::{
    Identity, LOGGED_OUT, LOGIN_SUCCEEDED, LOGOUT_FAILED, Notification, Verdict,
};
use crate::error::SessionServiceError;
use crate::usecase::authorize::AuthorizeSessionUseCase;
use crate::usecase::session::{SessionSnapshot, SessionStore};

/// Change reported by the identity provider.
#[derive(Debug, Clone)]
pub enum AuthChange {
    SignedIn(Identity),
    SignedOut,
}

/// Drives a [`SessionStore`] from identity-provider events.
pub struct SessionAuthorizer<U, S, P>
where
    U: UserRecordPort,
    S: StaffDirectory,
    P: IdentityProvider,
{
    pub authorize: AuthorizeSessionUseCase<U, S>,
    pub identity_provider: Arc<P>,
}

impl<U, S, P> SessionAuthorizer<U, S, P>
where
    U: UserRecordPort,
    S: StaffDirectory,
    P: IdentityProvider,
{
    /// Apply one identity change and return the snapshot it produced.
    ///
    /// A sign-in that is overtaken by a newer change while its lookups run leaves the store
    /// untouched and emits nothing.
    pub async fn on_auth_change(
        &self,
        store: &SessionStore,
        notifier: &impl Notifier,
        change: AuthChange,
    ) -> SessionSnapshot {
        match change {
            AuthChange::SignedOut => {
                store.sign_out();
            }
            AuthChange::SignedIn(identity) => {
                self.resolve_sign_in(store, notifier, identity).await;
            }
        }
        store.snapshot()
    }

    /// Explicit sign-in: resolve the identity and confirm success to the user.
    ///
    /// Only a verdict that was applied and granted is confirmed.
    pub async fn sign_in(
        &self,
        store: &SessionStore,
        notifier: &impl Notifier,
        identity: Identity,
    ) -> SessionSnapshot {
        if self.resolve_sign_in(store, notifier, identity).await {
            notifier.notify(Notification::success(LOGIN_SUCCEEDED));
        }
        store.snapshot()
    }

    /// Returns true when this call's verdict reached the store and granted access.
    async fn resolve_sign_in(
        &self,
        store: &SessionStore,
        notifier: &impl Notifier,
        identity: Identity,
    ) -> bool {
        let generation = store.begin(identity.clone());
        let verdict = self.authorize.execute(&identity).await;

        let denial = match &verdict {
            Verdict::Denied(reason) => Some(*reason),
            Verdict::Granted { .. } => None,
        };
        let notice = match &verdict {
            Verdict::Granted { notice, .. } => *notice,
            Verdict::Denied(_) => None,
        };
        let role = match &verdict {
            Verdict::Granted { profile, .. } => Some(profile.role),
            Verdict::Denied(_) => None,
        };

        if !store.resolve(generation, verdict) {
            debug!(identity_id = %identity.id, generation, "discarding superseded resolution");
            return false;
        }

        match denial {
            None => {
                info!(
                    identity_id = %identity.id,
                    role = role.map(Role::as_str).unwrap_or_default(),
                    bootstrapped = notice.is_some(),
                    "session authorized"
                );
                if let Some(notice) = notice {
                    notifier.notify(Notification::warning(notice.message()));
                }
            }
            Some(reason) => {
                warn!(identity_id = %identity.id, reason = reason.kind(), "session denied");
                notifier.notify(Notification::error(reason.message()));
                self.spawn_sign_out(identity);
            }
        }

        denial.is_none()
    }

    /// End the provider session, then reset the store. On failure the store is left as is.
    pub async fn logout(
        &self,
        store: &SessionStore,
        notifier: &impl Notifier,
    ) -> Result<(), SessionServiceError> {
        if let Some(identity) = store.current_identity() {
            if let Err(e) = self.identity_provider.sign_out(&identity).await {
                notifier.notify(Notification::error(LOGOUT_FAILED));
                return Err(e);
            }
        }
        store.sign_out();
        notifier.notify(Notification::success(LOGGED_OUT));
        Ok(())
    }

    /// Whether the snapshot's identity is on the super-admin allow-list.
    pub fn is_super_admin(&self, snapshot: &SessionSnapshot) -> bool {
        snapshot
            .identity
            .as_ref()
            .is_some_and(|identity| self.authorize.allow_list.contains(&identity.email))
    }

    fn spawn_sign_out(&self, identity: Identity) {
        let provider = Arc::clone(&self.identity_provider);
        tokio::spawn(async move {
            if let Err(e) = provider.sign_out(&identity).await {
                warn!(identity_id = %identity.id, error = %e, "provider sign-out after denial failed");
            }
        });
    }
}


#![allow(async_fn_in_trait)]

use std::future::Future;

use crate::domain::types::{Identity, Notification, StaffRecord, UserRecord};
use crate::error::{LookupError, SessionServiceError};

/// Port for administrator-tier user records, keyed by identity id.
pub trait UserRecordPort: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, LookupError>;
}

/// Port for the staff directory.
pub trait StaffDirectory: Send + Sync {
    /// Equality query on the stored (normalized) email. Callers normalize first.
    async fn find_by_email(&self, email: &str) -> Result<Vec<StaffRecord>, LookupError>;
}

/// Port for the identity provider's session control.
pub trait IdentityProvider: Send + Sync + 'static {
    /// End the provider-side session. May complete after the caller has moved on.
    fn sign_out(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<(), SessionServiceError>> + Send;
}

/// Sink for transient user-visible messages. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

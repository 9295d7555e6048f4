use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::SessionConfig;
use crate::infra::db::{DbStaffDirectory, DbUserRecordRepository};
use crate::infra::identity::HttpIdentityProvider;
use crate::infra::registry::SessionRegistry;
use crate::usecase::authorize::AuthorizeSessionUseCase;
use crate::usecase::authorizer::SessionAuthorizer;

pub type Authorizer =
    SessionAuthorizer<DbUserRecordRepository, DbStaffDirectory, HttpIdentityProvider>;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub identity_secret: String,
    pub cookie_domain: String,
    pub sessions: Arc<SessionRegistry>,
    pub authorizer: Arc<Authorizer>,
}

impl AppState {
    pub fn new(
        config: &SessionConfig,
        db: DatabaseConnection,
        identity_provider: HttpIdentityProvider,
    ) -> Self {
        let db = Arc::new(db);
        let authorize = AuthorizeSessionUseCase {
            users: DbUserRecordRepository { db: Arc::clone(&db) },
            staff: DbStaffDirectory { db: Arc::clone(&db) },
            allow_list: config.allow_list(),
            staff_accounts: config.staff_accounts,
            lookup_timeout: config.lookup_timeout(),
        };
        Self {
            db,
            identity_secret: config.identity_token_secret.clone(),
            cookie_domain: config.cookie_domain.clone(),
            sessions: Arc::new(SessionRegistry::default()),
            authorizer: Arc::new(SessionAuthorizer {
                authorize,
                identity_provider: Arc::new(identity_provider),
            }),
        }
    }
}

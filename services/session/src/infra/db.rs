use std::sync::Arc;

use anyhow::anyhow;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, RuntimeErr,
};

use vivexa_domain::id::StaffId;
use vivexa_domain::staff::{StaffKind, StaffStatus};
use vivexa_session_schema::{staff, users};

use crate::domain::repository::{StaffDirectory, UserRecordPort};
use crate::domain::types::{StaffRecord, UserRecord};
use crate::error::LookupError;

/// Postgres `insufficient_privilege`.
const SQLSTATE_INSUFFICIENT_PRIVILEGE: &str = "42501";

// ── User records ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRecordRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRecordPort for DbUserRecordRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, LookupError> {
        let model = users::Entity::find_by_id(id.to_owned())
            .one(self.db.as_ref())
            .await
            .map_err(|e| classify_db_err(e, "find user record"))?;
        Ok(model.map(user_from_model))
    }
}

// ── Staff directory ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStaffDirectory {
    pub db: Arc<DatabaseConnection>,
}

impl StaffDirectory for DbStaffDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Vec<StaffRecord>, LookupError> {
        let models = staff::Entity::find()
            .filter(staff::Column::Email.eq(email))
            .order_by_asc(staff::Column::CreatedAt)
            .order_by_asc(staff::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| classify_db_err(e, "find staff records"))?;
        Ok(models.into_iter().map(staff_from_model).collect())
    }
}

// ── Error classification ──────────────────────────────────────────────────────

pub(crate) fn classify_db_err(err: DbErr, action: &'static str) -> LookupError {
    if matches!(err, DbErr::RecordNotFound(_)) {
        return LookupError::NotFound;
    }
    if is_permission_denied(&err) {
        return LookupError::PermissionDenied;
    }
    LookupError::Transient(anyhow!(err).context(action))
}

fn is_permission_denied(err: &DbErr) -> bool {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Conn(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|d| d.code())
            .as_deref()
            == Some(SQLSTATE_INSUFFICIENT_PRIVILEGE),
        _ => false,
    }
}

// ── Model → domain mappers ────────────────────────────────────────────────────

fn user_from_model(m: users::Model) -> UserRecord {
    UserRecord {
        id: m.id,
        name: m.name,
        email: m.email,
        role: m.role,
        is_active: m.is_active,
    }
}

fn staff_from_model(m: staff::Model) -> StaffRecord {
    StaffRecord {
        id: StaffId(m.id),
        name: m.name,
        email: m.email,
        status: StaffStatus::from_wire(&m.status),
        kind: StaffKind::from_wire(&m.kind),
        role: m.role,
        department: m.department,
    }
}

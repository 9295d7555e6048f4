//! Session role domain types.

use serde::{Deserialize, Serialize};

/// Role granted to an authorized session.
///
/// Wire format: lowercase string (`"admin"`, `"staff"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    /// Interpret the free-form `role` field of a stored user record.
    ///
    /// Only an exact `"admin"` grants the admin tier; anything else is staff.
    pub fn from_record(value: &str) -> Self {
        match value.trim() {
            "admin" => Self::Admin,
            _ => Self::Staff,
        }
    }
}

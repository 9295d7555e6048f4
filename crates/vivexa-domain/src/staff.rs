//! Staff directory domain types.

use serde::{Deserialize, Serialize};

/// Employment status of a staff record.
///
/// Wire format: `"active"` / `"inactive"`. Any stored value other than `"active"` is
/// treated as inactive, so an unrecognized status never authorizes a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Active,
    Inactive,
}

impl StaffStatus {
    pub fn from_wire(value: &str) -> Self {
        if value == "active" {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Kind of staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffKind {
    Employee,
    Intern,
}

impl StaffKind {
    /// Unknown values fall back to `Employee`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "intern" => Self::Intern,
            _ => Self::Employee,
        }
    }
}

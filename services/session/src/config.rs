use std::time::Duration;

use serde::Deserialize;

use vivexa_core::config::Config;

use crate::domain::allow_list::{AllowListMatching, SuperAdminAllowList};
use crate::domain::types::DEFAULT_LOOKUP_TIMEOUT_MS;

/// Session service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret the identity provider signs assertions with.
    pub identity_token_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Comma-separated super-admin emails. Env var: `SUPER_ADMIN_EMAILS`.
    #[serde(default)]
    pub super_admin_emails: Vec<String>,
    #[serde(default)]
    pub super_admin_case_insensitive: bool,
    /// Enable the staff-record path for non-allow-listed identities.
    #[serde(default = "default_true")]
    pub staff_accounts: bool,
    /// Per-lookup bound in milliseconds; 0 disables it.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    /// Provider endpoint notified on sign-out. Unset means local-only sign-out.
    #[serde(default)]
    pub identity_signout_url: Option<String>,
    /// TCP port to listen on (default 3114). Env var: `SESSION_PORT`.
    #[serde(default = "default_port")]
    pub session_port: u16,
}

impl Config for SessionConfig {}

fn default_true() -> bool {
    true
}

fn default_lookup_timeout_ms() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_MS
}

fn default_port() -> u16 {
    3114
}

impl SessionConfig {
    pub fn allow_list(&self) -> SuperAdminAllowList {
        let matching = if self.super_admin_case_insensitive {
            AllowListMatching::CaseInsensitive
        } else {
            AllowListMatching::Exact
        };
        SuperAdminAllowList::new(&self.super_admin_emails, matching)
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_ms > 0).then(|| Duration::from_millis(self.lookup_timeout_ms))
    }
}

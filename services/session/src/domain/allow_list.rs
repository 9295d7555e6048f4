//! Super-administrator allow-list.

use vivexa_domain::email::normalize_email;

/// How identity emails are compared against the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowListMatching {
    /// Byte-for-byte equality. `Admin@x.com` does not match `admin@x.com`.
    #[default]
    Exact,
    /// Trimmed, case-insensitive equality (same normalization as staff lookups).
    CaseInsensitive,
}

/// Configured set of emails granted super-administrator trust independent of any stored record.
#[derive(Debug, Clone, Default)]
pub struct SuperAdminAllowList {
    emails: Vec<String>,
    matching: AllowListMatching,
}

impl SuperAdminAllowList {
    /// Blank entries are discarded; surrounding whitespace in configured entries is trimmed.
    pub fn new<I, S>(emails: I, matching: AllowListMatching) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_owned())
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails, matching }
    }

    pub fn contains(&self, email: &str) -> bool {
        match self.matching {
            AllowListMatching::Exact => self.emails.iter().any(|e| e == email),
            AllowListMatching::CaseInsensitive => {
                let email = normalize_email(email);
                self.emails.iter().any(|e| normalize_email(e) == email)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }
}

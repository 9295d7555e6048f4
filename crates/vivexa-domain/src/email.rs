//! Email address helpers.

/// Normalize an email for staff-directory lookups: trim surrounding whitespace, lower-case.
///
/// Staff records are stored in this form, so a lookup must apply it to the
/// identity-provider email before querying.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

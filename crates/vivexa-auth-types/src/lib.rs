//! Auth types shared across Vivexa services.
//!
//! Provides identity-provider assertion validation, the session cookie builders, and the
//! `OptionalSessionCookie` extractor.

pub mod cookie;
pub mod session;
pub mod token;

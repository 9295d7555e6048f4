//! Test utilities for Vivexa services.
//!
//! Provides an identity-provider stand-in that mints signed assertions, plus cookie helpers.
//! Import in tests only, never in production code.

pub mod identity;

//! Domain types shared across all Vivexa services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Services map storage rows and wire values onto these types at their edges.

pub mod email;
pub mod id;
pub mod role;
pub mod staff;

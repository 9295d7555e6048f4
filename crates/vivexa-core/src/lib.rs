//! Service plumbing shared by Vivexa services: configuration, tracing, health, middleware.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;

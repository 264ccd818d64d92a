//! Ambient plumbing shared by tvlink services: config loading, JSON error
//! bodies, request-id/trace layers, serde helpers and tracing setup.

pub mod config;
pub mod error;
pub mod middleware;
pub mod serde;
pub mod tracing;

//! Vendor API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes)
//! so integration tests, the server binary and the seeding tool can all
//! access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;

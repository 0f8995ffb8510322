//! Domain types, validation rules and the vendor query builder.
//!
//! This crate has no database or HTTP dependencies so its logic can be
//! unit-tested in isolation and reused by the API and seeding tooling.

pub mod error;
pub mod types;
pub mod vendor;
pub mod vendor_query;

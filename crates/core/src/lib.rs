//! Domain types and rules for the NumisRoma backend.
//!
//! This crate has no database or HTTP dependencies so its rules can be
//! exercised directly by unit tests and shared by every other crate.

pub mod authz;
pub mod device;
pub mod error;
pub mod types;
pub mod validation;

//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs consumed by the matching repository
//! - A `Serialize` response type where the row must not be exposed as-is

pub mod collection;
pub mod follow;
pub mod message;
pub mod session;
pub mod user;

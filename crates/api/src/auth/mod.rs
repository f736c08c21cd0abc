//! Authentication primitives.
//!
//! - [`jwt`] -- bearer-token issuing, verification, and hashing.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`sessions`] -- the server-side session registry.

pub mod jwt;
pub mod password;
pub mod sessions;

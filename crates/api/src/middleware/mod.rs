//! Request extractors that run before handler logic.
//!
//! - [`auth::AuthUser`] -- required authentication gate.
//! - [`auth::MaybeAuthUser`] -- optional gate; failures degrade to anonymous.
//! - [`client::ClientContext`] -- user agent, IP, and location of the caller.

pub mod auth;
pub mod client;

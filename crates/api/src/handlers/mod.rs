pub mod auth;
pub mod collections;
pub mod follows;
pub mod messages;
pub mod sessions;
pub mod users;

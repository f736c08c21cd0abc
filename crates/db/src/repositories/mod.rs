//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod collection_repo;
pub mod follow_repo;
pub mod message_repo;
pub mod session_repo;
pub mod user_repo;

pub use collection_repo::CollectionRepo;
pub use follow_repo::FollowRepo;
pub use message_repo::MessageRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

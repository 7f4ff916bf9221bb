//! Core domain logic for Blogly.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::post::{BlogPost, PostId};
pub use model::tag::{Tag, TagId};
pub use model::user::{NewUser, User, UserId, UserPatch};
pub use model::ValidationError;
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::post_service::PostService;
pub use service::tag_service::TagService;
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

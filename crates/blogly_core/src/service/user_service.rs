//! User use-case service.
//!
//! # Responsibility
//! - Implement CreateUser/UpdateUser/DeleteUser over string-typed form
//!   fields, plus the user read paths.
//!
//! # Invariants
//! - Names are persisted lower-cased regardless of input casing.
//! - `update_user` applies only present patch fields (partial update).
//! - `delete_user` cascades over the user's posts and their tag links.

use crate::model::user::{parse_birthdate, NewUser, User, UserId, UserPatch};
use crate::repo::user_repo::UserRepository;
use crate::service::{read_back_missing, ServiceError, ServiceResult};
use log::info;

/// User service facade over a repository implementation.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one user from raw form fields.
    ///
    /// `birthdate` must parse as `YYYY-MM-DD`; a blank `image_url` is
    /// stored as NULL. A duplicate `(first_name, last_name)` pair fails
    /// with [`ServiceError::Conflict`].
    pub fn create_user(
        &mut self,
        first_name: &str,
        last_name: &str,
        birthdate: &str,
        image_url: Option<&str>,
    ) -> ServiceResult<User> {
        let birthdate = parse_birthdate(birthdate)?;
        let draft = NewUser::new(first_name, last_name, birthdate, image_url);
        draft.validate()?;

        let id = self.repo.create_user(&draft)?;
        info!("event=user_created module=service user_id={id}");
        self.repo
            .get_user(id)?
            .ok_or_else(|| read_back_missing("user"))
    }

    /// Applies a partial update; fields absent from the patch stay
    /// unchanged. An empty patch is a no-op returning the current row.
    pub fn update_user(&mut self, id: UserId, patch: &UserPatch) -> ServiceResult<User> {
        self.repo.update_user(id, patch)?;
        self.repo
            .get_user(id)?
            .ok_or_else(|| read_back_missing("user"))
    }

    /// Deletes the user and, in the same transaction, all their posts and
    /// those posts' tag links.
    pub fn delete_user(&mut self, id: UserId) -> ServiceResult<()> {
        self.repo.delete_user(id)?;
        info!("event=user_deleted module=service user_id={id}");
        Ok(())
    }

    /// Gets one user by id.
    pub fn get_user(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user(id)?
            .ok_or(ServiceError::NotFound { entity: "user", id })
    }

    /// Lists all users in stable id order.
    pub fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.list_users()?)
    }
}

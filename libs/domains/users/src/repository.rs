use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::{User, UserChanges};

/// Persistence for credential records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self) -> UserResult<Vec<User>>;

    /// Returns the updated user, or `None` if `id` is unknown.
    async fn update(&self, id: ObjectId, changes: UserChanges) -> UserResult<Option<User>>;

    /// Returns the deleted user, or `None` if `id` is unknown.
    async fn delete(&self, id: ObjectId) -> UserResult<Option<User>>;
}

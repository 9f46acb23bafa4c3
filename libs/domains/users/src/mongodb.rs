//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::ensure_unique_index;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, oid::ObjectId, to_bson},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserChanges};
use crate::repository::UserRepository;

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    /// Unique index on `email`.
    pub async fn init_indexes(&self) -> UserResult<()> {
        ensure_unique_index(&self.collection, "email").await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;

        tracing::info!(role = %user.role, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: UserChanges) -> UserResult<Option<User>> {
        let profile = match &changes.profile {
            Some(profile) => to_bson(profile).map_err(|e| UserError::Database(e.to_string()))?,
            None => Bson::Null,
        };
        let update = doc! {
            "$set": {
                "email": &changes.email,
                "password_hash": &changes.password_hash,
                "role": changes.role.to_string(),
                "profile": profile,
                "updated_at": Utc::now().to_rfc3339(),
            }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> UserResult<Option<User>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(deleted)
    }
}

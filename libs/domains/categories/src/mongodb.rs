//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::ensure_unique_index;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryInput};
use crate::repository::CategoryRepository;

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Category>("categories"),
        }
    }

    /// Unique index on `name`.
    pub async fn init_indexes(&self) -> CategoryResult<()> {
        ensure_unique_index(&self.collection, "name").await?;
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CategoryInput) -> CategoryResult<Category> {
        let category = Category::new(input);
        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: CategoryInput) -> CategoryResult<Option<Category>> {
        let update = doc! {
            "$set": { "name": &input.name, "updated_at": Utc::now().to_rfc3339() }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(category_id = %id, "Category updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(category_id = %id, "Category deleted");
        }
        Ok(deleted)
    }
}

//! MongoDB implementation of BrandRepository

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

use crate::error::BrandResult;
use crate::models::{Brand, BrandInput};
use crate::repository::BrandRepository;

pub struct MongoBrandRepository {
    collection: Collection<Brand>,
}

impl MongoBrandRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Brand>("brands"),
        }
    }

    /// Unique index on `name`.
    pub async fn init_indexes(&self) -> BrandResult<()> {
        ensure_unique_index(&self.collection, "name").await?;
        Ok(())
    }
}

#[async_trait]
impl BrandRepository for MongoBrandRepository {
    #[instrument(skip(self, input), fields(brand_name = %input.name))]
    async fn create(&self, input: BrandInput) -> BrandResult<Brand> {
        let brand = Brand::new(input);
        self.collection.insert_one(&brand).await?;

        tracing::info!(brand_id = %brand.id, "Brand created");
        Ok(brand)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> BrandResult<Option<Brand>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> BrandResult<Option<Brand>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> BrandResult<Vec<Brand>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: BrandInput) -> BrandResult<Option<Brand>> {
        let update = doc! {
            "$set": { "name": &input.name, "updated_at": Utc::now().to_rfc3339() }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(brand_id = %id, "Brand updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> BrandResult<Option<Brand>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(brand_id = %id, "Brand deleted");
        }
        Ok(deleted)
    }
}

//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::ensure_unique_index;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{PopulatedProduct, Product, ProductChanges};
use crate::repository::ProductRepository;

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>("products"),
        }
    }

    /// Unique index on `name`.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        ensure_unique_index(&self.collection, "name").await?;
        Ok(())
    }
}

/// `$lookup` of `field` in `from`, kept as a single optional `{_id, name}`.
fn populate(field: &str, from: &str) -> [Document; 2] {
    [
        doc! {
            "$lookup": {
                "from": from,
                "localField": field,
                "foreignField": "_id",
                "pipeline": [{ "$project": { "_id": 1, "name": 1 } }],
                "as": field,
            }
        },
        doc! {
            "$unwind": { "path": format!("${field}"), "preserveNullAndEmptyArrays": true }
        },
    ]
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, images = product.images.len(), "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    #[instrument(skip(self))]
    async fn list_populated(&self) -> ProductResult<Vec<PopulatedProduct>> {
        let pipeline: Vec<Document> = populate("brand", "brands")
            .into_iter()
            .chain(populate("category", "categories"))
            .collect();

        let cursor = self
            .collection
            .aggregate(pipeline)
            .with_type::<PopulatedProduct>()
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let update = doc! {
            "$set": {
                "name": &changes.name,
                "description": &changes.description,
                "stock": changes.stock,
                "price": changes.price,
                "brand": changes.brand,
                "category": changes.category,
                "updated_at": Utc::now().to_rfc3339(),
            }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted");
        }
        Ok(deleted)
    }
}

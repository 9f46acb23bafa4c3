use axum_helpers::validation::rules::letters_only;
use axum_helpers::{Field, JsonShape, Kind};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category document as stored in the `categories` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(input: CategoryInput) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /categories/add` and `PUT /categories/update/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    /// 2 to 16 letters; spaces and `&` allowed
    #[schema(example = "Home & Garden")]
    #[validate(
        length(min = 2, max = 16, message = "The name must have between 2 and 16 characters."),
        custom(function = "letters_only")
    )]
    pub name: String,
}

impl JsonShape for CategoryInput {
    const FIELDS: &'static [Field] = &[Field::required("name", Kind::String)];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

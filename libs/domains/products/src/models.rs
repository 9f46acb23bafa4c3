use axum_helpers::validation::rules::{contains_letter, object_id};
use axum_helpers::{
    Field, FieldError, FileRule, FormSchema, JsonShape, Kind, MultipartForm, ValidationReport,
};
use chrono::{DateTime, Utc};
use image_store::{ImageUpload, StoredImage};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ProductError;

/// Pictures accepted on `POST /products/add`.
pub const IMAGES: FileRule = FileRule {
    field: "images",
    accepted_types: &["image/jpeg", "image/jpg", "image/png"],
    max_bytes: 5_000_000,
};

/// Product document as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub stock: f64,
    pub price: f64,
    pub brand: ObjectId,
    pub category: ObjectId,
    #[serde(default)]
    pub images: Vec<StoredImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(changes: ProductChanges, images: Vec<StoredImage>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: changes.name,
            description: changes.description,
            stock: changes.stock,
            price: changes.price,
            brand: changes.brand,
            category: changes.category,
            images,
            created_at: now,
            updated_at: now,
        }
    }
}

/// `{_id, name}` of a looked-up brand or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

/// A product with its brand and category resolved. A dangling reference
/// resolves to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedProduct {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub stock: f64,
    pub price: f64,
    #[serde(default)]
    pub brand: Option<NamedRef>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub images: Vec<StoredImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated product fields with parsed references.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub stock: f64,
    pub price: f64,
    pub brand: ObjectId,
    pub category: ObjectId,
}

/// Product fields, as JSON on `PUT /products/update/{id}` and as
/// multipart text fields on `POST /products/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Pavilion Laptop 15")]
    #[validate(
        length(min = 4, max = 32, message = "The name must have between 4 and 32 characters."),
        custom(function = "contains_letter")
    )]
    pub name: String,
    #[validate(length(
        min = 32,
        max = 4096,
        message = "The description must have between 32 and 4096 characters."
    ))]
    pub description: String,
    #[schema(example = 12)]
    #[validate(
        required(message = "The stock is required."),
        range(min = 0.0, message = "The stock must not be negative.")
    )]
    pub stock: Option<f64>,
    #[schema(example = 799.9)]
    #[validate(
        required(message = "The price is required."),
        range(min = 0.0, message = "The price must not be negative.")
    )]
    pub price: Option<f64>,
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    #[validate(custom(function = "object_id"))]
    pub brand: String,
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f7")]
    #[validate(custom(function = "object_id"))]
    pub category: String,
}

impl JsonShape for ProductInput {
    const FIELDS: &'static [Field] = &[
        Field::required("name", Kind::String),
        Field::required("description", Kind::String),
        Field::required("stock", Kind::Number),
        Field::required("price", Kind::Number),
        Field::required("brand", Kind::String),
        Field::required("category", Kind::String),
    ];
}

impl TryFrom<ProductInput> for ProductChanges {
    type Error = ProductError;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        let reference = |field: &str, value: &str| {
            ObjectId::parse_str(value)
                .map_err(|_| ProductError::InvalidInput(format!("The {field} is not a valid ObjectId.")))
        };
        let number = |field: &str, value: Option<f64>| {
            value.ok_or_else(|| ProductError::InvalidInput(format!("The {field} is required.")))
        };

        Ok(Self {
            stock: number("stock", input.stock)?,
            price: number("price", input.price)?,
            brand: reference("brand", &input.brand)?,
            category: reference("category", &input.category)?,
            name: input.name,
            description: input.description,
        })
    }
}

/// Multipart body of `POST /products/add`: the product fields as text
/// plus an `images` file array.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub input: ProductInput,
    pub images: Vec<ImageUpload>,
}

impl ProductForm {
    /// Multipart text is coerced to a number; an unparseable value is
    /// reported here and missing values by the `required` rule.
    fn number(form: &MultipartForm, field: &'static str, report: &mut ValidationReport) -> Option<f64> {
        let raw = form.field(field)?;
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                report.push(FieldError::new(field, format!("The {field} must be a number.")));
                None
            }
        }
    }

    fn text(form: &MultipartForm, field: &'static str, report: &mut ValidationReport) -> String {
        match form.field(field) {
            Some(value) => value.to_string(),
            None => {
                report.push(FieldError::new(field, format!("The {field} is required.")));
                String::new()
            }
        }
    }
}

impl FormSchema for ProductForm {
    fn from_form(form: &MultipartForm) -> Result<Self, ValidationReport> {
        let mut report = ValidationReport::default();

        let input = ProductInput {
            name: Self::text(form, "name", &mut report),
            description: Self::text(form, "description", &mut report),
            stock: Self::number(form, "stock", &mut report),
            price: Self::number(form, "price", &mut report),
            brand: Self::text(form, "brand", &mut report),
            category: Self::text(form, "category", &mut report),
        };

        // One message per field: presence and coercion problems win.
        if let Err(errors) = input.validate() {
            let rules = ValidationReport::from(&errors);
            let extra: Vec<FieldError> = rules
                .errors()
                .iter()
                .filter(|e| !report.has_field(&e.field))
                .cloned()
                .collect();
            report.extend(extra);
        }
        report.extend(IMAGES.check(form));

        report.into_result()?;

        let images = form
            .files(IMAGES.field)
            .map(|file| ImageUpload::new(file.file_name.clone(), file.content_type.clone(), file.data.clone()))
            .collect();

        Ok(Self { input, images })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f8")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub stock: f64,
    pub price: f64,
    /// Brand ObjectId
    pub brand: String,
    /// Category ObjectId
    pub category: String,
    pub images: Vec<StoredImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            stock: product.stock,
            price: product.price,
            brand: product.brand.to_hex(),
            category: product.category.to_hex(),
            images: product.images,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReferenceResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[schema(example = "HP")]
    pub name: String,
}

impl From<NamedRef> for ReferenceResponse {
    fn from(named: NamedRef) -> Self {
        Self {
            id: named.id.to_hex(),
            name: named.name,
        }
    }
}

/// List entry with brand and category populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stock: f64,
    pub price: f64,
    pub brand: Option<ReferenceResponse>,
    pub category: Option<ReferenceResponse>,
    pub images: Vec<StoredImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PopulatedProduct> for PopulatedProductResponse {
    fn from(product: PopulatedProduct) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            stock: product.stock,
            price: product.price,
            brand: product.brand.map(ReferenceResponse::from),
            category: product.category.map(ReferenceResponse::from),
            images: product.images,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const DESCRIPTION: &str = "A light laptop with a bright display and long battery life.";

    pub(crate) fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.into(),
            description: DESCRIPTION.into(),
            stock: Some(12.0),
            price: Some(799.9),
            brand: ObjectId::new().to_hex(),
            category: ObjectId::new().to_hex(),
        }
    }

    pub(crate) fn product(name: &str) -> Product {
        Product::new(ProductChanges::try_from(input(name)).unwrap(), Vec::new())
    }

    #[test]
    fn test_product_input_rules() {
        assert!(input("Pavilion 15").validate().is_ok());

        let report = |input: ProductInput| ValidationReport::from(&input.validate().unwrap_err());

        assert!(report(ProductInput { name: "1234".into(), ..input("x") }).has_field("name"));
        assert!(report(ProductInput { description: "short".into(), ..input("Pavilion") }).has_field("description"));
        assert!(report(ProductInput { stock: None, ..input("Pavilion") }).has_field("stock"));
        assert!(report(ProductInput { price: Some(-1.0), ..input("Pavilion") }).has_field("price"));
        assert!(report(ProductInput { brand: "nope".into(), ..input("Pavilion") }).has_field("brand"));
    }

    #[test]
    fn test_changes_parse_references() {
        let raw = input("Pavilion");
        let changes = ProductChanges::try_from(raw.clone()).unwrap();
        assert_eq!(changes.brand.to_hex(), raw.brand);
        assert_eq!(changes.stock, 12.0);
    }

    #[test]
    fn test_populated_product_tolerates_dangling_refs() {
        let product = product("Pavilion");
        let mut document = mongodb::bson::to_document(&product).unwrap();
        document.remove("brand");
        document.insert("category", mongodb::bson::doc! { "_id": product.category, "name": "Laptops" });

        let populated: PopulatedProduct = mongodb::bson::from_document(document).unwrap();
        let response = PopulatedProductResponse::from(populated);

        assert!(response.brand.is_none());
        assert_eq!(response.category.unwrap().name, "Laptops");
    }
}

use axum_helpers::validation::rules::{contains_letter, object_id};
use axum_helpers::{Field, JsonShape, Kind};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::OrderError;

/// One order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    #[schema(example = "Pavilion 15")]
    pub name: String,
    #[schema(example = 10.0)]
    pub price: f64,
    #[schema(example = 2.0)]
    pub quantity: f64,
}

/// Σ price × quantity.
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(|item| item.price * item.quantity).sum()
}

/// Order document as stored in the `orders` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub customer: ObjectId,
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default)]
    pub is_cancel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(changes: OrderChanges) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            customer: changes.customer,
            total: order_total(&changes.items),
            items: changes.items,
            is_cancel: changes.is_cancel.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated order fields. The total is always derived from `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderChanges {
    pub customer: ObjectId,
    pub items: Vec<OrderItem>,
    /// `None` leaves the flag as it is on update
    pub is_cancel: Option<bool>,
}

impl OrderChanges {
    pub fn total(&self) -> f64 {
        order_total(&self.items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemInput {
    #[schema(example = "Pavilion 15")]
    #[validate(
        length(min = 4, max = 32, message = "The name must have between 4 and 32 characters."),
        custom(function = "contains_letter")
    )]
    pub name: String,
    #[schema(example = 10.0)]
    #[validate(
        required(message = "The price is required."),
        range(min = 0.0, message = "The price must not be negative.")
    )]
    pub price: Option<f64>,
    #[schema(example = 2.0)]
    #[validate(
        required(message = "The quantity is required."),
        range(min = 0.0, message = "The quantity must not be negative.")
    )]
    pub quantity: Option<f64>,
}

/// Body of `POST /orders/add` and `PUT /orders/update/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    #[validate(custom(function = "object_id"))]
    pub customer: String,
    #[validate(length(min = 1, message = "The items must not be empty."), nested)]
    pub items: Vec<OrderItemInput>,
    /// Accepted for compatibility; the stored total is computed from `items`
    #[validate(range(min = 0.0, message = "The total must not be negative."))]
    pub total: Option<f64>,
    pub is_cancel: Option<bool>,
}

const ITEM: &[Field] = &[
    Field::required("name", Kind::String),
    Field::required("price", Kind::Number),
    Field::required("quantity", Kind::Number),
];

impl JsonShape for OrderInput {
    const FIELDS: &'static [Field] = &[
        Field::required("customer", Kind::String),
        Field::required("items", Kind::List(ITEM)),
        Field::optional("total", Kind::Number),
        Field::optional("isCancel", Kind::Boolean).named("is_cancel"),
    ];
}

impl TryFrom<OrderInput> for OrderChanges {
    type Error = OrderError;

    fn try_from(input: OrderInput) -> Result<Self, Self::Error> {
        let customer = ObjectId::parse_str(&input.customer)
            .map_err(|_| OrderError::InvalidInput("The customer is not a valid ObjectId.".into()))?;

        let items = input
            .items
            .into_iter()
            .map(|item| match (item.price, item.quantity) {
                (Some(price), Some(quantity)) => Ok(OrderItem {
                    name: item.name,
                    price,
                    quantity,
                }),
                _ => Err(OrderError::InvalidInput(
                    "Every item needs a price and a quantity.".into(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            customer,
            items,
            is_cancel: input.is_cancel,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f9")]
    pub id: String,
    /// Customer (user) ObjectId
    pub customer: String,
    pub items: Vec<OrderItem>,
    #[schema(example = 25.0)]
    pub total: f64,
    pub is_cancel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_hex(),
            customer: order.customer.to_hex(),
            items: order.items,
            total: order.total,
            is_cancel: order.is_cancel,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

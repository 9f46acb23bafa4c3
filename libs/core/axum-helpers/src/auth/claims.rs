use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use utoipa::ToSchema;

/// Closed set of roles a user can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, VariantNames,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl Role {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] = <Self as VariantNames>::VARIANTS;
}

/// Payload of an identity token.
///
/// Trusted as-is for the token's lifetime once its signature verifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// User id (hex ObjectId)
    pub sub: String,
    /// Display name, the user's email
    pub name: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
}

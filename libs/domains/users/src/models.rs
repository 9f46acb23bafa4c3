use axum_helpers::{Field, JsonShape, Kind, Role};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{1,3}\s[0-9]{4,14}$").expect("valid phone regex"));

/// Country code, one space, then the subscriber number: `+51 987654321`.
fn phone_number(value: &str) -> Result<(), ValidationError> {
    if PHONE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("The phone number is invalid.")))
    }
}

/// Requires a digit, a lower case letter, an upper case letter and a
/// non-alphanumeric character. Reports the first one missing.
fn strong_password(value: &str) -> Result<(), ValidationError> {
    let checks: [(fn(char) -> bool, &'static str); 4] = [
        (|c| c.is_ascii_digit(), "The password must have at least one digit."),
        (|c| c.is_lowercase(), "The password must have at least one lower case character."),
        (|c| c.is_uppercase(), "The password must have at least one upper case character."),
        (|c| !c.is_alphanumeric(), "The password must have at least one special character."),
    ];

    match checks.iter().find(|(check, _)| !value.chars().any(*check)) {
        None => Ok(()),
        Some((_, message)) => {
            Err(ValidationError::new("password").with_message(Cow::Borrowed(*message)))
        }
    }
}

/// Optional personal details attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[schema(example = "Jane")]
    #[validate(length(min = 4, max = 16, message = "The firstName must have between 4 and 16 characters."))]
    pub first_name: String,
    #[schema(example = "Doeson")]
    #[validate(length(min = 4, max = 16, message = "The lastName must have between 4 and 16 characters."))]
    pub last_name: String,
    #[schema(example = "+51 987654321")]
    #[validate(custom(function = "phone_number"))]
    pub phone: String,
}

const PROFILE: &[Field] = &[
    Field::required("firstName", Kind::String).named("first_name"),
    Field::required("lastName", Kind::String).named("last_name"),
    Field::required("phone", Kind::String),
];

/// Credential record as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(changes: UserChanges) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            email: changes.email,
            password_hash: changes.password_hash,
            role: changes.role,
            profile: changes.profile,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Everything a write sets on a user, password already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile: Option<Profile>,
}

/// Body of `POST /users/add` and `PUT /users/update/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[schema(example = "jane@store.io")]
    #[validate(email(message = "The email is not valid."))]
    pub email: String,
    #[schema(example = "S3cret!pass")]
    #[validate(
        length(min = 8, message = "The password must have at least 8 characters."),
        custom(function = "strong_password")
    )]
    pub password: String,
    pub role: Role,
    #[validate(nested)]
    pub profile: Option<Profile>,
}

impl JsonShape for UserInput {
    const FIELDS: &'static [Field] = &[
        Field::required("email", Kind::String),
        Field::required("password", Kind::String),
        Field::required("role", Kind::OneOf(Role::NAMES)),
        Field::optional("profile", Kind::Object(PROFILE)),
    ];
}

/// Body of `POST /auth/register`. The role is always CUSTOMER.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterInput {
    #[schema(example = "jane@store.io")]
    #[validate(email(message = "The email is not valid."))]
    pub email: String,
    #[schema(example = "S3cret!pass")]
    #[validate(
        length(min = 8, message = "The password must have at least 8 characters."),
        custom(function = "strong_password")
    )]
    pub password: String,
    #[validate(nested)]
    pub profile: Option<Profile>,
}

impl JsonShape for RegisterInput {
    const FIELDS: &'static [Field] = &[
        Field::required("email", Kind::String),
        Field::required("password", Kind::String),
        Field::optional("profile", Kind::Object(PROFILE)),
    ];
}

impl From<RegisterInput> for UserInput {
    fn from(input: RegisterInput) -> Self {
        Self {
            email: input.email,
            password: input.password,
            role: Role::Customer,
            profile: input.profile,
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginInput {
    #[schema(example = "jane@store.io")]
    #[validate(email(message = "The email is not valid."))]
    pub email: String,
    #[validate(length(min = 1, message = "The password is required."))]
    pub password: String,
}

impl JsonShape for LoginInput {
    const FIELDS: &'static [Field] = &[
        Field::required("email", Kind::String),
        Field::required("password", Kind::String),
    ];
}

/// A user as returned to clients; the password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            role: user.role,
            profile: user.profile,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Returned by register and login: the identity plus its bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub token: String,
}

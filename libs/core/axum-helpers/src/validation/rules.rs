//! Field rules shared by the store schemas, usable with
//! `#[validate(custom(function = ...))]`.

use mongodb::bson::oid::ObjectId;
use std::borrow::Cow;
use validator::ValidationError;

pub const INVALID_OBJECT_ID: &str = "The id is not a valid ObjectId.";

/// Accepts 24-character hex ObjectIds.
pub fn object_id(value: &str) -> Result<(), ValidationError> {
    ObjectId::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("object_id").with_message(Cow::Borrowed(INVALID_OBJECT_ID)))
}

/// Letters (any script), spaces and `&`, with at least one letter.
pub fn letters_only(value: &str) -> Result<(), ValidationError> {
    let allowed = value
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '&');
    let has_letter = value.chars().any(char::is_alphabetic);

    if allowed && has_letter {
        Ok(())
    } else {
        Err(ValidationError::new("letters_only")
            .with_message(Cow::Borrowed("The name must contain only letters.")))
    }
}

/// At least one letter somewhere in the value.
pub fn contains_letter(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_alphabetic) {
        Ok(())
    } else {
        Err(ValidationError::new("contains_letter")
            .with_message(Cow::Borrowed("The name must contain letters.")))
    }
}

//! Structural contract of a JSON body.
//!
//! `serde` stops at the first missing or mistyped field. A [`JsonShape`]
//! lets the schema validator walk the raw JSON first, report every
//! presence and type violation by field path, and patch the value so the
//! typed body still deserializes and its `validator` rules can run too.
//!
//! ```ignore
//! impl JsonShape for OrderInput {
//!     const FIELDS: &'static [Field] = &[
//!         Field::required("customer", Kind::String),
//!         Field::required("items", Kind::List(&[
//!             Field::required("name", Kind::String),
//!             Field::required("price", Kind::Number),
//!         ])),
//!         Field::optional("isCancel", Kind::Boolean).named("is_cancel"),
//!     ];
//! }
//! ```

use serde_json::{Map, Value};

use super::FieldError;

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    String,
    Number,
    Boolean,
    /// A string out of a closed set, e.g. a role
    OneOf(&'static [&'static str]),
    Object(&'static [Field]),
    /// An array of objects
    List(&'static [Field]),
}

/// One field of a body.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Key on the wire
    pub key: &'static str,
    /// Name used in reported paths, matching the `validator` paths
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
}

impl Field {
    pub const fn required(key: &'static str, kind: Kind) -> Self {
        Self {
            key,
            name: key,
            kind,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, kind: Kind) -> Self {
        Self {
            key,
            name: key,
            kind,
            required: false,
        }
    }

    /// Reports the field under `name` when it differs from the wire key.
    pub const fn named(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

/// Body types that declare their fields for [`conform`].
pub trait JsonShape {
    const FIELDS: &'static [Field];
}

/// Checks `object` against `fields` and returns every violation.
///
/// A missing or mistyped required field is replaced by a placeholder of
/// the right type and a mistyped optional one is removed, so `object`
/// deserializes afterwards. Rule violations on patched fields are
/// meaningless and callers drop them with `ValidationReport::covers`.
pub fn conform(object: &mut Map<String, Value>, fields: &[Field]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    conform_object(object, fields, "", &mut errors);
    errors
}

fn conform_object(
    object: &mut Map<String, Value>,
    fields: &[Field],
    prefix: &str,
    errors: &mut Vec<FieldError>,
) {
    for field in fields {
        let path = join(prefix, field.name);

        let present = object.get(field.key).is_some_and(|value| !value.is_null());
        if !present {
            if field.required {
                errors.push(FieldError::new(&path, format!("The {} is required.", field.name)));
                object.insert(field.key.to_string(), placeholder(field.kind));
            }
            continue;
        }

        let mismatch = object
            .get_mut(field.key)
            .and_then(|value| check(value, field, &path, errors));

        if let Some(message) = mismatch {
            errors.push(FieldError::new(&path, message));
            if field.required {
                object.insert(field.key.to_string(), placeholder(field.kind));
            } else {
                object.remove(field.key);
            }
        }
    }
}

/// Returns the message for a value of the wrong type. Nested values are
/// checked in place.
fn check(value: &mut Value, field: &Field, path: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let name = field.name;
    match (field.kind, value) {
        (Kind::String, Value::String(_)) => None,
        (Kind::String, _) => Some(format!("The {name} must be a string.")),
        (Kind::Number, Value::Number(_)) => None,
        (Kind::Number, _) => Some(format!("The {name} must be a number.")),
        (Kind::Boolean, Value::Bool(_)) => None,
        (Kind::Boolean, _) => Some(format!("The {name} must be a boolean.")),
        (Kind::OneOf(choices), Value::String(s)) if choices.contains(&s.as_str()) => None,
        (Kind::OneOf(_), _) => Some(format!("The {name} is not valid.")),
        (Kind::Object(fields), Value::Object(inner)) => {
            conform_object(inner, fields, path, errors);
            None
        }
        (Kind::Object(_), _) => Some(format!("The {name} must be an object.")),
        (Kind::List(fields), Value::Array(items)) => {
            for (index, item) in items.iter_mut().enumerate() {
                let item_path = format!("{path}[{index}]");
                match item {
                    Value::Object(inner) => conform_object(inner, fields, &item_path, errors),
                    other => {
                        errors.push(FieldError::new(&item_path, format!("The {name} entries must be objects.")));
                        *other = placeholder(Kind::Object(fields));
                    }
                }
            }
            None
        }
        (Kind::List(_), _) => Some(format!("The {name} must be a list.")),
    }
}

fn placeholder(kind: Kind) -> Value {
    match kind {
        Kind::String => Value::String(String::new()),
        Kind::Number => Value::from(0),
        Kind::Boolean => Value::Bool(false),
        Kind::OneOf(choices) => Value::String(choices.first().copied().unwrap_or_default().to_string()),
        Kind::Object(fields) => {
            let mut object = Map::new();
            for field in fields.iter().filter(|f| f.required) {
                object.insert(field.key.to_string(), placeholder(field.kind));
            }
            Value::Object(object)
        }
        Kind::List(_) => Value::Array(Vec::new()),
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

//! Declarative request validation.
//!
//! A [`RequestSchema`] describes what a route accepts (path identifiers, a
//! JSON body with a declared [`JsonShape`] or a multipart form with
//! files). The [`validate_request`]
//! middleware checks an incoming request against it, collecting every
//! violation into a [`ValidationReport`] before the handler runs.

pub mod multipart;
pub mod rules;
pub mod schema;
pub mod shape;

pub use multipart::{FileRule, FormSchema, MultipartForm, UploadedFile};
pub use schema::{RequestSchema, inspect_json, validate_request};
pub use shape::{Field, JsonShape, Kind};

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Dotted path of the offending input, e.g. `items[1].price`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found for a request, ordered by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<FieldError>) -> Self {
        let mut report = Self::default();
        report.extend(errors);
        report
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: FieldError) {
        self.extend([error]);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.errors.extend(errors);
        self.errors.sort_by(|a, b| a.field.cmp(&b.field));
    }

    /// Whether any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Whether `field` is, or sits under, a path already reported.
    pub fn covers(&self, field: &str) -> bool {
        self.errors.iter().any(|e| {
            field
                .strip_prefix(e.field.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(['.', '[']))
        })
    }

    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        write!(f, "{} violation(s) on [{}]", self.errors.len(), fields.join(", "))
    }
}

impl From<&ValidationErrors> for ValidationReport {
    fn from(errors: &ValidationErrors) -> Self {
        let mut collected = Vec::new();
        flatten("", errors, &mut collected);
        Self::new(collected)
    }
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {field} is invalid."));
                    FieldError::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => flatten(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Line {
        #[validate(range(min = 0.0, message = "The price must not be negative."))]
        price: f64,
    }

    #[derive(Validate)]
    struct Basket {
        #[validate(length(min = 4, message = "The name must have at least 4 characters."))]
        name: String,
        #[validate(length(min = 1))]
        code: String,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    #[test]
    fn test_report_flattens_nested_and_list_errors() {
        let basket = Basket {
            name: "ab".into(),
            code: String::new(),
            lines: vec![Line { price: 1.0 }, Line { price: -1.0 }],
        };

        let report = ValidationReport::from(&basket.validate().unwrap_err());

        assert_eq!(report.len(), 3);
        assert!(report.has_field("name"));
        assert!(report.has_field("lines[1].price"));
        assert_eq!(
            report.errors().iter().find(|e| e.field == "code").unwrap().message,
            "The code is invalid."
        );
    }

    #[test]
    fn test_report_is_sorted_by_field() {
        let report = ValidationReport::new(vec![
            FieldError::new("price", "a"),
            FieldError::new("brand", "b"),
        ]);
        assert_eq!(report.errors()[0].field, "brand");
        assert_eq!(report.to_string(), "2 violation(s) on [brand, price]");
    }

    #[test]
    fn test_covers_reported_paths_and_their_children() {
        let report = ValidationReport::new(vec![
            FieldError::new("items[1]", "a"),
            FieldError::new("profile", "b"),
        ]);

        assert!(report.covers("profile"));
        assert!(report.covers("profile.phone"));
        assert!(report.covers("items[1].price"));
        assert!(!report.covers("items[10].price"));
        assert!(!report.covers("profiles"));
    }

    #[test]
    fn test_empty_report_is_ok() {
        assert!(ValidationReport::default().into_result().is_ok());
    }
}

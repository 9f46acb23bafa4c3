//! Multipart forms: text fields plus uploaded files.

use super::{FieldError, ValidationReport};
use crate::errors::AppError;
use axum::body::Bytes;
use axum::extract::Multipart;
use std::collections::HashMap;

/// A file part received in a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file was sent under
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A fully buffered multipart body.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Drains `multipart`, keeping text parts as fields and parts with a
    /// file name as files. A repeated text field keeps its last value.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(part) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = part.name().unwrap_or_default().to_string();

            match part.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = part
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = part
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    form.files.push(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        data,
                    });
                }
                None => {
                    let text = part
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Files sent under `field`, in arrival order.
    pub fn files<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a UploadedFile> + 'a {
        self.files.iter().filter(move |f| f.field == field)
    }

    pub fn into_files(self, field: &str) -> Vec<UploadedFile> {
        self.files.into_iter().filter(|f| f.field == field).collect()
    }

    #[cfg(test)]
    pub(crate) fn from_parts(fields: &[(&str, &str)], files: Vec<UploadedFile>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files,
        }
    }
}

/// Accepted types and size ceiling for one file field.
#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    pub field: &'static str,
    pub accepted_types: &'static [&'static str],
    pub max_bytes: usize,
}

impl FileRule {
    /// Checks every file under the rule's field; each file can produce
    /// one error for its type and one for its size.
    pub fn check(&self, form: &MultipartForm) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for file in form.files(self.field) {
            if !self.accepted_types.contains(&file.content_type.as_str()) {
                errors.push(FieldError::new(
                    self.field,
                    format!(
                        "The file {} only accept {}.",
                        file.file_name,
                        self.accepted_types.join(", ")
                    ),
                ));
            }
            if file.size() > self.max_bytes {
                errors.push(FieldError::new(
                    self.field,
                    format!(
                        "The file {} size is more than {}MB.",
                        file.file_name,
                        self.max_bytes / 1_000_000
                    ),
                ));
            }
        }

        errors
    }
}

/// A typed view over a multipart form, built only if the form is valid.
pub trait FormSchema: Sized {
    fn from_form(form: &MultipartForm) -> Result<Self, ValidationReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGES: FileRule = FileRule {
        field: "images",
        accepted_types: &["image/jpeg", "image/jpg", "image/png"],
        max_bytes: 5_000_000,
    };

    fn file(name: &str, content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            field: "images".into(),
            file_name: name.into(),
            content_type: content_type.into(),
            data: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_file_rule_accepts_allowed_images() {
        let form = MultipartForm::from_parts(
            &[],
            vec![file("a.png", "image/png", 10), file("b.jpg", "image/jpeg", 10)],
        );
        assert!(IMAGES.check(&form).is_empty());
    }

    #[test]
    fn test_file_rule_reports_type_and_size_per_file() {
        let form = MultipartForm::from_parts(
            &[],
            vec![
                file("doc.pdf", "application/pdf", 10),
                file("huge.png", "image/png", 5_000_001),
            ],
        );

        let errors = IMAGES.check(&form);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].message,
            "The file doc.pdf only accept image/jpeg, image/jpg, image/png."
        );
        assert_eq!(errors[1].message, "The file huge.png size is more than 5MB.");
    }

    #[test]
    fn test_into_files_filters_by_field() {
        let mut other = file("x.png", "image/png", 1);
        other.field = "avatar".into();
        let form = MultipartForm::from_parts(&[("name", "Laptop")], vec![other, file("a.png", "image/png", 1)]);

        assert_eq!(form.field("name"), Some("Laptop"));
        let images = form.into_files("images");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file_name, "a.png");
    }
}

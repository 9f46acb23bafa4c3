//! Cloudinary implementation of [`ImageStore`].
//!
//! Requests are signed: the signed parameters are sorted by name, joined as
//! `k=v&k=v`, suffixed with the API secret and hashed with SHA-256.

use crate::config::CloudinaryConfig;
use crate::error::{ImageStoreError, ImageStoreResult};
use crate::models::{ImageUpload, StoredImage};
use crate::ImageStore;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

pub struct CloudinaryImageStore {
    config: CloudinaryConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> ImageStoreResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("store-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(cloud_name = %config.cloud_name, folder = %config.folder, "Cloudinary image store initialized");
        Ok(Self { config, client })
    }

    fn signed_form(&self, mut params: Vec<(&'static str, String)>) -> Form {
        params.push(("timestamp", Utc::now().timestamp().to_string()));
        let signature = sign(&params, &self.config.api_secret);

        params
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
    }

    async fn send<T: for<'de> Deserialize<'de>>(&self, action: &str, form: Form) -> ImageStoreResult<T> {
        let response = self
            .client
            .post(self.config.endpoint(action))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(ImageStoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ImageStoreError::InvalidResponse(e.to_string()))
    }
}

/// Hex SHA-256 over the sorted `k=v` pairs followed by the secret.
pub(crate) fn sign(params: &[(&str, String)], secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    const_hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    #[instrument(skip(self, image), fields(file_name = %image.file_name, bytes = image.data.len()))]
    async fn upload(&self, image: ImageUpload) -> ImageStoreResult<StoredImage> {
        let part = Part::bytes(image.data.to_vec())
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;

        let form = self
            .signed_form(vec![("folder", self.config.folder.clone())])
            .part("file", part);

        let uploaded: UploadResponse = self.send("upload", form).await?;
        debug!(public_id = %uploaded.public_id, "Image uploaded");

        Ok(StoredImage {
            public_id: uploaded.public_id,
            secure_url: uploaded.secure_url,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, public_id: &str) -> ImageStoreResult<()> {
        let form = self.signed_form(vec![("public_id", public_id.to_string())]);
        let destroyed: DestroyResponse = self.send("destroy", form).await?;

        match destroyed.result.as_str() {
            "ok" => {
                debug!("Image deleted");
                Ok(())
            }
            // Already gone; deleting is idempotent
            "not found" => {
                warn!("Image was already absent from the store");
                Ok(())
            }
            other => Err(ImageStoreError::InvalidResponse(format!(
                "unexpected destroy result '{other}'"
            ))),
        }
    }
}

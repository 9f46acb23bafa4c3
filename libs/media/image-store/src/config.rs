use core_config::{ConfigError, FromEnv, env_or_default, env_required};

const DEFAULT_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary account settings.
///
/// | Variable | Default |
/// |---|---|
/// | `CLOUDINARY_NAME` | required |
/// | `CLOUDINARY_API_KEY` | required |
/// | `CLOUDINARY_API_SECRET` | required |
/// | `CLOUDINARY_FOLDER` | `store` |
/// | `CLOUDINARY_API_URL` | `https://api.cloudinary.com/v1_1` |
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder uploads are placed in
    pub folder: String,
    pub api_url: String,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: "store".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// `{api_url}/{cloud_name}/image/{action}`
    pub(crate) fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.api_url.trim_end_matches('/'),
            self.cloud_name,
            action
        )
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("folder", &self.folder)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl FromEnv for CloudinaryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_required("CLOUDINARY_NAME")?,
            env_required("CLOUDINARY_API_KEY")?,
            env_required("CLOUDINARY_API_SECRET")?,
        )
        .with_folder(env_or_default("CLOUDINARY_FOLDER", "store"))
        .with_api_url(env_or_default("CLOUDINARY_API_URL", DEFAULT_API_URL)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("123456")),
                ("CLOUDINARY_API_SECRET", Some("shh")),
                ("CLOUDINARY_FOLDER", None),
                ("CLOUDINARY_API_URL", None),
            ],
            || {
                let config = CloudinaryConfig::from_env().unwrap();
                assert_eq!(config.cloud_name, "demo");
                assert_eq!(config.folder, "store");
                assert_eq!(
                    config.endpoint("upload"),
                    "https://api.cloudinary.com/v1_1/demo/image/upload"
                );
            },
        );
    }

    #[test]
    fn test_from_env_missing_secret() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("123456")),
                ("CLOUDINARY_API_SECRET", None),
            ],
            || {
                let err = CloudinaryConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("CLOUDINARY_API_SECRET"));
            },
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = CloudinaryConfig::new("demo", "key", "top-secret");
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}

use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use image_store::CloudinaryConfig;

pub use core_config::Environment;

/// Everything the store API reads from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cloudinary: CloudinaryConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let cloudinary = CloudinaryConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            jwt,
            cloudinary,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 6] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("MONGODB_DATABASE", Some("store")),
        ("JWT_SECRET", Some("this-is-a-valid-secret-with-32-chars!")),
        ("CLOUDINARY_NAME", Some("demo")),
        ("CLOUDINARY_API_KEY", Some("key")),
        ("CLOUDINARY_API_SECRET", Some("secret")),
    ];

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(REQUIRED, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "store_api");
            assert_eq!(config.mongodb.database, "store");
            assert_eq!(config.mongodb.app_name.as_deref(), Some("store_api"));
        });
    }

    #[test]
    fn test_config_requires_jwt_secret() {
        let mut vars = REQUIRED.to_vec();
        vars[2] = ("JWT_SECRET", None);

        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }
}

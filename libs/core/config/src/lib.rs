pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Runtime environment selected by `APP_ENV`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static name and version reported by the liveness endpoint.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's package metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Reads the first variable that is set among `keys`.
///
/// Used for settings that historically shipped under more than one name
/// (`MONGODB_URL` / `MONGO_URL`).
pub fn env_first_of(keys: &[&str]) -> Result<String, ConfigError> {
    keys.iter()
        .find_map(|key| env::var(key).ok())
        .ok_or_else(|| ConfigError::MissingEnvVar(keys.join(" or ")))
}

/// Parses `key` into `T`, falling back to `default` when the variable is unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("STORE_TEST_VAR", Some("value"), || {
            assert_eq!(env_or_default("STORE_TEST_VAR", "default"), "value");
        });
        temp_env::with_var_unset("STORE_TEST_VAR", || {
            assert_eq!(env_or_default("STORE_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("STORE_MISSING_REQUIRED", || {
            let err = env_required("STORE_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("STORE_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_first_of_prefers_first_key() {
        temp_env::with_vars(
            [("STORE_PRIMARY", Some("a")), ("STORE_ALIAS", Some("b"))],
            || {
                assert_eq!(env_first_of(&["STORE_PRIMARY", "STORE_ALIAS"]).unwrap(), "a");
            },
        );
    }

    #[test]
    fn test_env_first_of_falls_back_to_alias() {
        temp_env::with_vars(
            [("STORE_PRIMARY", None), ("STORE_ALIAS", Some("b"))],
            || {
                assert_eq!(env_first_of(&["STORE_PRIMARY", "STORE_ALIAS"]).unwrap(), "b");
            },
        );
    }

    #[test]
    fn test_env_first_of_reports_all_keys() {
        temp_env::with_vars_unset(["STORE_PRIMARY", "STORE_ALIAS"], || {
            let err = env_first_of(&["STORE_PRIMARY", "STORE_ALIAS"]).unwrap_err();
            assert!(err.to_string().contains("STORE_PRIMARY or STORE_ALIAS"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("STORE_POOL", Some("25"), || {
            assert_eq!(env_parse_or::<u32>("STORE_POOL", 10).unwrap(), 25);
        });
        temp_env::with_var_unset("STORE_POOL", || {
            assert_eq!(env_parse_or::<u32>("STORE_POOL", 10).unwrap(), 10);
        });
        temp_env::with_var("STORE_POOL", Some("many"), || {
            let err = env_parse_or::<u32>("STORE_POOL", 10).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { .. }));
        });
    }

    #[test]
    fn test_app_info_macro_uses_package_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}

//! MongoDB connector, health probe and index helpers

mod config;
mod connector;
mod health;
mod indexes;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use health::check_health;
pub use indexes::{DUPLICATE_KEY_CODE, ensure_unique_index, is_duplicate_key};

pub use mongodb::{Client, Collection, Database};

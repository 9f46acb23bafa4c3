use mongodb::{
    Collection, IndexModel,
    bson::Document,
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::info;

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Create (or confirm) a unique ascending index on `field`.
///
/// Index creation is idempotent, so this runs on every startup.
pub async fn ensure_unique_index<T>(collection: &Collection<T>, field: &str) -> Result<(), Error>
where
    T: Send + Sync,
{
    let name = format!("idx_{}_{}_unique", collection.name(), field);
    let mut keys = Document::new();
    keys.insert(field, 1);
    let index = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).name(name.clone()).build())
        .build();

    collection.create_index(index).await?;
    info!(collection = collection.name(), index = %name, "Unique index ready");
    Ok(())
}

/// Whether `error` was raised by a unique index rejecting a write.
pub fn is_duplicate_key(error: &Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command) => command.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let db = mongo.database(&builder.database());
//!     let name = builder.letters(8);
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

use mongodb::bson::oid::ObjectId;

/// Builder for test data with deterministic randomization
///
/// Tests stay reproducible because everything derives from one seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed derived from the test name; the recommended constructor.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_brand");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A deterministic ObjectId.
    pub fn object_id(&self) -> ObjectId {
        let bytes = self.seed.to_le_bytes();
        let mut id = [0u8; 12];
        id[..8].copy_from_slice(&bytes);
        id[8..].copy_from_slice(&bytes[..4]);
        ObjectId::from_bytes(id)
    }

    /// Database name unique to this seed.
    pub fn database(&self) -> String {
        format!("test_{}", self.seed)
    }

    /// `len` letters derived from the seed, capitalized.
    ///
    /// Suitable where a rule accepts letters only, e.g. brand names.
    pub fn letters(&self, len: usize) -> String {
        let mut state = self.seed;
        (0..len)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let c = (b'a' + ((state >> 33) % 26) as u8) as char;
                if i == 0 { c.to_ascii_uppercase() } else { c }
            })
            .collect()
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.object_id(), builder2.object_id());
        assert_eq!(builder1.letters(8), builder2.letters(8));
        assert_eq!(builder1.name("brand", "a"), builder2.name("brand", "a"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.object_id(), builder2.object_id());
    }

    #[test]
    fn test_letters_are_alphabetic() {
        let name = TestDataBuilder::from_test_name("letters").letters(12);
        assert_eq!(name.len(), 12);
        assert!(name.chars().all(|c| c.is_ascii_alphabetic()));
        assert!(name.chars().next().unwrap().is_ascii_uppercase());
    }
}

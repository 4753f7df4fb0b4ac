//! Shared test utilities for domain testing
//!
//! - [`TestMongo`]: MongoDB container with a connected client, cleaned up on
//!   drop
//! - [`TestDataBuilder`]: deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! # async fn example() {
//! let mongo = TestMongo::new().await;
//! let db = mongo.database();
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let name = builder.name("device", "main");
//! # }
//! ```

mod mongo;

pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization.
///
/// Seeding from the test name keeps generated values stable across runs
/// while still unique per test.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from a test name (seed derived from its hash).
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A name unique to this test, e.g. `test-device-12345-main`.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_is_deterministic_per_test_name() {
        let a = TestDataBuilder::from_test_name("some_test");
        let b = TestDataBuilder::from_test_name("some_test");
        assert_eq!(a.name("device", "main"), b.name("device", "main"));
    }

    #[test]
    fn builder_differs_across_test_names() {
        let a = TestDataBuilder::from_test_name("test_one");
        let b = TestDataBuilder::from_test_name("test_two");
        assert_ne!(a.name("device", "main"), b.name("device", "main"));
    }
}

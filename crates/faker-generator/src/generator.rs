//! Main generator bundling the random source with per-invocation context.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::generators::{product, profile, purchase};
use crate::{Product, Purchase, User};

/// The explicit random-source handle threaded through every generator.
pub type RandomSource = StdRng;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Embedded fixture could not be parsed
    #[error("Invalid fixture: {0}")]
    Fixture(serde_json::Error),

    /// Entity could not be serialized into record data
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity serialized into something other than a JSON object
    #[error("Record data must be a JSON object, got: {0}")]
    NotAnObject(String),
}

/// Create the random source for a read starting at user index `start_index`.
///
/// With a seed, the RNG is seeded from the seed combined with the start index,
/// so the same seed and cursor always reproduce the same output. Without a
/// seed the RNG is seeded from the operating system.
pub fn seeded_rng(seed: Option<u64>, start_index: u64) -> RandomSource {
    match seed {
        Some(seed) => StdRng::seed_from_u64(compute_rng_seed_for_index(seed, start_index)),
        None => StdRng::from_os_rng(),
    }
}

/// Create the random source for purchases, independent of the user stream.
///
/// Users drawn from [`seeded_rng`] are identical whether or not purchases are
/// generated alongside them.
fn purchases_rng(seed: Option<u64>, start_index: u64) -> RandomSource {
    seeded_rng(seed.map(|seed| seed ^ PURCHASES_SEED_SALT), start_index)
}

const PURCHASES_SEED_SALT: u64 = 0xD1B54A32D192ED03;

/// Combine the base seed with a start index.
fn compute_rng_seed_for_index(seed: u64, index: u64) -> u64 {
    seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
}

/// Generator producing users and their purchases for one read invocation.
///
/// The generator owns separate random sources for users and purchases, the
/// current user index, the number of products purchases may reference, and
/// the `now` instant that bounds purchase timestamps. `now` is captured once
/// so every purchase of the invocation shares the same upper bound.
pub struct FakerGenerator {
    /// Random source for user profiles
    user_rng: RandomSource,
    /// Random source for purchases
    purchase_rng: RandomSource,
    /// Index of the next user to generate
    index: u64,
    /// Number of products in the fixed catalog
    product_count: u64,
    /// Upper bound for purchase timestamps
    now: DateTime<Utc>,
}

impl FakerGenerator {
    /// Create a generator starting at user index `start_index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product fixture cannot be loaded.
    pub fn new(seed: Option<u64>, start_index: u64) -> Result<Self, GeneratorError> {
        let product_count = product::generate_products()?.len() as u64;
        Ok(Self {
            user_rng: seeded_rng(seed, start_index),
            purchase_rng: purchases_rng(seed, start_index),
            index: start_index,
            product_count,
            now: Utc::now(),
        })
    }

    /// Fix the instant used as the upper bound for purchase timestamps.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Get the index of the next user.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Number of products purchases may reference.
    pub fn product_count(&self) -> u64 {
        self.product_count
    }

    /// Generate the next user and advance the index.
    pub fn next_user(&mut self) -> User {
        let user = profile::generate_user(&mut self.user_rng, self.index);
        self.index += 1;
        user
    }

    /// Generate the purchases of `user`, numbering them after `purchases_count`.
    pub fn purchases_for(&mut self, user: &User, purchases_count: u64) -> Vec<Purchase> {
        purchase::generate_purchases(
            &mut self.purchase_rng,
            user,
            purchases_count,
            self.product_count,
            self.now,
        )
    }

    /// Load the product catalog.
    pub fn products(&self) -> Result<Vec<Product>, GeneratorError> {
        product::generate_products()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_users_sequentially() {
        let mut generator = FakerGenerator::new(Some(42), 0).unwrap();

        for expected_id in 1..=5 {
            let user = generator.next_user();
            assert_eq!(user.id, expected_id);
        }
        assert_eq!(generator.current_index(), 5);
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = FakerGenerator::new(Some(42), 0).unwrap().with_now(fixed_now());
        let mut gen2 = FakerGenerator::new(Some(42), 0).unwrap().with_now(fixed_now());

        for _ in 0..10 {
            let user1 = gen1.next_user();
            let user2 = gen2.next_user();
            assert_eq!(user1, user2);
            assert_eq!(gen1.purchases_for(&user1, 0), gen2.purchases_for(&user2, 0));
        }
    }

    #[test]
    fn test_users_independent_of_purchases() {
        let mut users_only = FakerGenerator::new(Some(42), 0).unwrap();
        let mut with_purchases = FakerGenerator::new(Some(42), 0).unwrap();

        for _ in 0..10 {
            let user = with_purchases.next_user();
            with_purchases.purchases_for(&user, 0);
            assert_eq!(users_only.next_user(), user);
        }
    }

    #[test]
    fn test_with_start_index() {
        let mut generator = FakerGenerator::new(Some(42), 5).unwrap();

        assert_eq!(generator.current_index(), 5);
        assert_eq!(generator.next_user().id, 6);
    }

    #[test]
    fn test_start_index_changes_stream() {
        let mut from_zero = FakerGenerator::new(Some(42), 0).unwrap();
        let mut from_five = FakerGenerator::new(Some(42), 5).unwrap();

        assert_ne!(from_zero.next_user().name_and_ssn(), from_five.next_user().name_and_ssn());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut gen1 = FakerGenerator::new(Some(1), 0).unwrap();
        let mut gen2 = FakerGenerator::new(Some(2), 0).unwrap();

        assert_ne!(gen1.next_user().name_and_ssn(), gen2.next_user().name_and_ssn());
    }

    #[test]
    fn test_product_count_matches_fixture() {
        let generator = FakerGenerator::new(None, 0).unwrap();

        assert_eq!(
            generator.product_count(),
            generator.products().unwrap().len() as u64
        );
    }

    impl User {
        fn name_and_ssn(&self) -> (String, String) {
            (self.name.clone(), self.ssn.clone())
        }
    }
}

//! Synthetic record generators for the source-faker connector.
//!
//! This crate provides the `FakerGenerator` which produces users, their
//! purchases and the static product catalog. Randomness comes from an explicit
//! seeded RNG passed into every generator, so the same seed and starting
//! cursor reproduce the same users across runs.
//!
//! # Architecture
//!
//! ```text
//!   seed + cursor
//!        │
//!        ▼
//! ┌─────────────────────┐
//! │   FakerGenerator    │
//! │                     │
//! │  - rng (StdRng)     │
//! │  - index            │
//! │  - product_count    │
//! │  - now              │
//! └─────────┬───────────┘
//!           │
//!     ┌─────┴──────┐
//!     ▼            ▼
//!   User ──► Vec<Purchase>
//! ```
//!
//! # Example
//!
//! ```rust
//! use faker_generator::FakerGenerator;
//!
//! let mut generator = FakerGenerator::new(Some(42), 0).unwrap();
//! let user = generator.next_user();
//! assert_eq!(user.id, 1);
//! assert!(user.updated_at >= user.created_at);
//!
//! let purchases = generator.purchases_for(&user, 0);
//! for (offset, purchase) in purchases.iter().enumerate() {
//!     assert_eq!(purchase.id, offset as u64 + 1);
//!     assert_eq!(purchase.user_id, user.id);
//! }
//! ```
//!
//! # Generators
//!
//! - `profile` - User profiles from embedded word lists
//! - `purchase` - Purchases correlated with a user
//! - `product` - The fixed product fixture
//! - `timestamp` - Timestamp sampling, including `random_date_in_range`

pub mod entities;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use entities::{Product, Purchase, RecordData, User};
pub use generator::{seeded_rng, FakerGenerator, GeneratorError, RandomSource};
pub use generators::product::generate_products;
pub use generators::profile::generate_user;
pub use generators::purchase::generate_purchases;
pub use generators::timestamp::random_date_in_range;

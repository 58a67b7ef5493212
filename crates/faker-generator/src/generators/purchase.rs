//! Purchase generator.
//!
//! Each user gets a geometric-like number of purchases: a budget starts at
//! [`INITIAL_PURCHASE_BUDGET`] percent and every draw subtracts a uniform
//! integer in `[1, 100]`; purchases are generated while the budget stays
//! positive. Roughly one user in five gets no purchases at all.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::timestamp::random_date_in_range;
use crate::{Purchase, User};

/// Starting budget, in percent.
pub const INITIAL_PURCHASE_BUDGET: i64 = 80;

/// Chance, in percent, that an item added to the cart is purchased.
pub const PURCHASE_PERCENT: u32 = 70;

/// Chance, in percent, that a purchased item is returned.
pub const RETURN_PERCENT: u32 = 15;

/// Generate the purchases of `user`.
///
/// Ids continue from `purchases_count`: the first purchase gets
/// `purchases_count + 1`. `product_id` is uniform in `[1, total_products)`.
/// All timestamps fall between the user's `created_at` and `now`.
pub fn generate_purchases<R: Rng>(
    rng: &mut R,
    user: &User,
    purchases_count: u64,
    total_products: u64,
    now: DateTime<Utc>,
) -> Vec<Purchase> {
    let mut purchases = Vec::new();
    let mut budget = INITIAL_PURCHASE_BUDGET - draw_percent(rng) as i64;

    while budget > 0 {
        let id = purchases_count + purchases.len() as u64 + 1;
        let product_id = if total_products > 1 {
            rng.random_range(1..total_products)
        } else {
            1
        };

        let added_to_cart_at = Some(random_date_in_range(rng, user.created_at, now));
        let purchased_at = match added_to_cart_at {
            Some(added) if draw_percent(rng) <= PURCHASE_PERCENT => {
                Some(random_date_in_range(rng, added, now))
            }
            _ => None,
        };
        let returned_at = match purchased_at {
            Some(purchased) if draw_percent(rng) <= RETURN_PERCENT => {
                Some(random_date_in_range(rng, purchased, now))
            }
            _ => None,
        };

        purchases.push(Purchase {
            id,
            product_id,
            user_id: user.id,
            added_to_cart_at,
            purchased_at,
            returned_at,
        });

        budget -= draw_percent(rng) as i64;
    }

    purchases
}

/// Uniform integer in `[1, 100]`.
fn draw_percent<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(1..=100)
}

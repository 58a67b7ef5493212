//! Timestamp generators.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Lower bound (inclusive) of sampled user timestamps: 1970-01-01T00:00:00Z.
pub const USER_TIMESTAMP_START: i64 = 0;

/// Upper bound (exclusive) of sampled user timestamps: 2022-01-01T00:00:00Z.
///
/// A fixed bound keeps user timestamps reproducible for a given seed.
pub const USER_TIMESTAMP_END: i64 = 1_640_995_200;

/// Generate a random whole-second timestamp in the user timestamp window.
pub fn generate_user_timestamp<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    let secs = rng.random_range(USER_TIMESTAMP_START..USER_TIMESTAMP_END);
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Sample a date between `start` and `end` with whole-day granularity.
///
/// Picks a uniform day offset in `[0, days_between(start, end))` and adds it
/// to `start`. When the span is shorter than one day, including `start == end`
/// and `start > end`, `start` is returned and the RNG is not advanced.
pub fn random_date_in_range<R: Rng>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let days_between = (end - start).num_days();
    if days_between <= 0 {
        return start;
    }

    let offset = rng.random_range(0..days_between);
    start + Duration::days(offset)
}

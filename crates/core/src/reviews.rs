//! Product rating statistics.

use serde::{Deserialize, Serialize};

/// Aggregate of a product's review ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    /// Mean rating rounded to one decimal, `0.0` without reviews.
    pub average: f64,
    /// Number of reviews.
    pub total: u32,
    /// Counts per star, 5 stars first: `[five, four, three, two, one]`.
    pub breakdown: [u32; 5],
}

impl RatingStats {
    /// Stats for a product without reviews.
    pub const EMPTY: Self = Self {
        average: 0.0,
        total: 0,
        breakdown: [0; 5],
    };

    /// Aggregate a sequence of ratings in a single pass.
    ///
    /// Ratings outside `1..=5` are left out of the histogram but still count
    /// towards `total` and `average`, so `breakdown` may sum to less than
    /// `total`.
    ///
    /// ```
    /// use orbit_core::RatingStats;
    ///
    /// let stats = RatingStats::from_ratings([5, 5, 4, 3, 1]);
    /// assert_eq!(stats.total, 5);
    /// assert!((stats.average - 3.6).abs() < f64::EPSILON);
    /// assert_eq!(stats.breakdown, [2, 1, 1, 0, 1]);
    /// ```
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut total: u32 = 0;
        let mut sum: i64 = 0;
        let mut breakdown = [0_u32; 5];

        for rating in ratings {
            total += 1;
            sum += i64::from(rating);

            // 5 stars lands in slot 0, 1 star in slot 4
            if let Some(slot) = usize::try_from(5 - i64::from(rating))
                .ok()
                .and_then(|index| breakdown.get_mut(index))
            {
                *slot += 1;
            }
        }

        if total == 0 {
            return Self::EMPTY;
        }

        #[allow(clippy::cast_precision_loss)] // review sums stay far below 2^52
        let average = sum as f64 / f64::from(total);

        Self {
            average: round_one_decimal(average),
            total,
            breakdown,
        }
    }
}

impl Default for RatingStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Halves round away from zero, so 4.25 gives 4.3 and -1.25 gives -1.3.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mixed_ratings() {
        let stats = RatingStats::from_ratings([5, 5, 4, 3, 1]);
        assert_eq!(stats.total, 5);
        assert!(approx(stats.average, 3.6));
        assert_eq!(stats.breakdown, [2, 1, 1, 0, 1]);
    }

    #[test]
    fn test_empty() {
        let stats = RatingStats::from_ratings(Vec::new());
        assert_eq!(stats, RatingStats::EMPTY);
        assert_eq!(stats.total, 0);
        assert!(approx(stats.average, 0.0));
        assert_eq!(stats.breakdown, [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        // 13 / 3 = 4.333...
        let stats = RatingStats::from_ratings([5, 4, 4]);
        assert!(approx(stats.average, 4.3));

        // 14 / 3 = 4.666...
        let stats = RatingStats::from_ratings([5, 5, 4]);
        assert!(approx(stats.average, 4.7));
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        // 17 / 4 = 4.25
        let stats = RatingStats::from_ratings([4, 4, 4, 5]);
        assert!(approx(stats.average, 4.3));

        // -5 / 4 = -1.25, only reachable with out-of-range ratings
        let stats = RatingStats::from_ratings([-1, -1, -1, -2]);
        assert!(approx(stats.average, -1.3));
    }

    #[test]
    fn test_single_rating() {
        let stats = RatingStats::from_ratings([2]);
        assert_eq!(stats.total, 1);
        assert!(approx(stats.average, 2.0));
        assert_eq!(stats.breakdown, [0, 0, 0, 1, 0]);
    }

    /// Out-of-range ratings are counted in `total` and `average` but not in
    /// `breakdown`. This mirrors the long-standing storefront behaviour and is
    /// pinned here until product decides whether to reject such ratings.
    #[test]
    fn test_out_of_range_ratings_skip_histogram_only() {
        let stats = RatingStats::from_ratings([5, 0, 6, -3]);
        assert_eq!(stats.total, 4);
        // (5 + 0 + 6 - 3) / 4 = 2.0
        assert!(approx(stats.average, 2.0));
        assert_eq!(stats.breakdown, [1, 0, 0, 0, 0]);

        let bucketed: u32 = stats.breakdown.iter().sum();
        assert!(bucketed < stats.total);
    }
}

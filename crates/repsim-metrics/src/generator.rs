//! The metrics generator.

use repsim_core::{BusinessMetrics, Sentiment, TrendPoint, TREND_MONTHS};

use crate::error::MetricsError;
use crate::headline::headline_for;
use crate::rng::UniformSource;
use crate::tiers::{RatingTier, SentimentBand};

/// Review counts never fall below this, regardless of tier scaling.
const MIN_REVIEWS: u32 = 20;

/// Generate a full metrics record for a business.
///
/// Draw order from `source` is fixed and load-bearing for scripted tests:
///
/// 1. tier roll
/// 2. rating fraction within the tier band
/// 3. base review count in `[100, 1000)`
/// 4. review scale factor in `[0.5, 1.0]` (poor tier only)
/// 5. positive share
/// 6. neutral share
/// 7–11. trend deltas for points 2–6
///
/// The unrounded rating drives the sentiment band and trend bias; the stored
/// rating is rounded to one decimal.
///
/// # Errors
///
/// Returns [`MetricsError::MissingInput`] if either argument is empty or
/// whitespace-only.
pub fn generate(
    name: &str,
    location: &str,
    source: &mut impl UniformSource,
) -> Result<BusinessMetrics, MetricsError> {
    if name.trim().is_empty() || location.trim().is_empty() {
        return Err(MetricsError::MissingInput);
    }

    let tier = RatingTier::from_roll(source.next_unit());
    let (band_lo, band_span) = tier.rating_band();
    let raw_rating = band_lo + source.next_unit() * band_span;

    let base_reviews = 100.0 + source.next_unit() * 900.0;
    let scaled_reviews = match tier {
        RatingTier::Poor => base_reviews * (0.5 + source.next_unit() * 0.5),
        RatingTier::Moderate | RatingTier::Good => base_reviews,
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let reviews = (scaled_reviews.floor().max(f64::from(MIN_REVIEWS))) as u32;

    let band = SentimentBand::from_rating(raw_rating);
    let (p_lo, p_span) = band.positive_range();
    let (n_lo, n_span) = band.neutral_range();
    #[allow(clippy::cast_possible_truncation)]
    let positive = (f64::from(reviews) * (p_lo + source.next_unit() * p_span)).floor() as i64;
    #[allow(clippy::cast_possible_truncation)]
    let neutral = (f64::from(reviews) * (n_lo + source.next_unit() * n_span)).floor() as i64;
    let sentiment = balance_sentiment(reviews, positive, neutral);

    let suggestions = band
        .suggestions()
        .iter()
        .map(|s| (*s).to_string())
        .collect();

    let review_trends = review_trend(reviews, raw_rating, source);

    Ok(BusinessMetrics {
        rating: (raw_rating * 10.0).round() / 10.0,
        reviews,
        headline: headline_for(name, location),
        sentiment,
        suggestions,
        review_trends,
    })
}

/// Turns sampled positive/neutral counts into a split that conserves the
/// review total.
///
/// Negative is the remainder, clamped at zero. Any conservation gap left by
/// truncation or clamping is applied to positive; if that would push positive
/// below zero, positive stops at zero and the rest moves to neutral. For
/// non-negative inputs the result always satisfies
/// `positive + neutral + negative == reviews` with all three non-negative.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn balance_sentiment(reviews: u32, positive: i64, neutral: i64) -> Sentiment {
    let total = i64::from(reviews);
    let negative = (total - positive - neutral).max(0);

    let mut positive = positive + (total - positive - neutral - negative);
    let mut neutral = neutral;
    if positive < 0 {
        neutral += positive;
        positive = 0;
    }

    debug_assert!(neutral >= 0 && positive + neutral + negative == total);
    Sentiment {
        positive: positive as u32,
        neutral: neutral.max(0) as u32,
        negative: negative as u32,
    }
}

/// Six monthly trend points, oldest to newest.
///
/// The first point is seeded at 80% of the review total; each later point
/// drifts by a uniform delta in `[-25, 25)`, pulled down for low ratings and
/// up for high ones, with the running value floored at zero. The final point
/// is then forced to the review total so the trend lands on the headline
/// number.
fn review_trend(reviews: u32, raw_rating: f64, source: &mut impl UniformSource) -> Vec<TrendPoint> {
    let mut current = (f64::from(reviews) * 0.8).floor();
    let mut points = Vec::with_capacity(TREND_MONTHS.len());

    for (i, month) in TREND_MONTHS.iter().enumerate() {
        if i > 0 {
            let mut delta = source.next_unit() * 50.0 - 25.0;
            if raw_rating < 3.5 {
                delta -= (3.5 - raw_rating) * 20.0;
            } else if raw_rating > 4.5 {
                delta += (raw_rating - 4.5) * 15.0;
            }
            current = (current + delta).floor().max(0.0);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        points.push(TrendPoint {
            month: (*month).to_string(),
            count: current as u32,
        });
    }

    if let Some(last) = points.last_mut() {
        last.count = reviews;
    }
    points
}

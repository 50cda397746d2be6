//! DQS aggregation.
//!
//! Combines per-dimension scores into one weighted score. Not-applicable
//! dimensions are excluded from both the numerator and the total weight,
//! so a column missing one dimension is scored purely on the rest rather
//! than being penalized by a phantom zero.

use crate::scoring::score::{round2, Score};

/// Weighted mean over `(score, weight)` pairs with weight renormalization.
///
/// Weights of not-applicable scores are excluded from the total, not
/// counted as zero. Returns [`Score::NotApplicable`] when every entry is
/// not applicable (or there are no entries); otherwise a value rounded to
/// two decimals.
#[must_use]
pub fn weighted_mean(entries: impl IntoIterator<Item = (Score, f64)>) -> Score {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (score, weight) in entries {
        if let Some(value) = score.value() {
            weighted_sum += value * weight;
            total_weight += weight;
        }
    }

    if total_weight == 0.0 {
        Score::NotApplicable
    } else {
        Score::Value(round2(weighted_sum / total_weight))
    }
}

/// Plain mean over scores, skipping not-applicable entries.
///
/// Used for the dataset-level overall DQS. Returns
/// [`Score::NotApplicable`] when no entry carries a value.
#[must_use]
pub fn mean(scores: impl IntoIterator<Item = Score>) -> Score {
    let mut sum = 0.0;
    let mut count = 0usize;

    for score in scores {
        if let Some(value) = score.value() {
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        Score::NotApplicable
    } else {
        Score::Value(round2(sum / count as f64))
    }
}

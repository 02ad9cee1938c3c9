use std::ops::Range;

use crate::{
    error::{AppError, AppResult},
    models::{InteractionMatrix, RecommendationMatrix, TprPoint},
    services::top_k::top_k_items,
};

/// Default number of leading items whose history is hidden for evaluation
pub const DEFAULT_HOLDOUT: usize = 100;

/// Sweeps k and measures how much of a user's hidden history comes back
///
/// `recommendations` must be scored from a copy of `ground_truth` in which
/// the user's first `holdout` interactions were zeroed. For each k in
/// `k_range` the top-k items among the first `holdout` columns are taken,
/// and the rate is the share of the user's true interactions in that block
/// that appear in the list.
///
/// Because top-k lists are nested under the selector's total order, the
/// rate never decreases as k grows.
///
/// # Errors
/// - `InvalidInput` if the two matrices differ in shape
/// - `OutOfRange` if `user` or `holdout` exceed the matrix bounds
/// - `InvalidArgument` if `k_range` is empty or any k is rejected by the
///   selector
/// - `DegenerateInput` if the user has no true interactions among the
///   first `holdout` items
pub fn true_positive_rate_curve(
    recommendations: &RecommendationMatrix,
    ground_truth: &InteractionMatrix,
    user: usize,
    holdout: usize,
    k_range: Range<usize>,
) -> AppResult<Vec<TprPoint>> {
    if recommendations.dim() != ground_truth.dim() {
        return Err(AppError::InvalidInput(format!(
            "recommendation matrix is {:?} but ground truth is {:?}",
            recommendations.dim(),
            ground_truth.dim()
        )));
    }

    if k_range.is_empty() {
        return Err(AppError::InvalidArgument(format!(
            "k range {}..{} is empty",
            k_range.start, k_range.end
        )));
    }

    let relevant = held_out_interactions(ground_truth, user, holdout)?;
    let truth = ground_truth.user_row(user)?;

    k_range
        .map(|k| {
            let top = top_k_items(user, k, recommendations, Some(holdout))?;
            let hits = top.iter().filter(|s| truth[s.item] != 0.0).count();
            let rate = hits as f64 / relevant as f64;

            tracing::debug!(
                user,
                k,
                hits,
                relevant,
                strategy = %recommendations.strategy(),
                "True-positive rate measured"
            );

            Ok(TprPoint { k, rate })
        })
        .collect()
}

/// Counts a user's non-zero interactions among the first `holdout` items
///
/// This is the denominator of the true-positive rate; zero is reported as
/// `DegenerateInput` instead of letting a NaN rate through.
pub fn held_out_interactions(
    ground_truth: &InteractionMatrix,
    user: usize,
    holdout: usize,
) -> AppResult<usize> {
    let truth = ground_truth.user_row(user)?;
    if holdout > truth.len() {
        return Err(AppError::OutOfRange(format!(
            "holdout of {} items exceeds item count {}",
            holdout,
            truth.len()
        )));
    }

    let relevant = truth.iter().take(holdout).filter(|&&v| v != 0.0).count();
    if relevant == 0 {
        return Err(AppError::DegenerateInput(format!(
            "user {} has no interactions among the first {} items, true-positive rate is undefined",
            user, holdout
        )));
    }

    Ok(relevant)
}

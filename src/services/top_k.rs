use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationMatrix, ScoredItem},
};

/// Returns the `k` highest-scoring items for a user, best first
///
/// When `first_n` is set only items `0..first_n` are candidates; this keeps
/// items outside a held-out block from crowding the list during evaluation.
///
/// Ordering is total: score descending, then item index ascending, so equal
/// scores always come back in the same order.
///
/// # Errors
/// - `OutOfRange` if `user` is not a row of the matrix or `first_n` exceeds
///   the number of items
/// - `InvalidArgument` if `k` is 0 or larger than the candidate pool
pub fn top_k_items(
    user: usize,
    k: usize,
    recommendations: &RecommendationMatrix,
    first_n: Option<usize>,
) -> AppResult<Vec<ScoredItem>> {
    let scores = recommendations.user_scores(user)?;

    let pool = match first_n {
        Some(n) if n > scores.len() => {
            return Err(AppError::OutOfRange(format!(
                "candidate limit {} exceeds item count {}",
                n,
                scores.len()
            )));
        }
        Some(n) => n,
        None => scores.len(),
    };

    if k == 0 {
        return Err(AppError::InvalidArgument(
            "k must be at least 1, got 0".to_string(),
        ));
    }
    if k > pool {
        return Err(AppError::InvalidArgument(format!(
            "k={} exceeds candidate pool of size {}",
            k, pool
        )));
    }

    let mut candidates: Vec<ScoredItem> = scores
        .iter()
        .take(pool)
        .enumerate()
        .map(|(item, &score)| ScoredItem { item, score })
        .collect();

    // Partition the best k to the front, then order just that prefix
    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, rank_order);
        candidates.truncate(k);
    }
    candidates.sort_by(rank_order);

    tracing::debug!(
        user,
        k,
        pool,
        strategy = %recommendations.strategy(),
        "Top-k items selected"
    );

    Ok(candidates)
}

/// Best first: higher score, then lower item index
fn rank_order(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.item.cmp(&b.item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InteractionMatrix, Strategy};
    use crate::services::scoring::item_item_recommend;
    use ndarray::array;

    fn scores(rows: ndarray::Array2<f64>) -> RecommendationMatrix {
        RecommendationMatrix::new(Strategy::ItemItem, rows)
    }

    fn items(list: &[ScoredItem]) -> Vec<usize> {
        list.iter().map(|s| s.item).collect()
    }

    #[test]
    fn test_returns_k_items_sorted_descending() {
        let recs = scores(array![[0.1, 0.9, 0.4, 0.7, 0.3]]);
        let top = top_k_items(0, 3, &recs, None).unwrap();

        assert_eq!(items(&top), vec![1, 3, 2]);
        assert_eq!(top[0].score, 0.9);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_break_by_ascending_index() {
        let recs = scores(array![[0.5, 1.0, 0.5, 1.0, 0.5]]);

        let top = top_k_items(0, 4, &recs, None).unwrap();
        assert_eq!(items(&top), vec![1, 3, 0, 2]);

        // Same call, same answer
        for _ in 0..5 {
            assert_eq!(top_k_items(0, 4, &recs, None).unwrap(), top);
        }
    }

    #[test]
    fn test_first_n_restricts_candidates() {
        let recs = scores(array![[0.2, 0.1, 0.3, 5.0, 9.0]]);
        let top = top_k_items(0, 2, &recs, Some(3)).unwrap();
        assert_eq!(items(&top), vec![2, 0]);
    }

    #[test]
    fn test_k_equal_to_pool_returns_every_candidate() {
        let recs = scores(array![[0.2, 0.1, 0.3, 5.0]]);

        let all = top_k_items(0, 4, &recs, None).unwrap();
        assert_eq!(items(&all), vec![3, 2, 0, 1]);

        let restricted = top_k_items(0, 3, &recs, Some(3)).unwrap();
        assert_eq!(items(&restricted), vec![2, 0, 1]);
    }

    #[test]
    fn test_k_one_past_pool_is_invalid() {
        let recs = scores(array![[0.2, 0.1, 0.3, 5.0]]);

        match top_k_items(0, 5, &recs, None) {
            Err(AppError::InvalidArgument(msg)) => {
                assert_eq!(msg, "k=5 exceeds candidate pool of size 4")
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        assert!(matches!(
            top_k_items(0, 4, &recs, Some(3)),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_k_zero_is_invalid() {
        let recs = scores(array![[0.2, 0.1]]);
        assert!(matches!(
            top_k_items(0, 0, &recs, None),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_user_out_of_range() {
        let recs = scores(array![[0.2, 0.1], [0.3, 0.4]]);
        assert!(matches!(
            top_k_items(2, 1, &recs, None),
            Err(AppError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_first_n_beyond_item_count() {
        let recs = scores(array![[0.2, 0.1]]);
        assert!(matches!(
            top_k_items(0, 1, &recs, Some(3)),
            Err(AppError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_item_item_sample_top_two() {
        let matrix = InteractionMatrix::new(array![
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0]
        ])
        .unwrap();
        let recs = item_item_recommend(&matrix).unwrap();

        let top = top_k_items(0, 2, &recs, None).unwrap();
        assert_eq!(items(&top), vec![0, 1]);
        assert!((top[0].score - 1.707_106_781_186_547_5).abs() < 1e-12);
        assert!((top[1].score - 1.707_106_781_186_547_5).abs() < 1e-12);

        // Item 2 is reached only through its similarity to item 0
        let top = top_k_items(0, 3, &recs, None).unwrap();
        assert_eq!(items(&top), vec![0, 1, 2]);
        assert!((top[2].score - 0.5).abs() < 1e-12);
    }
}

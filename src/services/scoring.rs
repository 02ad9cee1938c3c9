use std::time::Instant;

use crate::{
    error::AppResult,
    models::{InteractionMatrix, RecommendationMatrix, Strategy},
    services::similarity::cosine_similarity,
};

/// Scores every (user, item) pair with item-to-item similarity
///
/// `scores = M · cos(Mᵀ)`: a user's own interaction vector weighted by how
/// similar each item is to the items they interacted with.
pub fn item_item_recommend(matrix: &InteractionMatrix) -> AppResult<RecommendationMatrix> {
    let start = Instant::now();
    let values = matrix.values();

    let item_similarity = cosine_similarity(values.t())?;
    let scores = values.dot(&item_similarity);

    tracing::info!(
        users = matrix.n_users(),
        items = matrix.n_items(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Item-item scores computed"
    );

    Ok(RecommendationMatrix::new(Strategy::ItemItem, scores))
}

/// Scores every (user, item) pair with user-to-user similarity
///
/// `scores = cos(M) · M`: every user's interactions weighted by how similar
/// that user is to the target user.
pub fn user_user_recommend(matrix: &InteractionMatrix) -> AppResult<RecommendationMatrix> {
    let start = Instant::now();
    let values = matrix.values();

    let user_similarity = cosine_similarity(values)?;
    let scores = user_similarity.dot(&values);

    tracing::info!(
        users = matrix.n_users(),
        items = matrix.n_items(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "User-user scores computed"
    );

    Ok(RecommendationMatrix::new(Strategy::UserUser, scores))
}

/// Dispatches to the scorer of the given strategy
pub fn recommend(
    strategy: Strategy,
    matrix: &InteractionMatrix,
) -> AppResult<RecommendationMatrix> {
    match strategy {
        Strategy::ItemItem => item_item_recommend(matrix),
        Strategy::UserUser => user_user_recommend(matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPS: f64 = 1e-12;

    fn sample() -> InteractionMatrix {
        InteractionMatrix::new(array![
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0]
        ])
        .unwrap()
    }

    #[test]
    fn test_item_item_scores_for_sample_user() {
        let recs = item_item_recommend(&sample()).unwrap();
        assert_eq!(recs.strategy(), Strategy::ItemItem);
        assert_eq!(recs.dim(), (3, 4));

        let row = recs.user_scores(0).unwrap();
        assert!((row[0] - (1.0 + FRAC_1_SQRT_2)).abs() < EPS);
        assert!((row[1] - (1.0 + FRAC_1_SQRT_2)).abs() < EPS);
        assert!((row[2] - 0.5).abs() < EPS);
        assert!(row[3].abs() < EPS);
    }

    #[test]
    fn test_user_user_scores_for_sample_user() {
        // User similarities: s(0,1) = 0.5, s(0,2) = 0, s(1,2) = 0.5
        let recs = user_user_recommend(&sample()).unwrap();
        assert_eq!(recs.strategy(), Strategy::UserUser);
        assert_eq!(recs.dim(), (3, 4));

        let row = recs.user_scores(0).unwrap();
        assert!((row[0] - 1.5).abs() < EPS);
        assert!((row[1] - 1.0).abs() < EPS);
        assert!((row[2] - 0.5).abs() < EPS);
        assert!(row[3].abs() < EPS);
    }

    #[test]
    fn test_scorers_are_deterministic() {
        let matrix = InteractionMatrix::new(array![
            [1.0, 0.0, 3.0, 1.0, 0.0],
            [0.0, 2.0, 1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0, 0.0, 4.0],
            [0.0, 0.0, 1.0, 1.0, 1.0]
        ])
        .unwrap();

        for strategy in Strategy::ALL {
            let first = recommend(strategy, &matrix).unwrap();
            let second = recommend(strategy, &matrix).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.dim(), matrix.dim());
        }
    }

    #[test]
    fn test_zero_user_scores_zero_under_user_user() {
        let matrix = InteractionMatrix::new(array![[1.0, 0.0], [0.0, 0.0], [1.0, 1.0]]).unwrap();
        let recs = user_user_recommend(&matrix).unwrap();
        assert_eq!(recs.user_scores(1).unwrap().to_vec(), vec![0.0, 0.0]);
    }
}

use ndarray::{s, Array2, ArrayView1, ArrayView2};

use crate::error::{AppError, AppResult};

use super::Strategy;

/// Dense users × items interaction matrix
///
/// Rows are users, columns are items, values are interaction strengths
/// (binary or counts). The matrix is validated once at construction and is
/// never mutated afterwards; derived variants are separate values.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    values: Array2<f64>,
}

impl InteractionMatrix {
    /// Wraps a dense array after checking it is non-empty, finite and non-negative
    ///
    /// Negative zero is stored as `0.0`.
    pub fn new(mut values: Array2<f64>) -> AppResult<Self> {
        let (users, items) = values.dim();
        if users == 0 || items == 0 {
            return Err(AppError::InvalidInput(format!(
                "interaction matrix must have at least one user and one item, got {}x{}",
                users, items
            )));
        }

        if let Some(((user, item), value)) = values
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(AppError::InvalidInput(format!(
                "entry ({}, {}) = {} is not a finite non-negative interaction",
                user, item, value
            )));
        }

        values.mapv_inplace(|v| if v == 0.0 { 0.0 } else { v });

        Ok(Self { values })
    }

    /// Builds a matrix from row vectors, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let users = rows.len();
        let items = rows.first().map(Vec::len).unwrap_or(0);

        if let Some((user, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != items) {
            return Err(AppError::InvalidInput(format!(
                "ragged matrix: row {} has {} entries, expected {}",
                user,
                row.len(),
                items
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((users, items), flat)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        Self::new(values)
    }

    pub fn n_users(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_items(&self) -> usize {
        self.values.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Interaction vector of one user
    pub fn user_row(&self, user: usize) -> AppResult<ArrayView1<'_, f64>> {
        check_user(user, self.n_users())?;
        Ok(self.values.row(user))
    }

    /// Returns a copy in which the user's first `n` interactions are zeroed
    ///
    /// Used to hide a user's known history before scoring. The receiver is
    /// left untouched so it can serve as ground truth afterwards.
    pub fn masked_user_history(&self, user: usize, n: usize) -> AppResult<Self> {
        check_user(user, self.n_users())?;
        if n > self.n_items() {
            return Err(AppError::OutOfRange(format!(
                "cannot mask the first {} items of user {}: matrix has {} items",
                n,
                user,
                self.n_items()
            )));
        }

        let mut values = self.values.clone();
        values.row_mut(user).slice_mut(s![..n]).fill(0.0);

        Ok(Self { values })
    }
}

/// Predicted affinity of every user for every item
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationMatrix {
    strategy: Strategy,
    scores: Array2<f64>,
}

impl RecommendationMatrix {
    pub(crate) fn new(strategy: Strategy, scores: Array2<f64>) -> Self {
        Self { strategy, scores }
    }

    /// Strategy that produced these scores
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn n_users(&self) -> usize {
        self.scores.nrows()
    }

    pub fn n_items(&self) -> usize {
        self.scores.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.scores.dim()
    }

    pub fn scores(&self) -> ArrayView2<'_, f64> {
        self.scores.view()
    }

    /// Score row of one user
    pub fn user_scores(&self, user: usize) -> AppResult<ArrayView1<'_, f64>> {
        check_user(user, self.n_users())?;
        Ok(self.scores.row(user))
    }
}

fn check_user(user: usize, n_users: usize) -> AppResult<()> {
    if user >= n_users {
        return Err(AppError::OutOfRange(format!(
            "user index {} out of range for {} users",
            user, n_users
        )));
    }
    Ok(())
}

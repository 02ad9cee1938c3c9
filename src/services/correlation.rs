use ndarray::Array2;

use crate::{
    error::{AppError, AppResult},
    models::{CorrelationMatrix, Ranking},
};

/// Kendall's tau-b between two equally long sequences of paired observations
///
/// Position `i` pairs `a[i]` with `b[i]`. Every pair of positions is
/// classified as concordant, discordant, or tied in either sequence, and
/// the tie-corrected statistic
///
/// ```text
/// tau_b = (C - D) / sqrt((P - T_a) * (P - T_b)),   P = n(n-1)/2
/// ```
///
/// is returned. The result lies in [-1, 1] and is exactly 1.0 when a
/// sequence is compared with itself.
///
/// # Errors
/// - `InvalidArgument` if the sequences differ in length
/// - `DegenerateInput` if there are fewer than two observations or either
///   sequence is constant
pub fn kendall_tau<T: Ord>(a: &[T], b: &[T]) -> AppResult<f64> {
    if a.len() != b.len() {
        return Err(AppError::InvalidArgument(format!(
            "cannot correlate rankings of length {} and {}",
            a.len(),
            b.len()
        )));
    }

    let n = a.len();
    if n < 2 {
        return Err(AppError::DegenerateInput(format!(
            "rank correlation needs at least 2 observations, got {}",
            n
        )));
    }

    let mut concordant: u64 = 0;
    let mut discordant: u64 = 0;
    let mut tied_a: u64 = 0;
    let mut tied_b: u64 = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let order_a = a[i].cmp(&a[j]);
            let order_b = b[i].cmp(&b[j]);

            if order_a.is_eq() {
                tied_a += 1;
            }
            if order_b.is_eq() {
                tied_b += 1;
            }
            if order_a.is_ne() && order_b.is_ne() {
                if order_a == order_b {
                    concordant += 1;
                } else {
                    discordant += 1;
                }
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as u64;
    let denominator = (((pairs - tied_a) * (pairs - tied_b)) as f64).sqrt();
    if denominator == 0.0 {
        return Err(AppError::DegenerateInput(
            "rank correlation is undefined for a constant ranking".to_string(),
        ));
    }

    Ok((concordant as f64 - discordant as f64) / denominator)
}

/// Pairwise Kendall tau matrix over a set of rankings
///
/// Only the upper triangle (diagonal included) is computed; each value is
/// mirrored into the lower triangle since tau is symmetric. The evaluation
/// pipeline compares four rankings: the two internal strategies and the two
/// external baselines.
pub fn kendall_correlation_matrix(rankings: &[Ranking]) -> AppResult<CorrelationMatrix> {
    if rankings.is_empty() {
        return Err(AppError::InvalidArgument(
            "at least one ranking is required".to_string(),
        ));
    }

    let n = rankings.len();
    let mut values = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in i..n {
            let tau = kendall_tau(&rankings[i].items, &rankings[j].items)?;
            values[[i, j]] = tau;
            values[[j, i]] = tau;
        }
    }

    tracing::info!(rankings = n, "Kendall correlation matrix computed");

    Ok(CorrelationMatrix {
        labels: rankings.iter().map(|r| r.label.clone()).collect(),
        values,
    })
}

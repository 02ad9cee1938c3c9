use ndarray::{Array2, ArrayView2};

use crate::error::{AppError, AppResult};

/// Computes pairwise cosine similarity between the rows of `vectors`
///
/// Pass the interaction matrix as-is to compare users, or its transpose to
/// compare items. Returns a square symmetric matrix whose entry (i, j) is
/// `dot(a, b) / (|a| * |b|)` for rows i and j.
///
/// A row that is entirely zero has no direction, so every similarity it
/// takes part in (its own diagonal entry included) is 0. All other diagonal
/// entries are exactly 1.0.
pub fn cosine_similarity(vectors: ArrayView2<'_, f64>) -> AppResult<Array2<f64>> {
    let (n, dim) = vectors.dim();
    if n == 0 || dim == 0 {
        return Err(AppError::InvalidInput(format!(
            "cannot compute similarity over a {}x{} input",
            n, dim
        )));
    }

    let norms: Vec<f64> = vectors
        .rows()
        .into_iter()
        .map(|row| row.dot(&row).sqrt())
        .collect();

    // Unit-length rows; zero rows stay zero
    let mut normalized = vectors.to_owned();
    for (mut row, &norm) in normalized.rows_mut().into_iter().zip(&norms) {
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    let mut similarity = normalized.dot(&normalized.t());

    // Mirror the upper triangle so sim(i, j) and sim(j, i) are bit-identical
    for i in 0..n {
        similarity[[i, i]] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
        for j in (i + 1)..n {
            similarity[[j, i]] = similarity[[i, j]];
        }
    }

    tracing::debug!(
        vectors = n,
        dimensions = dim,
        zero_vectors = norms.iter().filter(|&&norm| norm == 0.0).count(),
        "Cosine similarity computed"
    );

    Ok(similarity)
}

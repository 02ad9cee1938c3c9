use std::fs;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::InteractionMatrix,
};

/// Loads an interaction matrix from a delimited text file
///
/// One user per line, one value per item, separated by whitespace or
/// commas (the `user-shows.txt` layout). Blank lines are skipped.
pub fn load_interaction_matrix(path: &Path) -> AppResult<InteractionMatrix> {
    let contents = fs::read_to_string(path)?;
    let matrix = parse_interaction_matrix(&contents, path)?;

    tracing::info!(
        path = %path.display(),
        users = matrix.n_users(),
        items = matrix.n_items(),
        "Interaction matrix loaded"
    );

    Ok(matrix)
}

/// Parses matrix text; `source` is only used in error messages
pub fn parse_interaction_matrix(contents: &str, source: &Path) -> AppResult<InteractionMatrix> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
            .collect();

        if fields.is_empty() {
            continue;
        }

        let row = fields
            .iter()
            .map(|f| {
                f.parse::<f64>().map_err(|e| AppError::Parse {
                    path: source.to_path_buf(),
                    line: line_no,
                    message: format!("invalid value {:?}: {}", f, e),
                })
            })
            .collect::<AppResult<Vec<f64>>>()?;

        match width {
            Some(expected) if expected != row.len() => {
                return Err(AppError::Parse {
                    path: source.to_path_buf(),
                    line: line_no,
                    message: format!("expected {} columns, found {}", expected, row.len()),
                });
            }
            Some(_) => {}
            None => width = Some(row.len()),
        }

        rows.push(row);
    }

    InteractionMatrix::from_rows(rows)
}

use std::path::PathBuf;

/// Application-level errors
///
/// The first four variants are local precondition violations raised by the
/// numerical core. They are deterministic: re-running with the same input
/// reproduces the same error, so callers should fix the input instead of
/// retrying.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Malformed matrix: empty, ragged, negative or non-finite entries, or
    /// shapes that do not line up.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A user or item index beyond the matrix bounds.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A parameter outside its allowed domain (e.g. k = 0 or k larger than
    /// the candidate pool).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The computation is undefined for this input (zero denominator).
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

pub type AppResult<T> = Result<T, AppError>;

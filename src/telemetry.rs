use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Filter applied when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "occam_cf=info";

/// Identifier of one evaluation run, stamped on logs and on the report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Creates a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Installs the global fmt subscriber
///
/// Logs go to stderr so stdout carries only the report. Verbosity follows
/// `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Span wrapping everything logged during one run
pub fn make_run_span(run_id: &RunId, user: usize) -> tracing::Span {
    tracing::info_span!("evaluation_run", run_id = %run_id, user = user)
}

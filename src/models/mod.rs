use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub mod matrix;
pub mod ranking;

pub use matrix::{InteractionMatrix, RecommendationMatrix};
pub use ranking::{CorrelationMatrix, Ranking, ScoredItem, Strategy, TprPoint};

/// Top-N recommendations of one strategy for the evaluated user
#[derive(Debug, Clone, Serialize)]
pub struct StrategyRecommendations {
    pub strategy: Strategy,
    pub items: Vec<ScoredItem>,
}

/// True-positive-rate curve of one strategy
#[derive(Debug, Clone, Serialize)]
pub struct StrategyCurve {
    pub strategy: Strategy,
    pub points: Vec<TprPoint>,
}

/// Display name of an item referenced somewhere in the report
///
/// `name` is `None` when no catalog was available or the catalog has no
/// entry for the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub item: usize,
    pub name: Option<String>,
}

/// Everything one evaluation run produces
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub user: usize,
    pub holdout: usize,
    /// Top-N lists scored on the matrix with the user's history masked
    pub masked_recommendations: Vec<StrategyRecommendations>,
    pub tpr_curves: Vec<StrategyCurve>,
    /// Internal top-k lists on the original matrix followed by the baselines
    pub comparison: Vec<Ranking>,
    /// Sorted by item index, one entry per distinct item in the report
    pub legend: Vec<LegendEntry>,
    pub kendall: CorrelationMatrix,
}

impl EvaluationReport {
    /// Looks up the display name recorded for an item
    pub fn item_name(&self, item: usize) -> Option<&str> {
        self.legend
            .binary_search_by_key(&item, |e| e.item)
            .ok()
            .and_then(|idx| self.legend[idx].name.as_deref())
    }
}

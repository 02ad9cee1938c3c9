use ndarray::Array2;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Collaborative-filtering scoring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Weights a user's own interactions by item-to-item similarity
    ItemItem,
    /// Weights every user's interactions by user-to-user similarity
    UserUser,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::ItemItem, Strategy::UserUser];
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::ItemItem => write!(f, "Item-Item"),
            Strategy::UserUser => write!(f, "User-User"),
        }
    }
}

/// One entry of a ranked recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredItem {
    pub item: usize,
    pub score: f64,
}

/// Fraction of held-out interactions recovered in the top `k`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TprPoint {
    pub k: usize,
    pub rate: f64,
}

/// Ordered list of item indices with a display label
///
/// Internal strategies produce these from their top-k lists; external
/// baselines are supplied as literal data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub label: String,
    pub items: Vec<usize>,
}

impl Ranking {
    pub fn new(label: impl Into<String>, items: Vec<usize>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    /// Drops the scores of a ranked list, keeping item order
    pub fn from_scored(label: impl Into<String>, scored: &[ScoredItem]) -> Self {
        Self::new(label, scored.iter().map(|s| s.item).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Square matrix of pairwise rank correlations between labelled rankings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    #[serde(serialize_with = "serialize_rows")]
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }
}

fn serialize_rows<S: Serializer>(values: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let rows: Vec<Vec<f64>> = values.rows().into_iter().map(|r| r.to_vec()).collect();
    rows.serialize(serializer)
}

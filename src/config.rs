use serde::Deserialize;
use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    services::DEFAULT_HOLDOUT,
};

/// ItemKNN top-10 for user 19, produced out-of-band by MyMediaLite
pub const ITEMKNN_REFERENCE: [usize; 10] = [234, 48, 37, 543, 490, 477, 280, 553, 489, 222];

/// WRMF top-10 for user 19, produced out-of-band by MyMediaLite
pub const WRMF_REFERENCE: [usize; 10] = [48, 77, 192, 208, 195, 280, 207, 222, 219, 489];

/// Evaluation configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Interaction matrix file, one user per line
    #[serde(default = "default_matrix_path")]
    pub matrix_path: PathBuf,

    /// Show-name file; names fall back to indices when absent
    #[serde(default = "default_catalog_path")]
    pub catalog_path: Option<PathBuf>,

    /// User whose history is hidden and evaluated
    #[serde(default = "default_user_index")]
    pub user_index: usize,

    /// Number of leading items hidden for the evaluated user
    #[serde(default = "default_holdout")]
    pub holdout: usize,

    /// First k of the true-positive-rate sweep
    #[serde(default = "default_k_min")]
    pub k_min: usize,

    /// End of the sweep (exclusive)
    #[serde(default = "default_k_max")]
    pub k_max: usize,

    /// Number of point recommendations shown per strategy
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Length of the rankings compared against the baselines
    #[serde(default = "default_compare_k")]
    pub compare_k: usize,

    /// ItemKNN baseline ranking (comma separated)
    #[serde(default = "default_itemknn_baseline")]
    pub itemknn_baseline: Vec<usize>,

    /// WRMF baseline ranking (comma separated)
    #[serde(default = "default_wrmf_baseline")]
    pub wrmf_baseline: Vec<usize>,
}

fn default_matrix_path() -> PathBuf {
    PathBuf::from("user-shows.txt")
}

fn default_catalog_path() -> Option<PathBuf> {
    Some(PathBuf::from("shows.txt"))
}

fn default_user_index() -> usize {
    19
}

fn default_holdout() -> usize {
    DEFAULT_HOLDOUT
}

fn default_k_min() -> usize {
    1
}

fn default_k_max() -> usize {
    20
}

fn default_top_n() -> usize {
    5
}

fn default_compare_k() -> usize {
    10
}

fn default_itemknn_baseline() -> Vec<usize> {
    ITEMKNN_REFERENCE.to_vec()
}

fn default_wrmf_baseline() -> Vec<usize> {
    WRMF_REFERENCE.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matrix_path: default_matrix_path(),
            catalog_path: default_catalog_path(),
            user_index: default_user_index(),
            holdout: default_holdout(),
            k_min: default_k_min(),
            k_max: default_k_max(),
            top_n: default_top_n(),
            compare_k: default_compare_k(),
            itemknn_baseline: default_itemknn_baseline(),
            wrmf_baseline: default_wrmf_baseline(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Checks parameters that do not depend on the loaded matrix
    pub fn validate(&self) -> AppResult<()> {
        if self.k_min == 0 {
            return Err(AppError::InvalidArgument(
                "k_min must be at least 1".to_string(),
            ));
        }
        if self.k_min >= self.k_max {
            return Err(AppError::InvalidArgument(format!(
                "k range {}..{} is empty",
                self.k_min, self.k_max
            )));
        }
        if self.top_n == 0 {
            return Err(AppError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }
        if self.compare_k == 0 {
            return Err(AppError::InvalidArgument(
                "compare_k must be at least 1".to_string(),
            ));
        }

        for (name, baseline) in [
            ("ItemKNN", &self.itemknn_baseline),
            ("WRMF", &self.wrmf_baseline),
        ] {
            if baseline.len() != self.compare_k {
                return Err(AppError::InvalidArgument(format!(
                    "{} baseline has {} items, expected compare_k={}",
                    name,
                    baseline.len(),
                    self.compare_k
                )));
            }
        }

        Ok(())
    }
}

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Command-line overrides layered on top of the environment configuration
#[derive(Debug, Parser)]
#[command(name = "occam-cf")]
#[command(about = "Evaluate item-item and user-user collaborative filtering on a user-show matrix")]
pub struct Cli {
    /// Interaction matrix file
    #[arg(short, long)]
    pub matrix: Option<PathBuf>,

    /// Show-name catalog file
    #[arg(short, long, conflicts_with = "no_catalog")]
    pub catalog: Option<PathBuf>,

    /// Skip the catalog and show item indices
    #[arg(long)]
    pub no_catalog: bool,

    /// User to hold out and evaluate
    #[arg(short, long)]
    pub user: Option<usize>,

    /// Number of leading items hidden for the evaluated user
    #[arg(long)]
    pub holdout: Option<usize>,

    /// First k of the true-positive-rate sweep
    #[arg(long)]
    pub k_min: Option<usize>,

    /// End of the sweep (exclusive)
    #[arg(long)]
    pub k_max: Option<usize>,

    /// Point recommendations shown per strategy
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Length of the rankings compared by Kendall tau
    #[arg(long)]
    pub compare_k: Option<usize>,

    /// ItemKNN baseline ranking, comma separated
    #[arg(long, value_delimiter = ',')]
    pub itemknn_baseline: Option<Vec<usize>>,

    /// WRMF baseline ranking, comma separated
    #[arg(long, value_delimiter = ',')]
    pub wrmf_baseline: Option<Vec<usize>>,

    /// Emit the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies the flags that were given, keeping everything else from `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(matrix) = &self.matrix {
            config.matrix_path = matrix.clone();
        }
        if self.no_catalog {
            config.catalog_path = None;
        } else if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        if let Some(user) = self.user {
            config.user_index = user;
        }
        if let Some(holdout) = self.holdout {
            config.holdout = holdout;
        }
        if let Some(k_min) = self.k_min {
            config.k_min = k_min;
        }
        if let Some(k_max) = self.k_max {
            config.k_max = k_max;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(compare_k) = self.compare_k {
            config.compare_k = compare_k;
        }
        if let Some(baseline) = &self.itemknn_baseline {
            config.itemknn_baseline = baseline.clone();
        }
        if let Some(baseline) = &self.wrmf_baseline {
            config.wrmf_baseline = baseline.clone();
        }
        config
    }
}

pub mod correlation;
pub mod evaluation;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod similarity;
pub mod top_k;

pub use correlation::{kendall_correlation_matrix, kendall_tau};
pub use evaluation::{held_out_interactions, true_positive_rate_curve, DEFAULT_HOLDOUT};
pub use pipeline::run_evaluation;
pub use report::TextReport;
pub use scoring::{item_item_recommend, recommend, user_user_recommend};
pub use similarity::cosine_similarity;
pub use top_k::top_k_items;

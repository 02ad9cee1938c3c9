pub mod catalog;
pub mod matrix_file;

pub use catalog::{load_catalog, EmptyCatalog, ItemCatalog, ShowCatalog};
pub use matrix_file::{load_interaction_matrix, parse_interaction_matrix};

//! Profile loading and dataset assembly

pub mod tsv;

pub use tsv::{read_expression_profiles, read_name_list, select_profiles, ProfileTable};

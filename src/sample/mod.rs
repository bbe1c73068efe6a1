//! Generation of sample data for testing.

pub mod phenotypes;
pub mod random_tsv;

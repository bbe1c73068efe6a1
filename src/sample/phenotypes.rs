//! Mapping of free-text phenotype names to ontology term identifiers.

use std::collections::HashMap;

use serde::Deserialize;

use crate::common::{self, io::open_tsv_reader};

/// Lookup of ontology terms (e.g., EFO) for free-text phenotype names.
pub trait PhenotypeMapper {
    /// Return the ontology term ID for `phenotype`, if any.
    fn find_term(&self, phenotype: &str) -> Option<&str>;
}

/// One line of the phenotype mapping file.
#[derive(Debug, Deserialize)]
struct MappingRecord {
    phenotype: String,
    ontology_id: String,
}

/// `PhenotypeMapper` backed by a two-column TSV file.
///
/// Exact matches take precedence over case-insensitive ones.  For duplicate
/// names, the first line wins.
#[derive(Debug, Default, Clone)]
pub struct TsvPhenotypeMapper {
    exact: HashMap<String, String>,
    lowercase: HashMap<String, String>,
}

impl TsvPhenotypeMapper {
    /// Columns required in the mapping file.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &["phenotype", "ontology_id"];

    /// Load mapping from TSV file with `phenotype` and `ontology_id` columns.
    pub fn from_path(path: &str) -> Result<Self, anyhow::Error> {
        let mut reader = open_tsv_reader(path)?;
        common::check_columns(path, reader.headers()?, Self::REQUIRED_COLUMNS)?;

        let mut result = Self::default();
        for record in reader.deserialize() {
            let record: MappingRecord = record?;
            result.insert(record.phenotype, record.ontology_id);
        }
        tracing::debug!("loaded {} phenotype mappings from {}", result.len(), path);

        Ok(result)
    }

    /// Add a mapping unless `phenotype` is already known.
    pub fn insert(&mut self, phenotype: String, ontology_id: String) {
        self.lowercase
            .entry(phenotype.to_lowercase())
            .or_insert_with(|| ontology_id.clone());
        self.exact.entry(phenotype).or_insert(ontology_id);
    }

    /// Number of distinct phenotype names.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

impl PhenotypeMapper for TsvPhenotypeMapper {
    fn find_term(&self, phenotype: &str) -> Option<&str> {
        self.exact
            .get(phenotype)
            .or_else(|| self.lowercase.get(&phenotype.to_lowercase()))
            .map(String::as_str)
    }
}

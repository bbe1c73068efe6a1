//! Configuration of the assertion metadata written into each evidence record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::err::ConfigError;

/// Format of `date_asserted` values.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Metadata that is the same for all records of one run.
///
/// Can be loaded from a TOML file; missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvidenceConf {
    /// Value of `sourceID`.
    pub source_id: String,
    /// Value of `validated_against_schema_version`.
    pub schema_version: String,
    /// Value of both `date_asserted` members.
    pub date_asserted: NaiveDateTime,
    /// Resource score used when the input does not provide one.
    pub default_score: f64,
    /// Provenance database ID.
    pub database_id: String,
    /// Provenance database version.
    pub database_version: String,
    /// Experiment reference used when the input has no sample ID.
    pub experiment_reference: String,
    /// Consequence type label used when the input has no consequence column.
    pub default_consequence_type: String,
}

impl Default for EvidenceConf {
    fn default() -> Self {
        Self {
            source_id: String::from("eva"),
            schema_version: String::from("1.2.8"),
            date_asserted: parse_date("2018-10-22T23:00:00").expect("valid constant date"),
            default_score: 1.0,
            database_id: String::from("abc"),
            database_version: String::from("1"),
            experiment_reference: String::from("STUDYID_1234"),
            default_consequence_type: String::from("frameshift_variant"),
        }
    }
}

impl EvidenceConf {
    /// Load from the TOML file at `path`.
    pub fn from_toml_path(path: &str) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidConf {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let conf: Self = toml::from_str(&toml_str).map_err(|e| ConfigError::InvalidConf {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Check values that the type system does not restrict.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_score.is_finite() {
            return Err(ConfigError::InvalidScore(self.default_score.to_string()));
        }
        Ok(())
    }

    /// Assertion date formatted for output.
    pub fn date_asserted_str(&self) -> String {
        self.date_asserted.format(DATE_FORMAT).to_string()
    }
}

/// Parse a date in `YYYY-MM-DDTHH:MM:SS` format.
pub fn parse_date(value: &str) -> Result<NaiveDateTime, ConfigError> {
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidDate(value.to_string()))
}

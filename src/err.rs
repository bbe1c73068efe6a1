//! Error types shared by the sub commands.

/// Fatal problems with the configuration of a run, detected before any
/// output is written.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "required column(s) {} do not exist in {path} (columns in file are {})",
        .missing.join(", "),
        .observed.join(", ")
    )]
    MissingColumns {
        /// Path of the offending file.
        path: String,
        /// Required columns not found in the header.
        missing: Vec<String>,
        /// All columns found in the header.
        observed: Vec<String>,
    },
    #[error("invalid assertion date {0:?}, expected format YYYY-MM-DDTHH:MM:SS")]
    InvalidDate(String),
    #[error("could not load configuration from {path}: {message}")]
    InvalidConf { path: String, message: String },
    #[error("column {0:?} has no values to sample from")]
    EmptyColumn(String),
    #[error("column(s) {} occur more than once in {path}", .duplicates.join(", "))]
    DuplicateColumns { path: String, duplicates: Vec<String> },
    #[error("invalid default score {0}, must be a finite number")]
    InvalidScore(String),
}

/// Problems with a single input row.
///
/// How these are handled is decided by the caller, see
/// `evidence::convert::OnRowError`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("unknown consequence type: {0:?}")]
    UnknownConsequence(String),
    #[error("required field {0:?} is empty")]
    EmptyField(&'static str),
    #[error("duplicate unique association fields {0} (first seen in data row {1})")]
    DuplicateAssociation(String, usize),
    #[error("invalid score {0}, must be a finite number")]
    InvalidScore(String),
    #[error("malformed row: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_error_display() {
        assert_eq!(
            RowError::UnknownConsequence(String::from("bogus_variant")).to_string(),
            "unknown consequence type: \"bogus_variant\""
        );
        assert_eq!(
            RowError::EmptyField("db_snp_id").to_string(),
            "required field \"db_snp_id\" is empty"
        );
        assert_eq!(
            RowError::InvalidScore(String::from("NaN")).to_string(),
            "invalid score NaN, must be a finite number"
        );
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::InvalidDate(String::from("yesterday")).to_string(),
            "invalid assertion date \"yesterday\", expected format YYYY-MM-DDTHH:MM:SS"
        );
        assert_eq!(
            ConfigError::DuplicateColumns {
                path: String::from("in.tsv"),
                duplicates: vec![String::from("tier")],
            }
            .to_string(),
            "column(s) tier occur more than once in in.tsv"
        );
    }
}

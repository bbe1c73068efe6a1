//! Typed rows of the supported input TSV layouts.

use serde::Deserialize;

use crate::err::RowError;

/// Input layout to expect.
#[derive(
    clap::ValueEnum,
    Clone,
    Copy,
    Debug,
    Default,
    strum::Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum InputFormat {
    /// Tiering export with sample, tier, and consequence type columns.
    #[default]
    Tiering,
    /// Minimal file with `gene`, `EFO`, and `variant` columns.
    Simple,
}

impl InputFormat {
    /// Names of the columns that must be present in the header.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            InputFormat::Tiering => TieringRecord::REQUIRED_COLUMNS,
            InputFormat::Simple => SimpleRecord::REQUIRED_COLUMNS,
        }
    }
}

/// Row of a tiering export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TieringRecord {
    /// sample or study identifier
    pub sample_id: String,
    /// phenotype / EFO term
    pub phenotype: String,
    /// dbSNP identifier, e.g., `rs123`
    pub db_snp_id: String,
    /// tiering classification, e.g., `TIER1`
    pub tier: String,
    /// ENSEMBL gene identifier
    pub genomic_feature_ensembl_id: String,
    /// Sequence Ontology consequence label
    pub consequence_type: String,
}

impl TieringRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "sample_id",
        "phenotype",
        "db_snp_id",
        "tier",
        "genomic_feature_ensembl_id",
        "consequence_type",
    ];
}

/// Row of the minimal layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimpleRecord {
    /// ENSEMBL gene identifier
    pub gene: String,
    /// EFO term
    #[serde(rename = "EFO")]
    pub efo: String,
    /// dbSNP identifier
    pub variant: String,
    /// Precomputed score, if the column exists.
    #[serde(default)]
    pub score: Option<f64>,
    /// Sequence Ontology consequence label, if the column exists.
    #[serde(default)]
    pub consequence_type: Option<String>,
}

impl SimpleRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &["gene", "EFO", "variant"];
    /// Optional column holding the consequence label.
    pub const CONSEQUENCE_COLUMN: &'static str = "consequence_type";

    /// Convert into an `EvidenceInput`.
    ///
    /// With `has_consequence_column`, an empty consequence cell is kept as
    /// blank label so that it is rejected instead of being defaulted.
    pub fn into_input(self, has_consequence_column: bool) -> EvidenceInput {
        let consequence_type = match self.consequence_type {
            None if has_consequence_column => Some(String::new()),
            consequence_type => consequence_type,
        };
        EvidenceInput {
            ensembl_id: self.gene,
            phenotype: self.efo,
            dbsnp_id: self.variant,
            details: Details::Simple {
                score: self.score,
                consequence_type,
            },
        }
    }
}

/// Fields of one observation, independent of the input layout.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceInput {
    pub ensembl_id: String,
    pub phenotype: String,
    pub dbsnp_id: String,
    pub details: Details,
}

/// The layout-specific part of `EvidenceInput`.
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    /// Sample-level observation with consequence type.
    Tiering {
        sample_id: String,
        tier: String,
        consequence_type: String,
    },
    /// Observation with an optional precomputed score.
    Simple {
        score: Option<f64>,
        consequence_type: Option<String>,
    },
}

impl From<TieringRecord> for EvidenceInput {
    fn from(record: TieringRecord) -> Self {
        Self {
            ensembl_id: record.genomic_feature_ensembl_id,
            phenotype: record.phenotype,
            dbsnp_id: record.db_snp_id,
            details: Details::Tiering {
                sample_id: record.sample_id,
                tier: record.tier,
                consequence_type: record.consequence_type,
            },
        }
    }
}

impl From<SimpleRecord> for EvidenceInput {
    fn from(record: SimpleRecord) -> Self {
        let has_consequence_column = record.consequence_type.is_some();
        record.into_input(has_consequence_column)
    }
}

impl EvidenceInput {
    /// Reject the input if any required identifier is empty or blank.
    ///
    /// Columns are named as in the input file of the respective layout.
    pub fn check_required(&self) -> Result<(), RowError> {
        let fields: Vec<(&'static str, &str)> = match &self.details {
            Details::Tiering {
                sample_id,
                tier,
                consequence_type,
            } => vec![
                ("sample_id", sample_id.as_str()),
                ("phenotype", self.phenotype.as_str()),
                ("db_snp_id", self.dbsnp_id.as_str()),
                ("tier", tier.as_str()),
                ("genomic_feature_ensembl_id", self.ensembl_id.as_str()),
                ("consequence_type", consequence_type.as_str()),
            ],
            Details::Simple {
                consequence_type, ..
            } => {
                let mut fields = vec![
                    ("gene", self.ensembl_id.as_str()),
                    ("EFO", self.phenotype.as_str()),
                    ("variant", self.dbsnp_id.as_str()),
                ];
                if let Some(consequence_type) = consequence_type {
                    fields.push((SimpleRecord::CONSEQUENCE_COLUMN, consequence_type.as_str()));
                }
                fields
            }
        };
        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(RowError::EmptyField(name)),
            None => Ok(()),
        }
    }

    /// Key of the unique association fields, used for duplicate detection.
    pub fn association_key(&self) -> Vec<&str> {
        match &self.details {
            Details::Tiering { sample_id, .. } => vec![
                sample_id.as_str(),
                self.ensembl_id.as_str(),
                self.phenotype.as_str(),
                self.dbsnp_id.as_str(),
            ],
            Details::Simple { .. } => vec![
                self.ensembl_id.as_str(),
                self.phenotype.as_str(),
                self.dbsnp_id.as_str(),
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tiering_input() -> EvidenceInput {
        EvidenceInput::from(TieringRecord {
            sample_id: String::from("S1"),
            phenotype: String::from("EFO_1"),
            db_snp_id: String::from("rs1"),
            tier: String::from("TIER1"),
            genomic_feature_ensembl_id: String::from("ENSG1"),
            consequence_type: String::from("stop_gained"),
        })
    }

    #[test]
    fn read_tiering_records() -> Result<(), anyhow::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path("tests/evidence/tiering.tsv")?;
        let records = reader
            .deserialize()
            .collect::<Result<Vec<TieringRecord>, _>>()?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sample_id, "S1");
        assert_eq!(records[1].consequence_type, "synonymous_variant");

        Ok(())
    }

    #[test]
    fn read_simple_records_with_optional_columns() -> Result<(), anyhow::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path("tests/evidence/simple-with-score.tsv")?;
        let records = reader
            .deserialize()
            .collect::<Result<Vec<SimpleRecord>, _>>()?;

        assert_eq!(
            records,
            vec![
                SimpleRecord {
                    gene: String::from("ENSG00000139618"),
                    efo: String::from("EFO_0000305"),
                    variant: String::from("rs123"),
                    score: Some(0.75),
                    consequence_type: Some(String::from("missense_variant")),
                },
                SimpleRecord {
                    gene: String::from("ENSG00000141510"),
                    efo: String::from("EFO_0000311"),
                    variant: String::from("rs456"),
                    score: None,
                    consequence_type: Some(String::from("stop_gained")),
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn check_required_accepts_complete_input() -> Result<(), anyhow::Error> {
        tiering_input().check_required()?;

        Ok(())
    }

    #[rstest::rstest]
    #[case("", "sample_id")]
    #[case("   ", "sample_id")]
    fn check_required_rejects_blank_sample(#[case] value: &str, #[case] column: &'static str) {
        let mut input = tiering_input();
        if let Details::Tiering { sample_id, .. } = &mut input.details {
            *sample_id = value.to_string();
        }

        assert_eq!(input.check_required(), Err(RowError::EmptyField(column)));
    }

    #[test]
    fn check_required_simple_uses_simple_column_names() {
        let input = EvidenceInput::from(SimpleRecord {
            gene: String::from("ENSG1"),
            efo: String::from("EFO_1"),
            variant: String::new(),
            score: None,
            consequence_type: None,
        });

        assert_eq!(input.check_required(), Err(RowError::EmptyField("variant")));
    }

    #[rstest::rstest]
    #[case(true, Err(RowError::EmptyField("consequence_type")))]
    #[case(false, Ok(()))]
    fn check_required_simple_blank_consequence(
        #[case] has_consequence_column: bool,
        #[case] expected: Result<(), RowError>,
    ) {
        let input = SimpleRecord {
            gene: String::from("ENSG1"),
            efo: String::from("EFO_1"),
            variant: String::from("rs1"),
            score: None,
            consequence_type: None,
        }
        .into_input(has_consequence_column);

        assert_eq!(input.check_required(), expected);
    }

    #[test]
    fn association_key_tiering() {
        assert_eq!(
            tiering_input().association_key(),
            vec!["S1", "ENSG1", "EFO_1", "rs1"]
        );
    }
}

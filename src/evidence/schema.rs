//! Data structures of the Open Targets "genetic association" evidence string.
//!
//! Only the members required by the schema are modelled.  Field order
//! matches the order in which the members are written out.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix for building target (gene) identifiers from ENSEMBL gene IDs.
pub const ENSEMBL_PREFIX: &str = "http://identifiers.org/ensembl/";
/// Prefix for building variant identifiers from dbSNP IDs.
pub const DBSNP_PREFIX: &str = "http://identifiers.org/dbsnp/";
/// Target type of all records.
pub const TARGET_TYPE_GENE_VARIANT: &str = "http://identifiers.org/cttv.target/gene_variant";
/// Target activity of all records.
pub const ACTIVITY_LOSS_OF_FUNCTION: &str = "http://identifiers.org/cttv.activity/loss_of_function";
/// Evidence code for the gene-to-variant evidence.
pub const ECO_MAPPING_PIPELINE: &str = "http://identifiers.org/eco/cttv_mapping_pipeline";
/// Evidence code for the variant-to-disease evidence.
pub const ECO_GWAS: &str = "http://identifiers.org/eco/GWAS";

/// Top-level evidence record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Identifier of the data source.
    #[serde(rename = "sourceID")]
    pub source_id: String,
    /// Access level, always `"public"`.
    pub access_level: AccessLevel,
    /// Version of the JSON schema the record was built for.
    pub validated_against_schema_version: String,
    /// Fields whose combination identifies the association.
    pub unique_association_fields: IndexMap<String, String>,
    pub target: Target,
    pub disease: Disease,
    /// Type of the evidence, always `"genetic_association"`.
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    pub variant: Variant,
    pub evidence: Evidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    GeneticAssociation,
}

/// The gene affected by the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// identifiers.org URI of the ENSEMBL gene
    pub id: String,
    pub target_type: String,
    pub activity: String,
}

impl Target {
    /// Construct for the given ENSEMBL gene ID.
    pub fn from_ensembl_id(ensembl_id: &str) -> Self {
        Self {
            id: format!("{}{}", ENSEMBL_PREFIX, ensembl_id),
            target_type: TARGET_TYPE_GENE_VARIANT.to_string(),
            activity: ACTIVITY_LOSS_OF_FUNCTION.to_string(),
        }
    }
}

/// The disease or phenotype, passed through as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub id: String,
}

/// The variant, currently always a single SNP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// identifiers.org URI of the dbSNP record
    pub id: String,
    #[serde(rename = "type")]
    pub variant_type: VariantType,
}

impl Variant {
    /// Construct for the given dbSNP ID.
    pub fn from_dbsnp_id(dbsnp_id: &str) -> Self {
        Self {
            id: format!("{}{}", DBSNP_PREFIX, dbsnp_id),
            variant_type: VariantType::SnpSingle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantType {
    #[serde(rename = "snp single")]
    SnpSingle,
}

/// Evidence chain gene -> variant -> disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub gene2variant: Gene2Variant,
    pub variant2disease: Variant2Disease,
}

/// Database the evidence was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceType {
    pub database: Database,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene2Variant {
    pub is_associated: bool,
    /// Assertion date formatted as `YYYY-MM-DDTHH:MM:SS`.
    pub date_asserted: String,
    pub provenance_type: ProvenanceType,
    pub evidence_codes: Vec<String>,
    /// SO term URI of the functional consequence.
    pub functional_consequence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant2Disease {
    pub unique_experiment_reference: String,
    pub is_associated: bool,
    pub date_asserted: String,
    pub resource_score: ResourceScore,
    pub provenance_type: ProvenanceType,
    pub evidence_codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    Probability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceScore {
    #[serde(rename = "type")]
    pub score_type: ScoreType,
    pub value: f64,
}

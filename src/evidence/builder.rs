//! Construction of evidence records from input rows.

use indexmap::IndexMap;

use crate::err::RowError;

use super::{
    conf::EvidenceConf,
    consequences,
    input::{Details, EvidenceInput},
    schema::{
        AccessLevel, Database, Disease, Evidence, EvidenceRecord, EvidenceType, Gene2Variant,
        ProvenanceType, ResourceScore, ScoreType, Target, Variant, Variant2Disease,
        ECO_GWAS, ECO_MAPPING_PIPELINE,
    },
};

/// Build the evidence record for one observation.
///
/// # Errors
///
/// * `RowError::EmptyField` if a required identifier is blank.
/// * `RowError::InvalidScore` if the score is NaN or infinite.
/// * `RowError::UnknownConsequence` if the consequence label is not in the
///   lookup table.
pub fn build_evidence_record(
    conf: &EvidenceConf,
    input: &EvidenceInput,
) -> Result<EvidenceRecord, RowError> {
    input.check_required()?;

    let (consequence_type, experiment_reference, score) = match &input.details {
        Details::Tiering {
            sample_id,
            consequence_type,
            ..
        } => (
            consequence_type.as_str(),
            sample_id.as_str(),
            conf.default_score,
        ),
        Details::Simple {
            score,
            consequence_type,
        } => (
            consequence_type
                .as_deref()
                .unwrap_or(conf.default_consequence_type.as_str()),
            conf.experiment_reference.as_str(),
            score.unwrap_or(conf.default_score),
        ),
    };
    if !score.is_finite() {
        return Err(RowError::InvalidScore(score.to_string()));
    }
    let functional_consequence = consequences::lookup(consequence_type)?;

    let mut unique_association_fields = IndexMap::new();
    if let Details::Tiering { sample_id, .. } = &input.details {
        unique_association_fields.insert(String::from("sample_id"), sample_id.clone());
    }
    unique_association_fields.insert(String::from("gene"), input.ensembl_id.clone());
    unique_association_fields.insert(String::from("phenotype"), input.phenotype.clone());
    unique_association_fields.insert(String::from("variant"), input.dbsnp_id.clone());

    let date_asserted = conf.date_asserted_str();
    let provenance_type = ProvenanceType {
        database: Database {
            id: conf.database_id.clone(),
            version: conf.database_version.clone(),
        },
    };

    Ok(EvidenceRecord {
        source_id: conf.source_id.clone(),
        access_level: AccessLevel::Public,
        validated_against_schema_version: conf.schema_version.clone(),
        unique_association_fields,
        target: Target::from_ensembl_id(&input.ensembl_id),
        disease: Disease {
            id: input.phenotype.clone(),
        },
        evidence_type: EvidenceType::GeneticAssociation,
        variant: Variant::from_dbsnp_id(&input.dbsnp_id),
        evidence: Evidence {
            gene2variant: Gene2Variant {
                is_associated: true,
                date_asserted: date_asserted.clone(),
                provenance_type: provenance_type.clone(),
                evidence_codes: vec![ECO_MAPPING_PIPELINE.to_string()],
                functional_consequence,
            },
            variant2disease: Variant2Disease {
                unique_experiment_reference: experiment_reference.to_string(),
                is_associated: true,
                date_asserted,
                resource_score: ResourceScore {
                    score_type: ScoreType::Probability,
                    value: score,
                },
                provenance_type,
                evidence_codes: vec![ECO_GWAS.to_string()],
            },
        },
    })
}

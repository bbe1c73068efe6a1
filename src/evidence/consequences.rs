//! Mapping of Sequence Ontology consequence type labels to SO term URIs.

use crate::err::RowError;

/// Prefix of the OBO PURLs of Sequence Ontology terms.
pub const SO_PURL_PREFIX: &str = "http://purl.obolibrary.org/obo/";

/// Functional consequence of a variant as labelled by the Sequence Ontology.
///
/// The string representation is the SO label, matched case-sensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
pub enum ConsequenceType {
    #[strum(serialize = "3_prime_UTR_variant")]
    ThreePrimeUtrVariant,
    #[strum(serialize = "5_prime_UTR_variant")]
    FivePrimeUtrVariant,
    #[strum(serialize = "coding_sequence_variant")]
    CodingSequenceVariant,
    #[strum(serialize = "downstream_gene_variant")]
    DownstreamGeneVariant,
    #[strum(serialize = "feature_elongation")]
    FeatureElongation,
    #[strum(serialize = "feature_truncation")]
    FeatureTruncation,
    #[strum(serialize = "frameshift_variant")]
    FrameshiftVariant,
    #[strum(serialize = "incomplete_terminal_codon_variant")]
    IncompleteTerminalCodonVariant,
    #[strum(serialize = "inframe_deletion")]
    InframeDeletion,
    #[strum(serialize = "inframe_insertion")]
    InframeInsertion,
    #[strum(serialize = "intergenic_variant")]
    IntergenicVariant,
    #[strum(serialize = "intron_variant")]
    IntronVariant,
    #[strum(serialize = "mature_miRNA_variant")]
    MatureMirnaVariant,
    #[strum(serialize = "missense_variant")]
    MissenseVariant,
    #[strum(serialize = "NMD_transcript_variant")]
    NmdTranscriptVariant,
    #[strum(serialize = "non_coding_transcript_exon_variant")]
    NonCodingTranscriptExonVariant,
    #[strum(serialize = "non_coding_transcript_variant")]
    NonCodingTranscriptVariant,
    #[strum(serialize = "protein_altering_variant")]
    ProteinAlteringVariant,
    #[strum(serialize = "regulatory_region_ablation")]
    RegulatoryRegionAblation,
    #[strum(serialize = "regulatory_region_amplification")]
    RegulatoryRegionAmplification,
    #[strum(serialize = "regulatory_region_variant")]
    RegulatoryRegionVariant,
    #[strum(serialize = "splice_acceptor_variant")]
    SpliceAcceptorVariant,
    #[strum(serialize = "splice_donor_variant")]
    SpliceDonorVariant,
    #[strum(serialize = "splice_region_variant")]
    SpliceRegionVariant,
    #[strum(serialize = "start_lost")]
    StartLost,
    #[strum(serialize = "stop_gained")]
    StopGained,
    #[strum(serialize = "stop_lost")]
    StopLost,
    #[strum(serialize = "stop_retained_variant")]
    StopRetainedVariant,
    #[strum(serialize = "synonymous_variant")]
    SynonymousVariant,
    #[strum(serialize = "TF_binding_site_variant")]
    TfBindingSiteVariant,
    #[strum(serialize = "TFBS_ablation")]
    TfbsAblation,
    #[strum(serialize = "TFBS_amplification")]
    TfbsAmplification,
    #[strum(serialize = "transcript_ablation")]
    TranscriptAblation,
    #[strum(serialize = "transcript_amplification")]
    TranscriptAmplification,
    #[strum(serialize = "upstream_gene_variant")]
    UpstreamGeneVariant,
}

impl ConsequenceType {
    /// Return the Sequence Ontology accession, e.g., `SO_0001583`.
    pub fn so_accession(&self) -> &'static str {
        match self {
            ConsequenceType::ThreePrimeUtrVariant => "SO_0001624",
            ConsequenceType::FivePrimeUtrVariant => "SO_0001623",
            ConsequenceType::CodingSequenceVariant => "SO_0001580",
            ConsequenceType::DownstreamGeneVariant => "SO_0001632",
            ConsequenceType::FeatureElongation => "SO_0001907",
            ConsequenceType::FeatureTruncation => "SO_0001906",
            ConsequenceType::FrameshiftVariant => "SO_0001589",
            ConsequenceType::IncompleteTerminalCodonVariant => "SO_0001626",
            ConsequenceType::InframeDeletion => "SO_0001822",
            ConsequenceType::InframeInsertion => "SO_0001821",
            ConsequenceType::IntergenicVariant => "SO_0001628",
            ConsequenceType::IntronVariant => "SO_0001627",
            ConsequenceType::MatureMirnaVariant => "SO_0001620",
            ConsequenceType::MissenseVariant => "SO_0001583",
            ConsequenceType::NmdTranscriptVariant => "SO_0001621",
            ConsequenceType::NonCodingTranscriptExonVariant => "SO_0001792",
            ConsequenceType::NonCodingTranscriptVariant => "SO_0001619",
            ConsequenceType::ProteinAlteringVariant => "SO_0001818",
            ConsequenceType::RegulatoryRegionAblation => "SO_0001894",
            ConsequenceType::RegulatoryRegionAmplification => "SO_0001891",
            ConsequenceType::RegulatoryRegionVariant => "SO_0001566",
            ConsequenceType::SpliceAcceptorVariant => "SO_0001574",
            ConsequenceType::SpliceDonorVariant => "SO_0001575",
            ConsequenceType::SpliceRegionVariant => "SO_0001630",
            ConsequenceType::StartLost => "SO_0002012",
            ConsequenceType::StopGained => "SO_0001587",
            ConsequenceType::StopLost => "SO_0001578",
            ConsequenceType::StopRetainedVariant => "SO_0001567",
            ConsequenceType::SynonymousVariant => "SO_0001819",
            ConsequenceType::TfBindingSiteVariant => "SO_0001782",
            ConsequenceType::TfbsAblation => "SO_0001895",
            ConsequenceType::TfbsAmplification => "SO_0001892",
            ConsequenceType::TranscriptAblation => "SO_0001893",
            ConsequenceType::TranscriptAmplification => "SO_0001889",
            ConsequenceType::UpstreamGeneVariant => "SO_0001631",
        }
    }

    /// Return the full PURL of the Sequence Ontology term.
    pub fn so_term(&self) -> String {
        format!("{}{}", SO_PURL_PREFIX, self.so_accession())
    }
}

/// Resolve a consequence type label to the SO term URI.
///
/// Unknown labels are an error, no default is substituted.
pub fn lookup(label: &str) -> Result<String, RowError> {
    label
        .parse::<ConsequenceType>()
        .map(|csq| csq.so_term())
        .map_err(|_| RowError::UnknownConsequence(label.to_string()))
}

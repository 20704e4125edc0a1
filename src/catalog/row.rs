//! GWAS Catalog association rows.

use serde::Deserialize;

/// One raw row of the GWAS Catalog associations TSV.
///
/// Only the columns the loader consumes are kept; every value is the raw,
/// untrimmed cell text and absent columns deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogRow {
    #[serde(rename = "SNPS")]
    pub snps: String,
    #[serde(rename = "REGION")]
    pub region: String,
    #[serde(rename = "CHR_ID")]
    pub chr_id: String,
    #[serde(rename = "CHR_POS")]
    pub chr_pos: String,
    #[serde(rename = "REPORTED GENE(S)")]
    pub reported_genes: String,
    #[serde(rename = "CONTEXT")]
    pub context: String,
    #[serde(rename = "P-VALUE")]
    pub p_value: String,
    #[serde(rename = "RISK ALLELE FREQUENCY")]
    pub risk_allele_frequency: String,
    #[serde(rename = "PUBMEDID")]
    pub pubmed_id: String,
    #[serde(rename = "DATE ADDED TO CATALOG")]
    pub date_added: String,
    #[serde(rename = "STUDY")]
    pub study: String,
    #[serde(rename = "DISEASE/TRAIT")]
    pub disease_trait: String,
    #[serde(rename = "PLATFORM [SNPS PASSING QC]")]
    pub platform: String,
    #[serde(rename = "STUDY ACCESSION")]
    pub study_accession: String,
    #[serde(rename = "MAPPED_TRAIT")]
    pub mapped_trait: String,
    #[serde(rename = "MAPPED_TRAIT_URI")]
    pub mapped_trait_uri: String,
}

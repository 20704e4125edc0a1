//! Normalized variant records produced from catalog rows.

use serde::Serialize;
use serde_json::{json, Value};

use super::clean::clean_document;

/// Study metadata attached to an association.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Study {
    pub name: String,
    pub platform: String,
    pub accession: String,
}

/// Experimental Factor Ontology terms mapped to the reported trait.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Efo {
    /// Trait labels, e.g. `asthma`
    pub name: Vec<String>,
    /// Trait CURIEs, e.g. `EFO:0000270`
    pub id: Vec<String>,
}

/// Per-row association fields.
///
/// Every variant extracted from a haplotype row carries the same
/// association; only the positional fields on [`NormalizedVariant`] differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Association {
    /// All variants co-reported on the source row
    pub snps: Vec<String>,
    pub pubmed: Option<u64>,
    pub date_added: String,
    pub study: Study,
    #[serde(rename = "trait")]
    pub trait_name: String,
    /// Risk allele frequency
    pub raf: Option<f64>,
    /// Association p-value
    pub pval: Option<f64>,
    pub efo: Efo,
}

/// One variant extracted from a catalog row, keyed by its provisional id.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVariant {
    /// rsID or genomic HGVS identifier
    pub id: String,
    /// True when `id` was derived from a positional token
    pub is_hgvs: bool,
    pub rsid: Option<String>,
    pub region: Option<String>,
    pub chrom: Option<String>,
    pub pos: Option<String>,
    pub gene: Option<Vec<String>>,
    pub context: Option<String>,
    pub association: Association,
}

impl NormalizedVariant {
    /// The `gwascatalog` section before cleanup.
    fn raw_gwascatalog(&self) -> Value {
        json!({
            "associations": self.association,
            "rsid": self.rsid,
            "region": self.region,
            "chrom": self.chrom,
            "pos": self.pos,
            "gene": self.gene,
            "context": self.context,
        })
    }

    /// The full document for this variant after the cleanup pass.
    ///
    /// ```
    /// use ferro_gwas::document::NormalizedVariant;
    /// use ferro_gwas::document::Association;
    ///
    /// let variant = NormalizedVariant {
    ///     id: "rs7412".to_string(),
    ///     is_hgvs: false,
    ///     rsid: Some("rs7412".to_string()),
    ///     region: None,
    ///     chrom: Some("19".to_string()),
    ///     pos: Some("44908822".to_string()),
    ///     gene: Some(vec!["APOE".to_string()]),
    ///     context: None,
    ///     association: Association {
    ///         snps: vec!["rs7412".to_string()],
    ///         ..Default::default()
    ///     },
    /// };
    /// let doc = variant.to_document();
    /// assert_eq!(doc["gwascatalog"]["pos"], 44908822);
    /// assert_eq!(doc["gwascatalog"]["chrom"], "19");
    /// assert_eq!(doc["gwascatalog"]["gene"], "APOE");
    /// ```
    pub fn to_document(&self) -> Value {
        clean_document(json!({
            "_id": self.id,
            "gwascatalog": self.raw_gwascatalog(),
        }))
    }

    /// The cleaned `gwascatalog` section of [`Self::to_document`].
    pub fn gwascatalog(&self) -> Value {
        match self.to_document() {
            Value::Object(mut doc) => doc.remove("gwascatalog").unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

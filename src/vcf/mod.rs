//! VCF-style variant support
//!
//! This module provides the positional variant type found in catalog SNP
//! fields and its conversion to genomic HGVS identifiers.

mod record;
mod to_hgvs;

pub use record::PositionalVariant;
pub use to_hgvs::{vcf_to_hgvs, HgvsNotation, VariantClass};

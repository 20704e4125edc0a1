//! Positional variant records
//!
//! The GWAS Catalog reports variants without an rsID as positional tokens
//! such as `chr1_12345_A_G` or `1-12345-AT-A`.

use std::str::FromStr;

use crate::error::GwasError;

use super::to_hgvs::{vcf_to_hgvs, HgvsNotation};

/// A VCF-style `(chrom, pos, ref, alt)` variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalVariant {
    /// Chromosome without the `chr` prefix
    pub chrom: String,
    /// 1-based position
    pub pos: u64,
    /// Reference allele
    pub reference: String,
    /// Alternate allele
    pub alternate: String,
}

impl PositionalVariant {
    /// Create a new positional variant, stripping any `chr` prefix.
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        reference: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        let chrom = chrom.into();
        let chrom = match chrom.strip_prefix("chr") {
            Some(bare) => bare.to_string(),
            None => chrom,
        };
        Self {
            chrom,
            pos,
            reference: reference.into(),
            alternate: alternate.into(),
        }
    }

    /// Parse a positional SNP token.
    ///
    /// `_`, `-` and `:` all act as delimiters; the token must split into
    /// exactly four parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_gwas::vcf::PositionalVariant;
    ///
    /// let v = PositionalVariant::parse("chr6_32627990_T_C").unwrap();
    /// assert_eq!(v.chrom, "6");
    /// assert_eq!(v.pos, 32627990);
    /// assert!(PositionalVariant::parse("chr6:32627990").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, GwasError> {
        let parts: Vec<&str> = token
            .trim()
            .split(|c| matches!(c, '_' | '-' | ':'))
            .collect();

        let [chrom, pos, reference, alternate] = parts.as_slice() else {
            return Err(GwasError::MalformedSnp {
                value: token.to_string(),
            });
        };

        let pos = pos
            .parse::<u64>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| GwasError::InvalidPosition {
                value: pos.to_string(),
            })?;

        Ok(Self::new(*chrom, pos, *reference, *alternate))
    }

    /// Convert this variant to a genomic HGVS identifier.
    pub fn to_hgvs(&self) -> Result<HgvsNotation, GwasError> {
        vcf_to_hgvs(&self.chrom, self.pos, &self.reference, &self.alternate)
    }
}

impl FromStr for PositionalVariant {
    type Err = GwasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! VCF to HGVS conversion
//!
//! Converts VCF-style `(chrom, pos, ref, alt)` quadruples into genomic HGVS
//! identifiers of the form `chr1:g.12345A>G`. Only the edit types that occur
//! in the GWAS Catalog are produced: substitutions, deletions, insertions and
//! deletion-insertions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GwasError;

/// Kind of genomic change described by an HGVS identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantClass {
    /// Single nucleotide substitution
    Snp,
    /// Deletion following a retained anchor base
    Del,
    /// Insertion following a retained anchor base
    Ins,
    /// Deletion-insertion
    Delins,
}

impl VariantClass {
    /// Short tag used in documents and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantClass::Snp => "snp",
            VariantClass::Del => "del",
            VariantClass::Ins => "ins",
            VariantClass::Delins => "delins",
        }
    }
}

impl fmt::Display for VariantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of converting a VCF-style variant to HGVS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HgvsNotation {
    /// The genomic HGVS identifier, e.g. `chr1:g.100A>G`
    pub hgvs: String,
    /// Edit classification
    pub class: VariantClass,
}

impl HgvsNotation {
    fn new(hgvs: String, class: VariantClass) -> Self {
        Self { hgvs, class }
    }
}

impl fmt::Display for HgvsNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hgvs)
    }
}

fn is_ref_base(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T' | b'N')
}

fn is_alt_base(b: u8) -> bool {
    is_ref_base(b) || b == b'*'
}

fn invalid(chrom: &str, pos: u64, reference: &str, alternate: &str) -> GwasError {
    GwasError::InvalidAllele {
        chrom: chrom.to_string(),
        pos,
        reference: reference.to_string(),
        alternate: alternate.to_string(),
    }
}

/// Convert a VCF-style variant into a genomic HGVS identifier.
///
/// `chrom` is used verbatim after the `chr` prefix, so callers pass bare
/// chromosome names. `ref` must match `[ACGTN]+` and `alt` must match
/// `[ACGTN*]+`, and the two alleles must differ.
///
/// Alleles sharing a leading base on both sides are left-trimmed one base at
/// a time (advancing `pos`) until one allele is a single base or the first
/// bases differ. Coordinates that overflow `u64` are reported as
/// [`GwasError::InvalidPosition`].
///
/// # Examples
///
/// ```
/// use ferro_gwas::vcf::{vcf_to_hgvs, VariantClass};
///
/// let n = vcf_to_hgvs("1", 100, "ATCG", "A").unwrap();
/// assert_eq!(n.hgvs, "chr1:g.101_103del");
/// assert_eq!(n.class, VariantClass::Del);
///
/// assert!(vcf_to_hgvs("1", 100, "X", "G").is_err());
/// ```
pub fn vcf_to_hgvs(
    chrom: &str,
    pos: u64,
    reference: &str,
    alternate: &str,
) -> Result<HgvsNotation, GwasError> {
    let valid = !reference.is_empty()
        && !alternate.is_empty()
        && reference.bytes().all(is_ref_base)
        && alternate.bytes().all(is_alt_base)
        && reference != alternate;
    if !valid {
        return Err(invalid(chrom, pos, reference, alternate));
    }

    // Coordinates past the end of u64 cannot name a real position.
    let offset = |base: u64, delta: usize| {
        base.checked_add(delta as u64)
            .ok_or_else(|| GwasError::InvalidPosition {
                value: pos.to_string(),
            })
    };

    // Alleles are ASCII past this point, so byte slicing is safe.
    let mut pos = pos;
    let mut r = reference;
    let mut a = alternate;

    loop {
        let (rb, ab) = (r.as_bytes(), a.as_bytes());

        match (r.len(), a.len()) {
            (1, 1) => {
                return Ok(HgvsNotation::new(
                    format!("chr{}:g.{}{}>{}", chrom, pos, r, a),
                    VariantClass::Snp,
                ));
            }
            (rl, 1) => {
                let end = offset(pos, rl - 1)?;
                if rb[0] == ab[0] {
                    let start = offset(pos, 1)?;
                    let hgvs = if start == end {
                        format!("chr{}:g.{}del", chrom, start)
                    } else {
                        format!("chr{}:g.{}_{}del", chrom, start, end)
                    };
                    return Ok(HgvsNotation::new(hgvs, VariantClass::Del));
                }
                return Ok(HgvsNotation::new(
                    format!("chr{}:g.{}_{}delins{}", chrom, pos, end, a),
                    VariantClass::Delins,
                ));
            }
            (1, _) => {
                if ab[0] == rb[0] {
                    return Ok(HgvsNotation::new(
                        format!(
                            "chr{}:g.{}_{}ins{}",
                            chrom,
                            pos,
                            offset(pos, 1)?,
                            &a[1..]
                        ),
                        VariantClass::Ins,
                    ));
                }
                return Ok(HgvsNotation::new(
                    format!("chr{}:g.{}delins{}", chrom, pos, a),
                    VariantClass::Delins,
                ));
            }
            (rl, _) => {
                if rb[0] != ab[0] {
                    return Ok(HgvsNotation::new(
                        format!(
                            "chr{}:g.{}_{}delins{}",
                            chrom,
                            pos,
                            offset(pos, rl - 1)?,
                            a
                        ),
                        VariantClass::Delins,
                    ));
                }
                // Both alleles shrink by one base, so the loop terminates.
                r = &r[1..];
                a = &a[1..];
                pos = offset(pos, 1)?;
            }
        }
    }
}

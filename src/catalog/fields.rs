//! Field-level parsing for catalog rows.

use std::borrow::Cow;

use tracing::warn;

use crate::error::GwasError;
use crate::vcf::PositionalVariant;

/// Missing-value token used throughout the catalog ("not reported").
pub const NOT_REPORTED: &str = "NR";

/// Chromosomes accepted in the `CHR_ID` column, compared case-insensitively.
pub const VALID_CHROMOSOMES: [&str; 24] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "x", "y",
];

// Haplotype fields are split on a literal `x`, which would also split the
// `exon` inside this consequence term. The term is escaped before splitting.
const PROTECTED_PHRASE: &str = "non_coding_transcript_exon";
const EXON: &str = "exon";
const EXON_ESCAPED: &str = "eXon";

/// Parsed `SNPS` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpField {
    /// One provisional id per reported variant (rsIDs or HGVS identifiers)
    pub snps: Vec<String>,
    /// Separator used between co-reported variants, if any
    pub separator: Option<char>,
    /// True when the single id was derived from a positional token
    pub is_hgvs: bool,
}

/// Parse the `SNPS` column of a row.
///
/// rsID fields are split on `x` (haplotypes) or `;` (whichever appears
/// first in that order). Anything else is treated as a positional token and
/// converted to HGVS.
///
/// # Examples
///
/// ```
/// use ferro_gwas::catalog::parse_snp_field;
///
/// let field = parse_snp_field("rs1 x rs2").unwrap();
/// assert_eq!(field.snps, vec!["rs1", "rs2"]);
/// assert_eq!(field.separator, Some('x'));
///
/// let field = parse_snp_field("chr1_100_A_G").unwrap();
/// assert_eq!(field.snps, vec!["chr1:g.100A>G"]);
/// assert!(field.is_hgvs);
/// ```
pub fn parse_snp_field(raw: &str) -> Result<SnpField, GwasError> {
    let raw = raw.trim();

    if raw.starts_with("rs") {
        let separator = ['x', ';'].into_iter().find(|sep| raw.contains(*sep));
        let snps = match separator {
            Some(sep) => raw
                .split(sep)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => vec![raw.to_string()],
        };
        return Ok(SnpField {
            snps,
            separator,
            is_hgvs: false,
        });
    }

    let notation = PositionalVariant::parse(raw)?.to_hgvs()?;
    Ok(SnpField {
        snps: vec![notation.hgvs],
        separator: None,
        is_hgvs: true,
    })
}

fn escape_protected(raw: &str) -> Cow<'_, str> {
    if raw.contains(PROTECTED_PHRASE) {
        Cow::Owned(raw.replace(EXON, EXON_ESCAPED))
    } else {
        Cow::Borrowed(raw)
    }
}

fn unescape_protected(item: &str) -> String {
    item.replace(EXON_ESCAPED, EXON)
}

/// Expand a per-variant column into exactly `num_snps` values.
///
/// - empty input yields `num_snps` nulls
/// - a count matching `num_snps` is returned unchanged
/// - a single value is repeated for every variant
/// - fewer values are padded with nulls
/// - extra values are truncated to `num_snps` with a warning
///
/// # Examples
///
/// ```
/// use ferro_gwas::catalog::reorganize_field;
///
/// assert_eq!(reorganize_field("", Some(','), 3), vec![None, None, None]);
/// assert_eq!(
///     reorganize_field("A,B", Some(','), 3),
///     vec![Some("A".to_string()), Some("B".to_string()), None]
/// );
/// ```
pub fn reorganize_field(
    raw: &str,
    separator: Option<char>,
    num_snps: usize,
) -> Vec<Option<String>> {
    if raw.trim().is_empty() {
        return vec![None; num_snps];
    }

    let escaped = escape_protected(raw);
    let mut values: Vec<Option<String>> = match separator {
        Some(sep) => escaped
            .split(sep)
            .map(|item| Some(unescape_protected(item.trim())))
            .collect(),
        None => vec![Some(unescape_protected(escaped.trim()))],
    };

    match values.len() {
        len if len == num_snps => values,
        1 => vec![values.remove(0); num_snps],
        len if len < num_snps => {
            values.resize(num_snps, None);
            values
        }
        len => {
            warn!(
                field = raw,
                values = len,
                expected = num_snps,
                "field has more values than variants, truncating"
            );
            values.truncate(num_snps);
            values
        }
    }
}

/// Convert a catalog numeric cell to a float.
///
/// `NR`, empty cells and unparseable text all become `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_REPORTED {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a PubMed id; non-numeric ids become `None`.
pub fn parse_pubmed(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Keep a chromosome only if it is an autosome or X/Y.
pub fn validate_chrom(chrom: Option<String>) -> Option<String> {
    chrom.filter(|c| {
        let lower = c.to_lowercase();
        VALID_CHROMOSOMES.contains(&lower.as_str())
    })
}

/// Split a comma-separated cell into trimmed items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Reduce an ontology URI to a CURIE-style id.
///
/// `http://www.ebi.ac.uk/efo/EFO_0000270` becomes `EFO:0000270`.
pub fn ontology_id(uri: &str) -> String {
    let uri = uri.trim();
    let last = uri.rsplit('/').next().unwrap_or(uri);
    last.replace('_', ":")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_parse_snp_field_single_rsid() {
        let field = parse_snp_field("rs123").unwrap();
        assert_eq!(field.snps, vec!["rs123"]);
        assert_eq!(field.separator, None);
        assert!(!field.is_hgvs);
    }

    #[test]
    fn test_parse_snp_field_semicolon() {
        let field = parse_snp_field("rs1; rs2; rs3").unwrap();
        assert_eq!(field.snps, vec!["rs1", "rs2", "rs3"]);
        assert_eq!(field.separator, Some(';'));
    }

    #[test]
    fn test_parse_snp_field_positional_errors() {
        let err = parse_snp_field("chr1:12345").unwrap_err();
        assert!(matches!(err, GwasError::MalformedSnp { .. }));

        let err = parse_snp_field("chr1_100_Z_G").unwrap_err();
        assert!(matches!(err, GwasError::InvalidAllele { .. }));
    }

    #[test]
    fn test_reorganize_pads_and_repeats() {
        assert_eq!(reorganize_field("", Some(','), 3), vec![None, None, None]);
        assert_eq!(reorganize_field("A", Some(','), 3), some(&["A", "A", "A"]));
        assert_eq!(
            reorganize_field("A,B", Some(','), 3),
            vec![Some("A".to_string()), Some("B".to_string()), None]
        );
    }

    #[test]
    fn test_reorganize_exact_count() {
        assert_eq!(
            reorganize_field("1p36 x 2q11", Some('x'), 2),
            some(&["1p36", "2q11"])
        );
    }

    #[test]
    fn test_reorganize_without_separator() {
        assert_eq!(
            reorganize_field(" BRCA1, TP53 ", None, 1),
            some(&["BRCA1, TP53"])
        );
        assert_eq!(reorganize_field("", None, 1), vec![None]);
    }

    #[test]
    fn test_reorganize_truncates_extra_values() {
        assert_eq!(
            reorganize_field("a;b;c", Some(';'), 2),
            some(&["a", "b"])
        );
    }

    #[test]
    fn test_reorganize_protects_exon_phrase() {
        let raw = "non_coding_transcript_exon_variant x intron_variant";
        assert_eq!(
            reorganize_field(raw, Some('x'), 2),
            some(&["non_coding_transcript_exon_variant", "intron_variant"])
        );
    }

    #[test]
    fn test_reorganize_calls_are_independent() {
        let first = reorganize_field("", Some(';'), 2);
        let second = reorganize_field("a", Some(';'), 2);
        assert_eq!(first, vec![None, None]);
        assert_eq!(second, some(&["a", "a"]));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("NR"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("0.25 (EA)"), None);
        assert_eq!(parse_float("2E-8"), Some(2e-8));
        assert_eq!(parse_float(" 0.31 "), Some(0.31));
        assert_eq!(parse_float("NaN"), None);
    }

    #[test]
    fn test_validate_chrom() {
        assert_eq!(validate_chrom(Some("X".to_string())), Some("X".to_string()));
        assert_eq!(validate_chrom(Some("22".to_string())), Some("22".to_string()));
        assert_eq!(validate_chrom(Some("23".to_string())), None);
        assert_eq!(validate_chrom(Some("MT".to_string())), None);
        assert_eq!(validate_chrom(None), None);
    }

    #[test]
    fn test_ontology_id() {
        assert_eq!(
            ontology_id("http://www.ebi.ac.uk/efo/EFO_0000270"),
            "EFO:0000270"
        );
        assert_eq!(
            ontology_id(" http://purl.obolibrary.org/obo/HP_0000822"),
            "HP:0000822"
        );
    }

    #[test]
    fn test_parse_pubmed() {
        assert_eq!(parse_pubmed("30595370"), Some(30595370));
        assert_eq!(parse_pubmed(""), None);
    }
}

//! Property-based tests for notation conversion, row normalization and merging
//!
//! Uses proptest to check invariants that must hold for any input rather
//! than specific examples.

use ferro_gwas::catalog::{normalize_row, reorganize_field, CatalogRow};
use ferro_gwas::document::{Association, NormalizedVariant, ResolvedDocument, Study};
use ferro_gwas::{vcf_to_hgvs, VariantClass};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

/// Generate valid nucleotide bases
fn nucleotide() -> impl Strategy<Value = char> {
    prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'), Just('N')]
}

/// Generate a reference allele of the given length range
fn allele(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(nucleotide(), len).prop_map(|bases| bases.into_iter().collect())
}

/// Generate valid chromosome names
fn chromosome() -> impl Strategy<Value = String> {
    prop_oneof![
        (1..=22u32).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("Y".to_string()),
    ]
}

/// Generate small positive position numbers
fn position() -> impl Strategy<Value = u64> {
    1..10_000_000u64
}

/// Generate rsIDs
fn rsid() -> impl Strategy<Value = String> {
    (1..100_000_000u64).prop_map(|n| format!("rs{}", n))
}

fn member(id: &str, study: String) -> NormalizedVariant {
    NormalizedVariant {
        id: id.to_string(),
        is_hgvs: false,
        rsid: Some(id.to_string()),
        region: Some("1p36".to_string()),
        chrom: Some("1".to_string()),
        pos: Some("1000".to_string()),
        gene: Some(vec!["GENE".to_string()]),
        context: None,
        association: Association {
            snps: vec![id.to_string()],
            study: Study {
                name: study,
                ..Default::default()
            },
            ..Default::default()
        },
    }
}

// =============================================================================
// Notation conversion
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn single_bases_are_snps(
        chrom in chromosome(),
        pos in position(),
        r in nucleotide(),
        a in nucleotide(),
    ) {
        prop_assume!(r != a);
        let n = vcf_to_hgvs(&chrom, pos, &r.to_string(), &a.to_string()).unwrap();
        prop_assert_eq!(n.class, VariantClass::Snp);
        prop_assert_eq!(n.hgvs, format!("chr{}:g.{}{}>{}", chrom, pos, r, a));
    }

    #[test]
    fn anchored_deletions(pos in position(), anchor in nucleotide(), deleted in allele(1..20)) {
        let reference = format!("{}{}", anchor, deleted);
        let n = vcf_to_hgvs("1", pos, &reference, &anchor.to_string()).unwrap();
        prop_assert_eq!(n.class, VariantClass::Del);
        let expected = if deleted.len() == 1 {
            format!("chr1:g.{}del", pos + 1)
        } else {
            format!("chr1:g.{}_{}del", pos + 1, pos + deleted.len() as u64)
        };
        prop_assert_eq!(n.hgvs, expected);
    }

    #[test]
    fn anchored_insertions(pos in position(), anchor in nucleotide(), inserted in allele(1..20)) {
        let alternate = format!("{}{}", anchor, inserted);
        let n = vcf_to_hgvs("1", pos, &anchor.to_string(), &alternate).unwrap();
        prop_assert_eq!(n.class, VariantClass::Ins);
        prop_assert_eq!(n.hgvs, format!("chr1:g.{}_{}ins{}", pos, pos + 1, inserted));
    }

    #[test]
    fn conversion_is_deterministic(pos in position(), r in allele(1..8), a in allele(1..8)) {
        let first = vcf_to_hgvs("2", pos, &r, &a);
        let second = vcf_to_hgvs("2", pos, &r, &a);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn shared_prefix_is_trimmed(
        pos in position(),
        prefix in allele(1..5),
        r in allele(1..5),
        a in allele(1..5),
    ) {
        prop_assume!(r.as_bytes()[0] != a.as_bytes()[0]);
        let reference = format!("{}{}", prefix, r);
        let alternate = format!("{}{}", prefix, a);
        let anchored = vcf_to_hgvs("3", pos, &reference, &alternate).unwrap();
        let bare = vcf_to_hgvs("3", pos + prefix.len() as u64, &r, &a).unwrap();
        prop_assert_eq!(anchored, bare);
    }
}

// =============================================================================
// Row normalization
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn reorganize_always_yields_n(
        values in prop::collection::vec("[a-z0-9]{1,6}", 0..6),
        n in 1..6usize,
    ) {
        let raw = values.join(",");
        let expanded = reorganize_field(&raw, Some(','), n);
        prop_assert_eq!(expanded.len(), n);
    }

    #[test]
    fn one_variant_per_reported_snp(
        ids in prop::collection::vec(rsid(), 1..6),
        chroms in prop::collection::vec(chromosome(), 1..6),
    ) {
        let row = CatalogRow {
            snps: ids.join(" x "),
            chr_id: chroms.join(" x "),
            study: "A study".to_string(),
            ..Default::default()
        };
        let variants = normalize_row(&row).unwrap();
        prop_assert_eq!(variants.len(), ids.len());
        for (variant, id) in variants.iter().zip(&ids) {
            prop_assert_eq!(&variant.id, id);
            prop_assert_eq!(&variant.association.snps, &ids);
        }
    }
}

// =============================================================================
// Merging
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn merge_keeps_every_association(
        studies in prop::collection::vec("[A-Za-z ]{1,12}[a-z]", 1..8),
    ) {
        let members: Vec<NormalizedVariant> = studies
            .iter()
            .map(|s| member("rs42", s.clone()))
            .collect();
        let doc = ResolvedDocument::merge("chr1:g.1000A>G", &members).unwrap();
        prop_assert_eq!(&doc.id, "chr1:g.1000A>G");
        prop_assert_eq!(doc.association_count(), members.len());
        if members.len() == 1 {
            prop_assert_eq!(doc.gwascatalog, members[0].gwascatalog());
        }
    }
}

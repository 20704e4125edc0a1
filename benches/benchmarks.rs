//! Performance benchmarks for ferro-gwas
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- conversion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_gwas::catalog::{normalize_row, normalize_rows, CatalogRow};
use ferro_gwas::resolve::InMemoryResolver;
use ferro_gwas::{aggregate, vcf_to_hgvs, AggregateOptions};

// =============================================================================
// Notation conversion benchmarks
// =============================================================================

/// Benchmark VCF to HGVS conversion for each classification branch
fn bench_conversion(c: &mut Criterion) {
    let variants = vec![
        ("snp", "A", "G"),
        ("del", "AT", "A"),
        ("del_range", "ATCGATCG", "A"),
        ("ins", "A", "ATTT"),
        ("delins", "AT", "GC"),
        ("trimmed", "ACGTACGTAC", "ACGTACGTTT"),
    ];

    let mut group = c.benchmark_group("conversion");

    for (name, reference, alternate) in &variants {
        group.bench_with_input(
            BenchmarkId::new("class", name),
            &(reference, alternate),
            |b, (r, a)| b.iter(|| vcf_to_hgvs(black_box("1"), black_box(12345), r, a)),
        );
    }

    group.finish();
}

// =============================================================================
// Row normalization benchmarks
// =============================================================================

fn row(snps: &str, chr_id: &str) -> CatalogRow {
    CatalogRow {
        snps: snps.to_string(),
        region: "6p21.32".to_string(),
        chr_id: chr_id.to_string(),
        chr_pos: "32627990".to_string(),
        reported_genes: "HLA-DQA1, HLA-DRB1".to_string(),
        context: "intergenic_variant".to_string(),
        p_value: "3E-12".to_string(),
        risk_allele_frequency: "0.25".to_string(),
        pubmed_id: "30595370".to_string(),
        date_added: "2019-01-02".to_string(),
        study: "Genome-wide association study".to_string(),
        disease_trait: "Type 1 diabetes".to_string(),
        platform: "Illumina [2500000]".to_string(),
        study_accession: "GCST007195".to_string(),
        mapped_trait: "type I diabetes mellitus".to_string(),
        mapped_trait_uri: "http://www.ebi.ac.uk/efo/EFO_0001359".to_string(),
    }
}

/// Benchmark single-row normalization by SNP field shape
fn bench_normalize_row(c: &mut Criterion) {
    let rows = vec![
        ("rsid", row("rs9272346", "6")),
        ("positional", row("chr6_32627990_T_C", "6")),
        ("haplotype", row("rs1 x rs2 x rs3 x rs4", "6 x 6 x 6 x 6")),
    ];

    let mut group = c.benchmark_group("normalize_row");

    for (name, r) in &rows {
        group.bench_with_input(BenchmarkId::new("shape", name), r, |b, r| {
            b.iter(|| normalize_row(black_box(r)))
        });
    }

    group.finish();
}

/// Benchmark the normalize + aggregate pipeline on an in-memory catalog
fn bench_pipeline(c: &mut Criterion) {
    let rows: Vec<CatalogRow> = (0..1000)
        .map(|i| row(&format!("rs{}", i % 250), "6"))
        .collect();
    let resolver: InMemoryResolver = (0..250)
        .map(|i| (format!("rs{}", i), format!("chr6:g.{}A>G", 1000 + i)))
        .collect();

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("1000_rows", |b| {
        b.iter(|| {
            let output = normalize_rows(rows.iter().cloned().map(Ok)).unwrap();
            aggregate(output.variants, &resolver, &AggregateOptions::default())
                .unwrap()
                .count()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_conversion, bench_normalize_row, bench_pipeline);
criterion_main!(benches);

//! GWAS Catalog input
//!
//! Reading the associations TSV and turning each row into one
//! [`NormalizedVariant`](crate::document::NormalizedVariant) per reported
//! variant.
//!
//! # Example
//!
//! ```
//! use ferro_gwas::catalog::{normalize_rows, read_catalog_from, ReadOptions};
//!
//! let tsv = "SNPS\tCHR_ID\tSTUDY\nrs1 x rs2\t1 x 2\tS\nchr3_100_AT_A\t3\tS\n";
//! let catalog = read_catalog_from(tsv.as_bytes(), &ReadOptions::default()).unwrap();
//! let output = normalize_rows(catalog.into_results()).unwrap();
//!
//! let ids: Vec<&str> = output.variants.iter().map(|v| v.id.as_str()).collect();
//! assert_eq!(ids, vec!["rs1", "rs2", "chr3:g.101del"]);
//! ```

mod fields;
mod normalize;
mod reader;
mod row;

pub use fields::{
    ontology_id, parse_float, parse_pubmed, parse_snp_field, reorganize_field, split_list,
    validate_chrom, SnpField, NOT_REPORTED, VALID_CHROMOSOMES,
};
pub use normalize::{normalize_row, normalize_rows, NormalizeOutput, NormalizeStats};
pub use reader::{open_catalog, read_catalog, read_catalog_from, Catalog, ReadOptions};
pub use row::CatalogRow;

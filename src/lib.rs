// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-gwas: GWAS Catalog loader
//!
//! Part of the ferro bioinformatics toolkit. Turns the GWAS Catalog
//! associations TSV into variant documents keyed by genomic HGVS ids:
//! positional variants are converted to HGVS, rsIDs are resolved through
//! a variant service, and rows reporting the same variant are merged.
//!
//! # Example
//!
//! ```
//! use ferro_gwas::{aggregate, normalize_rows, read_catalog_from, AggregateOptions, ReadOptions};
//! use ferro_gwas::resolve::InMemoryResolver;
//!
//! let tsv = "SNPS\tCHR_ID\tCHR_POS\tSTUDY\n\
//!            chr1_100_A_G\t1\t100\tFirst\n\
//!            rs7412\t19\t44908822\tSecond\n";
//!
//! let catalog = read_catalog_from(tsv.as_bytes(), &ReadOptions::default()).unwrap();
//! let output = normalize_rows(catalog.into_results()).unwrap();
//!
//! let resolver: InMemoryResolver = [("rs7412", "chr19:g.44908822C>T")].into_iter().collect();
//! let ids: Vec<String> = aggregate(output.variants, &resolver, &AggregateOptions::default())
//!     .unwrap()
//!     .map(|doc| doc.id)
//!     .collect();
//!
//! assert_eq!(ids, vec!["chr1:g.100A>G", "chr19:g.44908822C>T"]);
//! ```

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod resolve;
pub mod vcf;

pub use aggregate::{
    aggregate, aggregate_with_progress, AggregateOptions, ResolvedDocuments, VariantGroup,
};
pub use catalog::{
    normalize_row, normalize_rows, read_catalog, read_catalog_from, CatalogRow, ReadOptions,
};
pub use config::GwasConfig;
pub use document::{NormalizedVariant, ResolvedDocument};
pub use error::{ErrorCode, GwasError};
pub use resolve::{InMemoryResolver, MyVariantResolver, VariantResolver};
pub use vcf::{vcf_to_hgvs, HgvsNotation, PositionalVariant, VariantClass};

/// Result type alias for ferro-gwas operations
pub type Result<T> = std::result::Result<T, GwasError>;

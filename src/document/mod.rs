//! Variant documents
//!
//! [`NormalizedVariant`] is the per-variant record built from one catalog
//! row; [`ResolvedDocument`] is what gets loaded, keyed by the canonical
//! identifier and possibly merging several rows.
//!
//! Both serialize to the same shape:
//!
//! ```text
//! {"_id": "chr1:g.100A>G", "gwascatalog": {"associations": ..., "gene": ..., ...}}
//! ```

mod clean;
mod resolved;
mod variant;

pub use clean::{clean_document, convert_numbers, sweep, unlist, NUMERIC_SKIPPED_KEYS};
pub use resolved::{ResolvedDocument, MERGED_SCALAR_FIELDS};
pub use variant::{Association, Efo, NormalizedVariant, Study};

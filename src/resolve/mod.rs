//! Canonical identifier resolution.
//!
//! Reference SNP ids (rsIDs) are not canonical document keys; each one is
//! looked up against an external variant service that maps it to a genomic
//! HGVS identifier. This module provides the resolver trait, an in-memory
//! implementation for tests and offline runs, and the MyVariant.info client.
//!
//! # Example
//!
//! ```
//! use ferro_gwas::resolve::{resolve_in_batches, InMemoryResolver};
//!
//! let mut resolver = InMemoryResolver::new();
//! resolver.insert("rs58991260", "chr1:g.218631822G>A");
//!
//! let ids = vec!["rs58991260".to_string(), "rs0".to_string()];
//! let resolved = resolve_in_batches(&ids, &resolver, 1000, |_| {}).unwrap();
//! assert_eq!(resolved["rs58991260"], "chr1:g.218631822G>A");
//! assert!(!resolved.contains_key("rs0"));
//! ```

mod batch;
mod myvariant;

use std::collections::HashMap;
use std::path::Path;

use crate::error::GwasError;

pub use batch::{resolve_in_batches, BatchProgress, DEFAULT_BATCH_SIZE};
pub use myvariant::{MyVariantResolver, DEFAULT_API_URL};

/// Resolver answers: queried id to canonical id, `None` when not found.
pub type Resolutions = HashMap<String, Option<String>>;

/// A batch lookup service mapping rsIDs to canonical identifiers.
pub trait VariantResolver {
    /// Resolve one batch of ids.
    ///
    /// Ids absent from the returned map, or mapped to `None`, have no
    /// canonical identifier. Errors are fatal for the whole run.
    fn resolve_batch(&self, ids: &[String]) -> Result<Resolutions, GwasError>;

    /// Short name used in log messages.
    fn name(&self) -> &str {
        "resolver"
    }
}

impl<R: VariantResolver + ?Sized> VariantResolver for &R {
    fn resolve_batch(&self, ids: &[String]) -> Result<Resolutions, GwasError> {
        (**self).resolve_batch(ids)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Map-backed resolver for tests and offline loads.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    entries: HashMap<String, String>,
}

impl InMemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping from `id` to `canonical`.
    pub fn insert(&mut self, id: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(id.into(), canonical.into());
    }

    /// Load mappings from a two-column TSV (`id`, `canonical id`).
    ///
    /// Lines starting with `#` are comments; extra columns are ignored.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self, GwasError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut resolver = Self::new();
        for record in reader.records() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(id), Some(canonical)) if !id.is_empty() && !canonical.is_empty() => {
                    resolver.insert(id.trim(), canonical.trim());
                }
                _ => {
                    return Err(GwasError::Csv {
                        msg: format!(
                            "expected two columns in resolver table, found {:?}",
                            record
                        ),
                    })
                }
            }
        }
        Ok(resolver)
    }

    /// Number of known mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the resolver has no mappings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryResolver {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut resolver = Self::new();
        for (id, canonical) in iter {
            resolver.insert(id, canonical);
        }
        resolver
    }
}

impl VariantResolver for InMemoryResolver {
    fn resolve_batch(&self, ids: &[String]) -> Result<Resolutions, GwasError> {
        Ok(ids
            .iter()
            .map(|id| (id.clone(), self.entries.get(id).cloned()))
            .collect())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

//! Grouping, identifier resolution and merging.
//!
//! Every normalized variant is grouped under its provisional id in arrival
//! order. Once the whole input has been grouped, the distinct rsIDs are
//! resolved in batches and each group becomes at most one
//! [`ResolvedDocument`]. Groups keyed by a genomic HGVS id are already
//! canonical and never reach the resolver.
//!
//! # Example
//!
//! ```
//! use ferro_gwas::aggregate::{aggregate, AggregateOptions};
//! use ferro_gwas::catalog::{normalize_rows, read_catalog_from, ReadOptions};
//! use ferro_gwas::resolve::InMemoryResolver;
//!
//! let tsv = "SNPS\tSTUDY\nrs123\tFirst\nrs123\tSecond\nrs999\tThird\n";
//! let catalog = read_catalog_from(tsv.as_bytes(), &ReadOptions::default()).unwrap();
//! let variants = normalize_rows(catalog.into_results()).unwrap().variants;
//!
//! let resolver: InMemoryResolver = [("rs123", "chr1:g.500A>T")].into_iter().collect();
//! let docs: Vec<_> = aggregate(variants, &resolver, &AggregateOptions::default())
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(docs.len(), 1);
//! assert_eq!(docs[0].id, "chr1:g.500A>T");
//! assert_eq!(docs[0].association_count(), 2);
//! ```

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::document::{NormalizedVariant, ResolvedDocument};
use crate::error::GwasError;
use crate::resolve::{resolve_in_batches, BatchProgress, VariantResolver, DEFAULT_BATCH_SIZE};

/// Options for [`aggregate`].
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Ids per resolver call
    pub batch_size: usize,
    /// Emit unmapped rsID groups keyed by the rsID instead of dropping them
    pub keep_unresolved: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            keep_unresolved: false,
        }
    }
}

impl From<&ResolverConfig> for AggregateOptions {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            keep_unresolved: config.keep_unresolved,
        }
    }
}

/// All variants sharing a provisional id, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantGroup {
    pub id: String,
    pub members: Vec<NormalizedVariant>,
}

impl VariantGroup {
    /// Whether the id must go through the resolver.
    pub fn needs_resolution(&self) -> bool {
        self.members.first().is_some_and(|m| !m.is_hgvs)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Merge the group into a document keyed by `canonical`.
    ///
    /// See [`ResolvedDocument::merge`] for the merge policy.
    pub fn into_document(self, canonical: impl Into<String>) -> Option<ResolvedDocument> {
        ResolvedDocument::merge(canonical, &self.members)
    }
}

/// Group variants by provisional id.
///
/// Groups are returned in order of first sighting and members keep their
/// input order.
pub fn group_variants<I>(variants: I) -> Vec<VariantGroup>
where
    I: IntoIterator<Item = NormalizedVariant>,
{
    let mut groups: Vec<VariantGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for variant in variants {
        match index.get(&variant.id) {
            Some(&i) => groups[i].members.push(variant),
            None => {
                index.insert(variant.id.clone(), groups.len());
                groups.push(VariantGroup {
                    id: variant.id.clone(),
                    members: vec![variant],
                });
            }
        }
    }

    groups
}

/// Lazily merged documents for every group with a canonical id.
///
/// Single pass: documents are built as the iterator is advanced and the
/// groups are consumed.
#[derive(Debug)]
pub struct ResolvedDocuments {
    groups: std::vec::IntoIter<VariantGroup>,
    mapping: HashMap<String, String>,
    keep_unresolved: bool,
    emitted: usize,
    dropped: usize,
}

impl ResolvedDocuments {
    /// Groups dropped so far for lack of a canonical id.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Documents emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Groups not yet consumed.
    pub fn remaining(&self) -> usize {
        self.groups.len()
    }

    fn canonical_id(&self, group: &VariantGroup) -> Option<String> {
        if !group.needs_resolution() {
            return Some(group.id.clone());
        }
        match self.mapping.get(&group.id) {
            Some(canonical) => Some(canonical.clone()),
            None if self.keep_unresolved => Some(group.id.clone()),
            None => None,
        }
    }
}

impl Iterator for ResolvedDocuments {
    type Item = ResolvedDocument;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(group) = self.groups.next() {
            let Some(canonical) = self.canonical_id(&group) else {
                debug!(id = %group.id, members = group.len(), "Dropping unresolved group");
                self.dropped += 1;
                continue;
            };
            if let Some(doc) = group.into_document(canonical) {
                self.emitted += 1;
                return Some(doc);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

/// Group, resolve and merge, reporting resolver progress.
///
/// The whole input is grouped before the first resolver call. A resolver
/// error aborts the run and no documents are produced.
pub fn aggregate_with_progress<I, R, F>(
    variants: I,
    resolver: &R,
    options: &AggregateOptions,
    progress: F,
) -> Result<ResolvedDocuments, GwasError>
where
    I: IntoIterator<Item = NormalizedVariant>,
    R: VariantResolver + ?Sized,
    F: FnMut(&BatchProgress),
{
    let groups = group_variants(variants);
    let to_resolve: Vec<&str> = groups
        .iter()
        .filter(|g| g.needs_resolution())
        .map(|g| g.id.as_str())
        .collect();

    info!(
        "Grouped variants into {} groups ({} need resolution)",
        groups.len(),
        to_resolve.len()
    );

    let mapping = if to_resolve.is_empty() {
        HashMap::new()
    } else {
        resolve_in_batches(to_resolve, resolver, options.batch_size, progress)?
    };

    Ok(ResolvedDocuments {
        groups: groups.into_iter(),
        mapping,
        keep_unresolved: options.keep_unresolved,
        emitted: 0,
        dropped: 0,
    })
}

/// Group, resolve and merge without progress reporting.
pub fn aggregate<I, R>(
    variants: I,
    resolver: &R,
    options: &AggregateOptions,
) -> Result<ResolvedDocuments, GwasError>
where
    I: IntoIterator<Item = NormalizedVariant>,
    R: VariantResolver + ?Sized,
{
    aggregate_with_progress(variants, resolver, options, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Association, Study};
    use crate::resolve::{InMemoryResolver, Resolutions};
    use std::cell::RefCell;

    fn variant(id: &str, study: &str) -> NormalizedVariant {
        let is_hgvs = !id.starts_with("rs");
        NormalizedVariant {
            id: id.to_string(),
            is_hgvs,
            rsid: (!is_hgvs).then(|| id.to_string()),
            region: None,
            chrom: Some("1".to_string()),
            pos: Some("500".to_string()),
            gene: None,
            context: None,
            association: Association {
                snps: vec![id.to_string()],
                study: Study {
                    name: study.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    /// Records every id the aggregator asks about.
    struct SpyResolver {
        inner: InMemoryResolver,
        asked: RefCell<Vec<String>>,
    }

    impl VariantResolver for SpyResolver {
        fn resolve_batch(&self, ids: &[String]) -> Result<Resolutions, GwasError> {
            self.asked.borrow_mut().extend(ids.iter().cloned());
            self.inner.resolve_batch(ids)
        }
    }

    #[test]
    fn test_group_order() {
        let groups = group_variants(vec![
            variant("rs2", "A"),
            variant("rs1", "B"),
            variant("rs2", "C"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "rs2");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].members[1].association.study.name, "C");
        assert_eq!(groups[1].id, "rs1");
    }

    #[test]
    fn test_two_rows_same_rsid_merge() {
        let resolver: InMemoryResolver = [("rs123", "chr1:g.500A>T")].into_iter().collect();
        let docs: Vec<_> = aggregate(
            vec![variant("rs123", "Study one"), variant("rs123", "Study two")],
            &resolver,
            &AggregateOptions::default(),
        )
        .unwrap()
        .collect();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "chr1:g.500A>T");
        assert_eq!(docs[0].association_count(), 2);
        assert_eq!(
            docs[0].gwascatalog["associations"][1]["study"]["name"],
            "Study two"
        );
        assert_eq!(docs[0].gwascatalog["rsid"], "rs123");
    }

    #[test]
    fn test_unresolved_dropped() {
        let resolver = InMemoryResolver::new();
        let mut docs = aggregate(
            vec![variant("rs1", "A"), variant("rs2", "B")],
            &resolver,
            &AggregateOptions::default(),
        )
        .unwrap();
        assert_eq!(docs.remaining(), 2);
        assert_eq!(docs.size_hint(), (0, Some(2)));
        assert!(docs.next().is_none());
        assert_eq!(docs.remaining(), 0);
        assert_eq!(docs.dropped(), 2);
        assert_eq!(docs.emitted(), 0);
    }

    #[test]
    fn test_keep_unresolved() {
        let resolver = InMemoryResolver::new();
        let options = AggregateOptions {
            keep_unresolved: true,
            ..Default::default()
        };
        let docs: Vec<_> = aggregate(vec![variant("rs1", "A")], &resolver, &options)
            .unwrap()
            .collect();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "rs1");
    }

    #[test]
    fn test_hgvs_ids_skip_resolver() {
        let resolver = SpyResolver {
            inner: [("rs1", "chr2:g.10A>G")].into_iter().collect(),
            asked: RefCell::new(Vec::new()),
        };
        let docs: Vec<_> = aggregate(
            vec![
                variant("chr1:g.100A>G", "A"),
                variant("rs1", "B"),
                variant("chr1:g.100A>G", "C"),
            ],
            &resolver,
            &AggregateOptions::default(),
        )
        .unwrap()
        .collect();

        assert_eq!(*resolver.asked.borrow(), vec!["rs1".to_string()]);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "chr1:g.100A>G");
        assert_eq!(docs[0].association_count(), 2);
        assert_eq!(docs[1].id, "chr2:g.10A>G");
    }

    #[test]
    fn test_no_resolver_call_without_rsids() {
        let resolver = SpyResolver {
            inner: InMemoryResolver::new(),
            asked: RefCell::new(Vec::new()),
        };
        let mut calls = 0;
        let docs = aggregate_with_progress(
            vec![variant("chr1:g.100A>G", "A")],
            &resolver,
            &AggregateOptions::default(),
            |_| calls += 1,
        )
        .unwrap();
        assert_eq!(docs.count(), 1);
        assert_eq!(calls, 0);
        assert!(resolver.asked.borrow().is_empty());
    }

    #[test]
    fn test_single_member_matches_variant() {
        let resolver: InMemoryResolver = [("rs1", "chr1:g.500A>T")].into_iter().collect();
        let v = variant("rs1", "A");
        let doc = aggregate(vec![v.clone()], &resolver, &AggregateOptions::default())
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(doc.gwascatalog, v.gwascatalog());
    }

    #[test]
    fn test_options_from_config() {
        let config = ResolverConfig {
            batch_size: 10,
            keep_unresolved: true,
            ..Default::default()
        };
        let options = AggregateOptions::from(&config);
        assert_eq!(options.batch_size, 10);
        assert!(options.keep_unresolved);
    }
}

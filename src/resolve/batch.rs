//! Batched resolution with progress reporting.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::GwasError;

use super::VariantResolver;

/// Ids per resolver call.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Progress information for batched resolution.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total distinct ids to resolve.
    pub total: usize,
    /// Ids sent to the resolver so far.
    pub processed: usize,
    /// Ids that received a canonical id so far.
    pub resolved: usize,
    /// Resolver calls made so far.
    pub batches: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Calculate completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }

    /// Calculate processing rate (ids per second), 0.0 before any time has elapsed.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }

    /// Estimate remaining time based on current rate.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let rate = self.items_per_second();
        if rate == 0.0 {
            return None;
        }
        let remaining_items = self.total.saturating_sub(self.processed);
        Some(Duration::from_secs_f64(remaining_items as f64 / rate))
    }
}

/// Resolve ids through `resolver` in batches of at most `batch_size`.
///
/// Ids are deduplicated and sorted so that batches are reproducible.
/// `progress` is called after every batch. Only ids with a canonical
/// mapping appear in the result; the first resolver error aborts.
pub fn resolve_in_batches<I, S, R, F>(
    ids: I,
    resolver: &R,
    batch_size: usize,
    mut progress: F,
) -> Result<HashMap<String, String>, GwasError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: VariantResolver + ?Sized,
    F: FnMut(&BatchProgress),
{
    if batch_size == 0 {
        return Err(GwasError::Config {
            msg: "resolver batch size must be greater than 0".to_string(),
        });
    }

    let unique: BTreeSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
    let unique: Vec<String> = unique.into_iter().collect();

    info!(
        "Resolving {} distinct ids with {} resolver",
        unique.len(),
        resolver.name()
    );

    let start = Instant::now();
    let mut state = BatchProgress {
        total: unique.len(),
        processed: 0,
        resolved: 0,
        batches: 0,
        elapsed: Duration::ZERO,
    };
    let mut mapping = HashMap::with_capacity(unique.len());

    for batch in unique.chunks(batch_size) {
        let answers = resolver.resolve_batch(batch)?;

        for id in batch {
            match answers.get(id) {
                Some(Some(canonical)) => {
                    mapping.insert(id.clone(), canonical.clone());
                }
                _ => debug!(id = %id, "No canonical id found"),
            }
        }

        state.batches += 1;
        state.processed += batch.len();
        state.resolved = mapping.len();
        state.elapsed = start.elapsed();
        debug!(
            "Resolved batch {} ({}/{} ids, {:.1}%)",
            state.batches,
            state.processed,
            state.total,
            state.percent()
        );
        progress(&state);
    }

    info!(
        "Resolved {}/{} ids in {:?}",
        mapping.len(),
        unique.len(),
        start.elapsed()
    );

    Ok(mapping)
}

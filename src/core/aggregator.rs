use crate::core::{CatalogSource, Item, ItemId};
use crate::utils::error::{CouponError, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_BATCH_DEADLINE: Duration = Duration::from_secs(10);

/// Resolves a batch of identifiers concurrently, all or nothing.
pub struct CatalogAggregator<C: CatalogSource> {
    source: C,
    deadline: Duration,
}

impl<C: CatalogSource> CatalogAggregator<C> {
    pub fn new(source: C) -> Self {
        Self::with_deadline(source, DEFAULT_BATCH_DEADLINE)
    }

    pub fn with_deadline(source: C, deadline: Duration) -> Self {
        Self { source, deadline }
    }

    /// Resolves every id, returning items in input order.
    ///
    /// Fails with the first error observed; fetches still in flight are
    /// dropped. If the batch deadline passes first, the error names every id
    /// that had not resolved yet.
    pub async fn resolve_all(&self, ids: &[ItemId]) -> Result<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!("📡 Resolving {} catalog items", ids.len());
        // a deadline past the clock's range means no deadline
        let deadline = Instant::now().checked_add(self.deadline);

        let mut in_flight: FuturesUnordered<_> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| async move { (index, self.source.resolve(id).await) })
            .collect();
        let mut slots: Vec<Option<Item>> = vec![None; ids.len()];

        loop {
            let next = in_flight.next();
            let outcome = match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, next).await,
                None => Ok(next.await),
            };
            match outcome {
                Ok(Some((index, Ok(item)))) => slots[index] = Some(item),
                Ok(Some((index, Err(err)))) => {
                    tracing::warn!(
                        "❌ Item {} failed, abandoning {} outstanding fetches",
                        ids[index],
                        in_flight.len()
                    );
                    return Err(err);
                }
                Ok(None) => break,
                Err(_) => {
                    let pending: Vec<ItemId> = slots
                        .iter()
                        .zip(ids)
                        .filter(|(slot, _)| slot.is_none())
                        .map(|(_, id)| id.clone())
                        .collect();
                    tracing::warn!(
                        "⏱️ Batch deadline of {:?} exceeded with {} items pending",
                        self.deadline,
                        pending.len()
                    );
                    return Err(CouponError::ItemResolutionError { ids: pending });
                }
            }
        }

        let items: Vec<Item> = slots.into_iter().flatten().collect();
        tracing::info!("✅ Resolved {} catalog items", items.len());
        Ok(items)
    }
}

use crate::domain::model::{FavoriteCount, Item, ItemId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Resolves a single identifier against the catalog source.
///
/// Implementations report every failure for `id` as
/// `CouponError::ItemResolutionError` naming that id.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn resolve(&self, id: &ItemId) -> Result<Item>;
}

/// Read-only view of the favorite-mark store.
///
/// `top_counts` groups marks by item and returns them ordered by count,
/// highest first.
pub trait FavoriteCountSource: Send + Sync {
    fn top_counts(&self) -> Result<Vec<FavoriteCount>>;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_endpoint(&self) -> &str;
    fn batch_deadline(&self) -> Duration;
    fn favorites_path(&self) -> Option<&str>;
    fn top_k(&self) -> usize;
}

use crate::core::{FavoriteCount, FavoriteCountSource};
use crate::utils::error::{CouponError, Result};

pub const DEFAULT_TOP_K: usize = 5;

/// Ranks items by how many users marked them as favorite.
pub struct FavoritesRanker<F: FavoriteCountSource> {
    source: F,
}

impl<F: FavoriteCountSource> FavoritesRanker<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    /// Returns at most `k` entries, highest count first.
    ///
    /// Entries with equal counts keep the order the source reported them in.
    pub fn top_favorites(&self, k: usize) -> Result<Vec<FavoriteCount>> {
        let mut counts = self.source.top_counts()?;
        if counts.is_empty() {
            return Err(CouponError::NoFavoritesError);
        }

        counts.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        counts.truncate(k);

        tracing::debug!("Ranked top {} favorites", counts.len());
        Ok(counts)
    }
}

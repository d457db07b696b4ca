use crate::adapters::{HttpCatalogClient, InMemoryFavoriteStore};
use crate::core::aggregator::CatalogAggregator;
use crate::core::coupon::CouponPipeline;
use crate::core::favorites::{FavoritesRanker, DEFAULT_TOP_K};
use crate::core::{
    CatalogSource, ConfigProvider, CouponRequest, CouponResponse, FavoriteCount,
    FavoriteCountSource,
};
use crate::utils::error::Result;

/// Entry point for the two inbound operations: applying a coupon and
/// listing the most favorited items.
pub struct CouponEngine<C: CatalogSource, F: FavoriteCountSource> {
    pipeline: CouponPipeline<C>,
    ranker: FavoritesRanker<F>,
    top_k: usize,
}

impl<C: CatalogSource, F: FavoriteCountSource> CouponEngine<C, F> {
    pub fn new(pipeline: CouponPipeline<C>, ranker: FavoritesRanker<F>) -> Self {
        Self::with_top_k(pipeline, ranker, DEFAULT_TOP_K)
    }

    pub fn with_top_k(pipeline: CouponPipeline<C>, ranker: FavoritesRanker<F>, top_k: usize) -> Self {
        Self {
            pipeline,
            ranker,
            top_k,
        }
    }

    pub async fn apply_coupon(&self, request: CouponRequest) -> Result<CouponResponse> {
        tracing::info!(
            "🎟️ Applying coupon of {} to {} items",
            request.amount,
            request.item_ids.len()
        );

        let result = self.pipeline.apply(&request.item_ids, request.amount).await?;

        tracing::info!(
            "✅ Coupon applied: {} items selected, total {}",
            result.selected_ids.len(),
            result.total_spent
        );
        Ok(result.into())
    }

    pub fn top_favorites(&self) -> Result<Vec<FavoriteCount>> {
        tracing::info!("⭐ Ranking top {} favorites", self.top_k);
        self.ranker.top_favorites(self.top_k)
    }
}

impl CouponEngine<HttpCatalogClient, InMemoryFavoriteStore> {
    /// Wires the HTTP catalog client and the given favorites store from configuration.
    pub fn from_config<P: ConfigProvider>(config: &P, favorites: InMemoryFavoriteStore) -> Result<Self> {
        let client = HttpCatalogClient::new(config.catalog_endpoint())?;
        let aggregator = CatalogAggregator::with_deadline(client, config.batch_deadline());

        Ok(Self::with_top_k(
            CouponPipeline::new(aggregator),
            FavoritesRanker::new(favorites),
            config.top_k(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FavoriteMark, Item, ItemId};
    use crate::utils::error::CouponError;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct FlatPriceCatalog(Decimal);

    #[async_trait]
    impl CatalogSource for FlatPriceCatalog {
        async fn resolve(&self, id: &ItemId) -> Result<Item> {
            Item::new(id.clone(), self.0)
        }
    }

    fn engine(marks: Vec<FavoriteMark>) -> CouponEngine<FlatPriceCatalog, InMemoryFavoriteStore> {
        CouponEngine::with_top_k(
            CouponPipeline::new(CatalogAggregator::new(FlatPriceCatalog(dec!(25)))),
            FavoritesRanker::new(InMemoryFavoriteStore::from_marks(marks)),
            2,
        )
    }

    #[tokio::test]
    async fn test_apply_coupon_maps_to_response() {
        let request = CouponRequest {
            item_ids: vec![ItemId::from("a"), ItemId::from("b"), ItemId::from("c")],
            amount: dec!(60),
        };

        let response = engine(vec![]).apply_coupon(request).await.unwrap();

        assert_eq!(response.item_ids, vec![ItemId::from("a"), ItemId::from("b")]);
        assert_eq!(response.total, dec!(50));
    }

    #[test]
    fn test_top_favorites_uses_configured_k() {
        let engine = engine(vec![
            FavoriteMark::new("u1", "a"),
            FavoriteMark::new("u1", "b"),
            FavoriteMark::new("u2", "b"),
            FavoriteMark::new("u1", "c"),
        ]);

        let top = engine.top_favorites().unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, ItemId::from("b"));
    }

    #[test]
    fn test_top_favorites_without_marks() {
        assert!(matches!(
            engine(vec![]).top_favorites(),
            Err(CouponError::NoFavoritesError)
        ));
    }
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{HttpCatalogClient, InMemoryFavoriteStore};
pub use core::{
    aggregator::CatalogAggregator, coupon::CouponPipeline, engine::CouponEngine,
    favorites::FavoritesRanker, selector::BudgetSelector,
};
pub use domain::model::{
    CouponRequest, CouponResponse, FavoriteCount, FavoriteMark, Item, ItemId, SelectionResult,
};
pub use domain::ports::{CatalogSource, ConfigProvider, FavoriteCountSource};
pub use utils::error::{CouponError, Result};

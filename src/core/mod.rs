pub mod aggregator;
pub mod coupon;
pub mod engine;
pub mod favorites;
pub mod selector;

pub use crate::domain::model::{
    CouponRequest, CouponResponse, FavoriteCount, FavoriteMark, Item, ItemId, SelectionResult,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, FavoriteCountSource};
pub use crate::utils::error::Result;

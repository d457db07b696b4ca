// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod favorites;
pub mod http;

pub use favorites::InMemoryFavoriteStore;
pub use http::{HttpCatalogClient, DEFAULT_CATALOG_ENDPOINT};

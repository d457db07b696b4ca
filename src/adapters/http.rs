use crate::domain::model::{Item, ItemId};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{CouponError, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://meli-api-items.wl.r.appspot.com/api/items/";

#[derive(Debug, Deserialize)]
struct CatalogItemPayload {
    id: Option<String>,
    price: Option<Decimal>,
}

/// Catalog source backed by `GET {base}/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("coupon-engine/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CouponError::InvalidConfigValueError {
            field: "catalog.endpoint".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CouponError::InvalidConfigValueError {
                field: "catalog.endpoint".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }
        Ok(Self { client, base_url })
    }

    pub fn item_url(&self, id: &ItemId) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }

    async fn fetch(&self, id: &ItemId) -> std::result::Result<Item, String> {
        let url = self.item_url(id);
        tracing::debug!("📡 Fetching catalog item {} from {}", id, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("transport error: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("catalog responded with status {}", status));
        }

        let payload: CatalogItemPayload = response
            .json()
            .await
            .map_err(|e| format!("malformed payload: {}", e))?;

        let item_id = match payload.id {
            Some(item_id) if !item_id.trim().is_empty() => item_id,
            _ => return Err("payload has no id".to_string()),
        };
        let price = payload.price.ok_or_else(|| "payload has no price".to_string())?;

        Item::new(item_id, price).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn resolve(&self, id: &ItemId) -> Result<Item> {
        match self.fetch(id).await {
            Ok(item) => {
                tracing::debug!("Resolved item {} at price {}", item.id, item.price);
                Ok(item)
            }
            Err(cause) => {
                tracing::warn!("⚠️ Could not resolve item {}: {}", id, cause);
                Err(CouponError::item_resolution(id.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;

    fn client_for(server: &MockServer) -> HttpCatalogClient {
        HttpCatalogClient::new(&server.url("/api/items/")).unwrap()
    }

    fn assert_unresolved(result: Result<Item>, expected: &str) {
        match result {
            Err(CouponError::ItemResolutionError { ids }) => {
                assert_eq!(ids, vec![ItemId::from(expected)]);
            }
            other => panic!("expected ItemResolutionError, got {:?}", other),
        }
    }

    #[test]
    fn test_item_url_appends_path_segment() {
        let client = HttpCatalogClient::new("https://catalog.example.com/api/items/").unwrap();
        assert_eq!(
            client.item_url(&ItemId::from("MLA123")).as_str(),
            "https://catalog.example.com/api/items/MLA123"
        );

        let client = HttpCatalogClient::new("https://catalog.example.com/api/items").unwrap();
        assert_eq!(
            client.item_url(&ItemId::from("a b")).as_str(),
            "https://catalog.example.com/api/items/a%20b"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(HttpCatalogClient::new("not a url").is_err());
        assert!(HttpCatalogClient::new("mailto:items@example.com").is_err());
    }

    #[tokio::test]
    async fn test_resolve_successful_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/items/MLA1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "MLA1", "price": 123.42}));
        });

        let item = client_for(&server)
            .resolve(&ItemId::from("MLA1"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(item.id, ItemId::from("MLA1"));
        assert_eq!(item.price, dec!(123.42));
    }

    #[tokio::test]
    async fn test_resolve_not_found_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/items/missing");
            then.status(404);
        });

        let result = client_for(&server).resolve(&ItemId::from("missing")).await;

        api_mock.assert();
        assert_unresolved(result, "missing");
    }

    #[tokio::test]
    async fn test_resolve_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/items/garbled");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{not json");
        });

        let result = client_for(&server).resolve(&ItemId::from("garbled")).await;
        assert_unresolved(result, "garbled");
    }

    #[tokio::test]
    async fn test_resolve_missing_or_negative_price() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/items/noprice");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "noprice"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/items/negative");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "negative", "price": -5.0}));
        });

        let client = client_for(&server);
        assert_unresolved(client.resolve(&ItemId::from("noprice")).await, "noprice");
        assert_unresolved(client.resolve(&ItemId::from("negative")).await, "negative");
    }
}

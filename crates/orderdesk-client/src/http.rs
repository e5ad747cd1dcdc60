//! # HTTP Catalog
//!
//! reqwest implementation of both lookup services.
//!
//! ```text
//! GET {base}/api/v1/search_product/{code}?apikey={key}
//! GET {base}/api/v1/supplier/findproduct?supplier={id}&name={text}
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use orderdesk_core::validation::{validate_product_code, validate_search_text, validate_supplier_id};

use crate::config::ServiceSettings;
use crate::error::{ClientError, ClientResult};
use crate::lookup::{PriceLookup, SupplierSearch};

/// HTTP client for the page's JSON services.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCatalog {
    pub fn new(settings: &ServiceSettings) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpCatalog {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// URL of the price lookup for one product code.
    pub fn price_url(&self, product_code: &str) -> String {
        let mut url = format!(
            "{}/api/v1/search_product/{}",
            self.base_url,
            urlencoding::encode(product_code)
        );
        if let Some(key) = &self.api_key {
            url.push_str("?apikey=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// URL of the supplier product search.
    pub fn search_url(&self, supplier: &str, name: &str) -> String {
        format!(
            "{}/api/v1/supplier/findproduct?supplier={}&name={}",
            self.base_url,
            urlencoding::encode(supplier),
            urlencoding::encode(name)
        )
    }

    async fn get_json(&self, url: String) -> ClientResult<Value> {
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PriceLookup for HttpCatalog {
    async fn lookup_price(&self, product_code: &str) -> ClientResult<Value> {
        validate_product_code(product_code)?;
        self.get_json(self.price_url(product_code)).await
    }
}

#[async_trait]
impl SupplierSearch for HttpCatalog {
    async fn find_products(&self, supplier: &str, name: &str) -> ClientResult<Value> {
        validate_supplier_id(supplier)?;
        let name = validate_search_text(name)?;
        self.get_json(self.search_url(supplier, name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(api_key: Option<&str>) -> HttpCatalog {
        HttpCatalog::new(&ServiceSettings {
            base_url: "http://shop.local/".into(),
            api_key: api_key.map(String::from),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_price_url() {
        assert_eq!(
            catalog(Some("k1")).price_url("BOLT M8"),
            "http://shop.local/api/v1/search_product/BOLT%20M8?apikey=k1"
        );
        assert_eq!(
            catalog(None).price_url("P-1"),
            "http://shop.local/api/v1/search_product/P-1"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            catalog(None).search_url("17", "hex & nut"),
            "http://shop.local/api/v1/supplier/findproduct?supplier=17&name=hex%20%26%20nut"
        );
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_request() {
        let catalog = catalog(None);

        let err = catalog.lookup_price("  ").await.unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));

        let err = catalog.lookup_price(&"A".repeat(65)).await.unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));

        let err = catalog.find_products("", "bolt").await.unwrap_err();
        assert!(!err.is_transport());
    }
}

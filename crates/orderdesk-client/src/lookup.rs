//! # Lookup Services
//!
//! The two remote services the page consumes. Both return raw JSON; what
//! the body means is decided in orderdesk-core ([`PriceQuote::from_json`],
//! [`SuggestionState::apply_payload`]).
//!
//! [`PriceQuote::from_json`]: orderdesk_core::PriceQuote::from_json
//! [`SuggestionState::apply_payload`]: orderdesk_core::SuggestionState::apply_payload

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

/// Product price/VAT lookup, keyed by product code.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Fetches the lookup response for one product code.
    ///
    /// The body is expected to carry `cost`, `assemblycosts` and `vat`.
    async fn lookup_price(&self, product_code: &str) -> ClientResult<Value>;
}

/// Supplier catalog search by partial product name.
#[async_trait]
pub trait SupplierSearch: Send + Sync {
    /// Fetches candidate items of `supplier` whose name matches `name`.
    ///
    /// The body is expected to be an array of `{name, supplier_sku?, sku?}`.
    async fn find_products(&self, supplier: &str, name: &str) -> ClientResult<Value>;
}

//! Product lookup, stock check and add-to-cart over a [`StoreApi`] transport.

use crate::error::Result;
use crate::site::cart::CartForm;
use crate::site::client::StoreApi;
use crate::site::models::{
    normalize_sku, AddToCartOutcome, CartSubmissionResult, ProductRecord, StockStatus,
};
use crate::site::parser;
use tracing::{debug, info, warn};

/// Storefront operations bound to one session.
///
/// Nothing is cached: every call goes back to the site, so a stock result is
/// only a snapshot of the moment it was fetched.
pub struct Store<A: StoreApi> {
    api: A,
}

impl<A: StoreApi> Store<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// Returns the transport, typically to close the session.
    pub fn into_inner(self) -> A {
        self.api
    }

    /// Fetches and parses the full product record.
    pub async fn fetch_product(&mut self, sku: &str) -> Result<ProductRecord> {
        let sku = normalize_sku(sku);
        info!("Getting product info for {}", sku);

        let html = self.api.product_page(&sku).await?;
        parser::parse_product_page(&html, &sku)
    }

    /// Fetches the product page and extracts only the internal product ID.
    pub async fn fetch_internal_id(&mut self, sku: &str) -> Result<String> {
        let sku = normalize_sku(sku);
        info!("Getting PID for {}", sku);

        let html = self.api.product_page(&sku).await?;
        parser::parse_internal_id(&html, &sku)
    }

    /// Queries the stock-level endpoint for one SKU.
    pub async fn check_stock(&mut self, sku: &str) -> Result<StockStatus> {
        let sku = normalize_sku(sku);
        info!("Getting stock status for {}", sku);

        let body = self.api.stock_level(&sku).await?;
        parser::parse_stock_level(&body, &sku)
    }

    /// Resolves the internal ID, checks stock and posts the cart form when available.
    ///
    /// An out-of-stock SKU short-circuits without any POST. A non-2xx answer
    /// is reported in the result, never retried.
    pub async fn add_to_cart(&mut self, sku: &str) -> Result<AddToCartOutcome> {
        let sku = normalize_sku(sku);

        let internal_id = self.fetch_internal_id(&sku).await?;
        debug!("{} resolved to internal id {}", sku, internal_id);

        let stock = self.check_stock(&sku).await?;
        if !stock.in_stock {
            info!("{} is NOT available, skipping cart submission", sku);
            return Ok(AddToCartOutcome::OutOfStock { sku });
        }

        info!("{} is available, attempting to add to cart", sku);

        let form = CartForm::new(sku.as_str(), internal_id.as_str(), self.api.region().locale);
        let status = self.api.submit_cart(&form).await?;
        let result = CartSubmissionResult::from_status(status);

        if !result.succeeded {
            warn!("Cart submission for {} returned status {}", sku, status);
        }

        Ok(AddToCartOutcome::Submitted { sku, internal_id, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::site::testing::{MockStore, PRODUCT_PAGE};

    #[tokio::test]
    async fn test_fetch_product_normalizes_sku() {
        let mut store = Store::new(MockStore::in_stock("N64002"));

        let lower = store.fetch_product("n64002").await.unwrap();
        let upper = store.fetch_product("N64002").await.unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.sku, "N64002");
        assert_eq!(lower.internal_id, "nvprod470028v");
        assert_eq!(store.api().requested_skus, vec!["N64002", "N64002"]);
        // No caching between calls.
        assert_eq!(store.api().product_calls, 2);
    }

    #[tokio::test]
    async fn test_fetch_product_partial_page() {
        let mut api = MockStore::in_stock("N64002");
        api.product_html = PRODUCT_PAGE.replace("priceValue price-sheet", "priceValue");
        let mut store = Store::new(api);

        let err = store.fetch_product("N64002").await.unwrap_err();
        assert!(matches!(err, Error::ProductNotFound { field: "price", .. }));
    }

    #[tokio::test]
    async fn test_fetch_internal_id() {
        let mut store = Store::new(MockStore::in_stock("N64002"));
        assert_eq!(store.fetch_internal_id(" n64002 ").await.unwrap(), "nvprod470028v");
    }

    #[tokio::test]
    async fn test_check_stock() {
        let mut store = Store::new(MockStore::new(r#"{"SKU1": {"inStock": true}}"#));
        let status = store.check_stock("sku1").await.unwrap();
        assert_eq!(status, StockStatus { sku: "SKU1".into(), in_stock: true });
    }

    #[tokio::test]
    async fn test_check_stock_unknown_sku() {
        let mut store = Store::new(MockStore::new(r#"{"OTHER": {"inStock": true}}"#));
        let err = store.check_stock("SKU1").await.unwrap_err();
        assert!(matches!(err, Error::StockLookup { .. }));
    }

    #[tokio::test]
    async fn test_add_to_cart_out_of_stock_never_posts() {
        let mut store = Store::new(MockStore::out_of_stock("N64002"));

        let outcome = store.add_to_cart("n64002").await.unwrap();

        assert_eq!(outcome, AddToCartOutcome::OutOfStock { sku: "N64002".into() });
        assert!(store.api().submitted.is_empty());
        assert_eq!(store.api().product_calls, 1);
        assert_eq!(store.api().stock_calls, 1);
    }

    #[tokio::test]
    async fn test_add_to_cart_in_stock_posts_once() {
        let mut store = Store::new(MockStore::in_stock("N64002"));

        let outcome = store.add_to_cart("n64002").await.unwrap();

        assert!(outcome.succeeded());
        let api = store.api();
        assert_eq!(api.submitted.len(), 1);

        let form = &api.submitted[0];
        assert_eq!(form.sku(), "N64002");
        assert_eq!(form.product_id(), "nvprod470028v");
        assert_eq!(form.locale(), api.region.locale);
        assert!(form.success_url().contains("storeLang=eng-gb"));
        assert!(form.error_url().contains("storeLang=eng-gb"));
    }

    #[tokio::test]
    async fn test_add_to_cart_non_2xx_reported() {
        let mut api = MockStore::in_stock("N64002");
        api.cart_status = 500;
        let mut store = Store::new(api);

        let outcome = store.add_to_cart("N64002").await.unwrap();

        match outcome {
            AddToCartOutcome::Submitted { result, .. } => {
                assert_eq!(result.http_status, 500);
                assert!(!result.succeeded);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        // Single attempt, no retry.
        assert_eq!(store.api().submitted.len(), 1);
    }

    #[tokio::test]
    async fn test_add_to_cart_product_not_found_stops_early() {
        let mut api = MockStore::in_stock("N64002");
        api.product_html = "<html>gone</html>".to_string();
        let mut store = Store::new(api);

        let err = store.add_to_cart("N64002").await.unwrap_err();

        assert!(matches!(err, Error::ProductNotFound { .. }));
        assert_eq!(store.api().stock_calls, 0);
        assert!(store.api().submitted.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_stock_error_propagates() {
        let mut store = Store::new(MockStore::new("not json"));

        let err = store.add_to_cart("N64002").await.unwrap_err();

        assert!(matches!(err, Error::StockLookup { .. }));
        assert!(store.api().submitted.is_empty());
    }

    #[test]
    fn test_blocking_lookup() {
        let mut store = Store::new(MockStore::in_stock("A"));
        let id = tokio_test::block_on(store.fetch_internal_id("a")).unwrap();
        assert_eq!(id, "nvprod470028v");
    }
}

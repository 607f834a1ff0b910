//! Counting in-memory transport shared by unit tests.

use crate::error::Result;
use crate::site::cart::CartForm;
use crate::site::client::StoreApi;
use crate::site::regions::{Region, RegionConfig};
use async_trait::async_trait;

pub const PRODUCT_PAGE: &str = r#"
    <div id="informations" data-src-weibo="https://img.example/wallet.jpg">
        <h1 itemprop="name">Slender ID Wallet</h1>
        <table><tr><td class="priceValue price-sheet">£300.00</td></tr></table>
        <div id="productDescriptionSeeMore">Damier Graphite canvas.</div>
        <input id="addToWishListFormProductId" value="nvprod470028v">
    </div>
"#;

/// Counting mock transport.
pub struct MockStore {
    pub region: RegionConfig,
    pub product_html: String,
    pub stock_json: String,
    pub cart_status: u16,
    pub product_calls: u32,
    pub stock_calls: u32,
    pub submitted: Vec<CartForm>,
    pub requested_skus: Vec<String>,
}

impl MockStore {
    pub fn new(stock_json: &str) -> Self {
        Self {
            region: Region::Uk.config(),
            product_html: PRODUCT_PAGE.to_string(),
            stock_json: stock_json.to_string(),
            cart_status: 200,
            product_calls: 0,
            stock_calls: 0,
            submitted: Vec::new(),
            requested_skus: Vec::new(),
        }
    }

    pub fn in_stock(sku: &str) -> Self {
        Self::new(&format!(r#"{{"{}": {{"inStock": true}}}}"#, sku))
    }

    pub fn out_of_stock(sku: &str) -> Self {
        Self::new(&format!(r#"{{"{}": {{"inStock": false}}}}"#, sku))
    }
}

#[async_trait]
impl StoreApi for MockStore {
    fn region(&self) -> &RegionConfig {
        &self.region
    }

    async fn product_page(&mut self, sku: &str) -> Result<String> {
        self.product_calls += 1;
        self.requested_skus.push(sku.to_string());
        Ok(self.product_html.clone())
    }

    async fn stock_level(&mut self, sku: &str) -> Result<String> {
        self.stock_calls += 1;
        self.requested_skus.push(sku.to_string());
        Ok(self.stock_json.clone())
    }

    async fn submit_cart(&mut self, form: &CartForm) -> Result<u16> {
        self.submitted.push(form.clone());
        Ok(self.cart_status)
    }
}

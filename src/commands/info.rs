//! Product info command implementation.

use crate::config::Config;
use crate::error::Error;
use crate::format::Formatter;
use crate::site::models::normalize_sku;
use crate::site::{ProductRecord, StockStatus, Store, StoreApi};
use anyhow::{Context, Result};
use tracing::warn;

/// Product record (when the page had every field), its stock snapshot, and the rendered output.
#[derive(Debug, Clone)]
pub struct InfoReport {
    pub product: Option<ProductRecord>,
    pub stock: StockStatus,
    pub output: String,
}

impl InfoReport {
    /// True only for a product that was found and is in stock.
    pub fn available(&self) -> bool {
        self.product.is_some() && self.stock.in_stock
    }

    pub fn sku(&self) -> &str {
        &self.stock.sku
    }
}

/// Looks up a product and its availability.
pub struct InfoCommand {
    config: Config,
}

impl InfoCommand {
    /// Creates a new info command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the product page and the stock level for `sku`.
    ///
    /// A page missing required fields still gets a stock check; the report
    /// then carries no product. Any other failure aborts the command.
    pub async fn execute<A: StoreApi>(&self, store: &mut Store<A>, sku: &str) -> Result<InfoReport> {
        let sku = normalize_sku(sku);

        let product = match store.fetch_product(&sku).await {
            Ok(product) => Ok(product),
            Err(e @ Error::ProductNotFound { .. }) => {
                warn!("{}", e);
                Err(e)
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to get product info for {}", sku)))
            }
        };

        let stock = store
            .check_stock(&sku)
            .await
            .with_context(|| format!("Failed to get stock status for {}", sku))?;

        let formatter = Formatter::new(self.config.format);
        let (product, output) = match product {
            Ok(product) => {
                let output = formatter.format_product(&product, stock.in_stock);
                (Some(product), output)
            }
            Err(e) => (None, format!("{}\n{}", e, formatter.format_stock(&stock))),
        };

        Ok(InfoReport { product, stock, output })
    }
}

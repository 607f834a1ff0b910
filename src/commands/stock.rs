//! Stock check command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::site::{Store, StoreApi};
use anyhow::{Context, Result};

pub struct StockCommand {
    config: Config,
}

impl StockCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Queries availability for `sku` and returns formatted output.
    pub async fn execute<A: StoreApi>(&self, store: &mut Store<A>, sku: &str) -> Result<String> {
        let stock = store
            .check_stock(sku)
            .await
            .with_context(|| format!("Failed to get stock status for {}", sku.trim()))?;

        Ok(Formatter::new(self.config.format).format_stock(&stock))
    }
}

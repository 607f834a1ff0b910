//! Add-to-cart command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::site::{AddToCartOutcome, Store, StoreApi};
use anyhow::{Context, Result};

/// Runs the add-to-cart flow for one SKU.
pub struct CartCommand {
    config: Config,
}

impl CartCommand {
    /// Creates a new cart command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Adds `sku` to the cart, returning the outcome and its formatted output.
    ///
    /// An out-of-stock SKU and a rejected submission are both `Ok` here; use
    /// [`CartCommand::ensure_submitted`] to turn a rejection into an error.
    pub async fn execute<A: StoreApi>(
        &self,
        store: &mut Store<A>,
        sku: &str,
    ) -> Result<(AddToCartOutcome, String)> {
        let outcome = store
            .add_to_cart(sku)
            .await
            .with_context(|| format!("Failed to add {} to cart", sku.trim()))?;

        let output = Formatter::new(self.config.format).format_outcome(&outcome);
        Ok((outcome, output))
    }

    /// Fails when the form was posted but the server did not answer 2xx.
    pub fn ensure_submitted(outcome: &AddToCartOutcome) -> crate::Result<()> {
        match outcome {
            AddToCartOutcome::Submitted { result, .. } => result.into_result().map(|_| ()),
            AddToCartOutcome::OutOfStock { .. } => Ok(()),
        }
    }
}

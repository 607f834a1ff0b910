//! Data models for products, stock and cart submissions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Normalizes a user-supplied SKU (trimmed, upper case).
pub fn normalize_sku(sku: &str) -> String {
    sku.trim().to_ascii_uppercase()
}

/// Product metadata scraped from the product detail endpoint.
///
/// Every field is required; a page missing any of them yields
/// [`Error::ProductNotFound`] instead of a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Normalized SKU
    pub sku: String,
    /// Internal catalog ID required by the cart form handler
    pub internal_id: String,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Displayed price, as rendered by the storefront
    pub price: String,
    /// Product image URL
    pub image_url: String,
}

/// Point-in-time stock snapshot for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    pub sku: String,
    pub in_stock: bool,
}

/// Outcome of a single cart POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSubmissionResult {
    pub http_status: u16,
    pub succeeded: bool,
}

impl CartSubmissionResult {
    /// Builds a result from an HTTP status; only 2xx counts as success.
    pub fn from_status(http_status: u16) -> Self {
        Self { http_status, succeeded: (200..300).contains(&http_status) }
    }

    /// Converts a failed submission into [`Error::SubmissionFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.succeeded {
            Ok(self)
        } else {
            Err(Error::SubmissionFailed { status: self.http_status })
        }
    }
}

/// Result of the add-to-cart flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddToCartOutcome {
    /// The form was posted; the server's verdict is in the result.
    Submitted { sku: String, internal_id: String, result: CartSubmissionResult },
    /// Stock check reported the SKU unavailable, nothing was posted.
    OutOfStock { sku: String },
}

impl AddToCartOutcome {
    /// Returns true only for a 2xx submission.
    pub fn succeeded(&self) -> bool {
        matches!(self, AddToCartOutcome::Submitted { result, .. } if result.succeeded)
    }
}

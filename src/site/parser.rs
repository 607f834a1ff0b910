//! Parsers for the product detail fragment and the stock-level JSON.
//!
//! One entry point per endpoint: [`parse_product_page`] and its projection
//! [`parse_internal_id`] for `/ajax/product.jsp`, [`parse_stock_level`] for
//! `/ajaxsecure/getStockLevel.jsp`.

use crate::error::{Error, Result};
use crate::site::models::{ProductRecord, StockStatus};
use crate::site::selectors;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, trace};

/// Parses the full product record. Any missing field fails the whole record.
pub fn parse_product_page(html: &str, sku: &str) -> Result<ProductRecord> {
    let document = Html::parse_document(html);

    let missing = |field: &'static str| Error::ProductNotFound { sku: sku.to_string(), field };

    let name = select_text(&document, &selectors::NAME).ok_or_else(|| missing("name"))?;
    let description =
        select_text(&document, &selectors::DESCRIPTION).ok_or_else(|| missing("description"))?;
    let price = select_text(&document, &selectors::PRICE).ok_or_else(|| missing("price"))?;

    let image_url = document
        .select(&selectors::INFORMATIONS)
        .next()
        .and_then(|e| e.value().attr(selectors::IMAGE_ATTR))
        .map(|src| src.trim().replace(' ', "%20"))
        .ok_or_else(|| missing("image"))?;

    let internal_id = internal_id(&document).ok_or_else(|| missing("internal id"))?;

    trace!("Parsed product {} ({}): {}", sku, internal_id, name);

    Ok(ProductRecord {
        sku: sku.to_string(),
        internal_id,
        name,
        description,
        price,
        image_url,
    })
}

/// Extracts only the internal product ID from the product fragment.
pub fn parse_internal_id(html: &str, sku: &str) -> Result<String> {
    let document = Html::parse_document(html);

    internal_id(&document)
        .ok_or_else(|| Error::ProductNotFound { sku: sku.to_string(), field: "internal id" })
}

/// Parses the stock-level payload `{"SKU": {"inStock": ..}}` for one SKU.
pub fn parse_stock_level(body: &str, sku: &str) -> Result<StockStatus> {
    let fail = |reason: String| Error::StockLookup { sku: sku.to_string(), reason };

    let payload: Value =
        serde_json::from_str(body.trim()).map_err(|e| fail(format!("invalid JSON: {}", e)))?;

    let map = payload.as_object().ok_or_else(|| fail("response is not a JSON object".into()))?;

    let entry = map.get(sku).ok_or_else(|| {
        debug!("Stock response keys: {:?}", map.keys().collect::<Vec<_>>());
        fail("SKU missing from stock response".into())
    })?;

    let raw = entry
        .as_object()
        .ok_or_else(|| fail("stock entry is not an object".into()))?
        .get("inStock")
        .ok_or_else(|| fail("stock entry has no inStock field".into()))?;

    let in_stock =
        coerce_flag(raw).ok_or_else(|| fail(format!("unrecognized inStock value: {}", raw)))?;

    Ok(StockStatus { sku: sku.to_string(), in_stock })
}

/// Coerces the `inStock` value to a strict boolean.
fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

fn internal_id(document: &Html) -> Option<String> {
    document
        .select(&selectors::PRODUCT_ID)
        .next()
        .and_then(|e| e.value().attr("value"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(|e| e.text().collect::<String>().trim().to_string())
}

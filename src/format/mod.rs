//! Output formatting for lookups and cart results (table, JSON, markdown).

use crate::config::OutputFormat;
use crate::site::{AddToCartOutcome, ProductRecord, Region, StockStatus};
use serde::Serialize;

/// Product record plus the stock snapshot taken alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct ProductReport<'a> {
    #[serde(flatten)]
    pub product: &'a ProductRecord,
    pub available: bool,
}

/// Formats core results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a product record with its availability.
    pub fn format_product(&self, product: &ProductRecord, available: bool) -> String {
        match self.format {
            OutputFormat::Json => json(&ProductReport { product, available }),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                lines.push("Product Info:".to_string());
                lines.push("-".repeat(40));
                lines.push(format!("SKU:         {}", product.sku));
                lines.push(format!("PID:         {}", product.internal_id));
                lines.push(format!("Name:        {}", product.name));
                lines.push(format!("Price:       {}", product.price));
                lines.push(format!("Description: {}", product.description));
                lines.push(format!("Image URL:   {}", product.image_url));
                lines.push(format!("Available:   {}", yes_no(available)));
                lines.push("-".repeat(40));
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut out = format!("## {}\n\n", product.name);
                out.push_str("| Field | Value |\n|---|---|\n");
                out.push_str(&format!("| SKU | {} |\n", product.sku));
                out.push_str(&format!("| PID | {} |\n", product.internal_id));
                out.push_str(&format!("| Price | {} |\n", product.price));
                out.push_str(&format!("| Available | {} |\n", yes_no(available)));
                out.push_str(&format!("\n{}\n\n![{}]({})\n", product.description, product.sku, product.image_url));
                out
            }
        }
    }

    /// Formats a stock snapshot.
    pub fn format_stock(&self, stock: &StockStatus) -> String {
        match self.format {
            OutputFormat::Json => json(stock),
            OutputFormat::Table => {
                format!("{}: {}", stock.sku, if stock.in_stock { "in stock" } else { "out of stock" })
            }
            OutputFormat::Markdown => {
                format!("| SKU | In stock |\n|---|---|\n| {} | {} |\n", stock.sku, yes_no(stock.in_stock))
            }
        }
    }

    /// Formats the outcome of an add-to-cart attempt.
    pub fn format_outcome(&self, outcome: &AddToCartOutcome) -> String {
        if self.format == OutputFormat::Json {
            return json(outcome);
        }

        let line = match outcome {
            AddToCartOutcome::OutOfStock { sku } => format!("{} is NOT available.", sku),
            AddToCartOutcome::Submitted { sku, internal_id, result } if result.succeeded => {
                format!("ATC success: {} ({}), status code {}", sku, internal_id, result.http_status)
            }
            AddToCartOutcome::Submitted { sku, internal_id, result } => {
                format!("ATC failed: {} ({}), status code {}", sku, internal_id, result.http_status)
            }
        };

        match self.format {
            OutputFormat::Markdown => format!("**{}**", line),
            _ => line,
        }
    }

    /// Formats the supported region table.
    pub fn format_regions(&self, regions: &[Region]) -> String {
        match self.format {
            OutputFormat::Json => {
                let configs: Vec<_> = regions.iter().map(|r| r.config()).collect();
                json(&configs)
            }
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("{:<6} {:<22} {:<8}", "Code", "Host", "Locale"),
                    format!("{:-<6} {:-<22} {:-<8}", "", "", ""),
                ];
                lines.extend(regions.iter().map(|r| {
                    format!("{:<6} {:<22} {:<8}", r.to_string(), r.host(), r.locale())
                }));
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut out = String::from("| Code | Host | Locale |\n|---|---|---|\n");
                for r in regions {
                    out.push_str(&format!("| {} | {} | {} |\n", r, r.host(), r.locale()));
                }
                out
            }
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

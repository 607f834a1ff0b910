//! lv-cart - Louis Vuitton storefront session, product lookup and add-to-cart.
//!
//! A region-bound session carries the storefront cookies across product
//! lookups, stock checks and the ATG cart form submission.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod site;

pub use config::Config;
pub use error::{Error, Result};
pub use site::models::{AddToCartOutcome, CartSubmissionResult, ProductRecord, StockStatus};
pub use site::regions::{Region, RegionConfig};
pub use site::{Session, Store, StoreApi};

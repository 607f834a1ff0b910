//! Storefront session, lookups and cart submission.

pub mod acquire;
#[cfg(feature = "browser")]
pub mod browser;
pub mod cart;
pub mod client;
pub mod models;
pub mod parser;
pub mod regions;
pub mod selectors;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use acquire::{acquirer_for, DirectAcquirer, SessionAcquirer};
#[cfg(feature = "browser")]
pub use acquire::BrowserAcquirer;
pub use cart::CartForm;
pub use client::{Session, StoreApi};
pub use models::{AddToCartOutcome, CartSubmissionResult, ProductRecord, StockStatus};
pub use regions::{Region, RegionConfig};
pub use store::Store;

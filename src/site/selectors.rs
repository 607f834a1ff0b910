//! CSS selectors for the product detail fragment.
//!
//! All markup-dependent lookups live here so that a storefront redesign is
//! fixed in one place. When parsing starts failing, capture the
//! `/ajax/product.jsp` response, update the selectors and add a fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Product name heading.
pub static NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1[itemprop='name']").unwrap());

/// Description container.
pub static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#productDescriptionSeeMore").unwrap());

/// Price cell.
pub static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.priceValue.price-sheet").unwrap());

/// Container carrying the share image as an attribute.
pub static INFORMATIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#informations").unwrap());

/// Image URL attribute on [`INFORMATIONS`].
pub static IMAGE_ATTR: &str = "data-src-weibo";

/// Hidden wishlist input whose value is the internal product ID.
pub static PRODUCT_ID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input#addToWishListFormProductId").unwrap());

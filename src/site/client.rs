//! Cookie-bearing HTTP session bound to one regional storefront.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::site::cart::{CartForm, USER_AGENT};
use crate::site::regions::{RegionConfig, COOKIE_DOMAIN};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use wreq::cookie::Jar;
use wreq::redirect::Policy;
use wreq::Client;

#[cfg(feature = "browser")]
use crate::site::browser::BrowserHandle;

/// Raw storefront endpoints - enables mocking the transport in tests.
///
/// Methods take `&mut self`: responses update the session's cookie jar, so
/// calls against one session are serialized by construction.
#[async_trait]
pub trait StoreApi: Send {
    /// Returns the region this transport is bound to.
    fn region(&self) -> &RegionConfig;

    /// Fetches the product detail fragment for a normalized SKU.
    async fn product_page(&mut self, sku: &str) -> Result<String>;

    /// Fetches the stock-level JSON for a normalized SKU.
    async fn stock_level(&mut self, sku: &str) -> Result<String>;

    /// Posts the add-to-cart form and returns the HTTP status.
    async fn submit_cart(&mut self, form: &CartForm) -> Result<u16>;
}

/// HTTP session for one region, owned by the caller for the whole run.
pub struct Session {
    client: Client,
    region: RegionConfig,
    base_url: String,
    secure_url: String,
    cookies: Arc<Jar>,
    #[cfg(feature = "browser")]
    browser: Option<BrowserHandle>,
}

impl Session {
    /// Creates an empty session against the region's production hosts.
    pub fn new(region: RegionConfig, config: &Config) -> Result<Self> {
        Self::with_endpoints(region, region.base_url(), region.secure_url(), config)
    }

    /// Creates an empty session with custom storefront and checkout URLs (for testing).
    pub fn with_endpoints(
        region: RegionConfig,
        base_url: impl Into<String>,
        secure_url: impl Into<String>,
        config: &Config,
    ) -> Result<Self> {
        let cookies = Arc::new(Jar::default());

        let mut builder = Client::builder()
            .cookie_provider(cookies.clone())
            .redirect(Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("invalid proxy '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            region,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secure_url: secure_url.into().trim_end_matches('/').to_string(),
            cookies,
            #[cfg(feature = "browser")]
            browser: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn secure_url(&self) -> &str {
        &self.secure_url
    }

    pub fn locale(&self) -> &'static str {
        self.region.locale
    }

    /// The jar shared with the HTTP client.
    pub fn cookies(&self) -> &Jar {
        &self.cookies
    }

    /// Value of a cookie the session would send to the storefront or the checkout host.
    pub fn cookie(&self, name: &str) -> Option<String> {
        [self.base_url.as_str(), self.secure_url.as_str()].into_iter().find_map(|url| {
            self.cookies
                .matches(format!("{}/", url))
                .find(|c| c.name() == name)
                .map(|c| c.value().to_string())
        })
    }

    /// Stores a cookie obtained outside the HTTP client (e.g. from a browser).
    ///
    /// On the production hosts the cookie is scoped to the parent domain so it
    /// also reaches the checkout host.
    pub fn add_cookie(&self, name: &str, value: &str) {
        let base = format!("{}/", self.base_url);
        let scoped = self
            .base_url
            .split("://")
            .nth(1)
            .is_some_and(|host| host.ends_with(COOKIE_DOMAIN));

        let cookie = if scoped {
            format!("{}={}; Domain={}; Path=/", name, value, COOKIE_DOMAIN)
        } else {
            format!("{}={}; Path=/", name, value)
        };
        self.cookies.add(cookie.as_str(), base.as_str());
    }

    /// Product detail fragment URL.
    pub fn product_url(&self, sku: &str) -> String {
        format!(
            "{}/ajax/product.jsp?storeLang={}&pageType=product&id={}",
            self.base_url,
            self.locale(),
            urlencoding::encode(sku)
        )
    }

    /// Stock-level endpoint URL.
    pub fn stock_url(&self, sku: &str) -> String {
        format!(
            "{}/ajaxsecure/getStockLevel.jsp?storeLang={}&pageType=product&skuIdList={}",
            self.secure_url,
            self.locale(),
            urlencoding::encode(sku)
        )
    }

    /// Cart form handler URL.
    pub fn cart_url(&self) -> String {
        format!("{}/ajaxsecure/addToCartForm?storeLang={}", self.secure_url, self.locale())
    }

    /// Human-facing cart page.
    pub fn cart_page_url(&self) -> String {
        format!("{}/{}/cart", self.base_url, self.locale())
    }

    /// Referer sent with the cart POST.
    pub fn referer(&self, sku: &str) -> String {
        format!("{}/{}/products/{}", self.base_url, self.locale(), sku.to_lowercase())
    }

    /// Hits the storefront home page so the server can issue session cookies.
    pub async fn bootstrap(&mut self) -> Result<()> {
        let url = format!("{}/", self.base_url);
        info!("Opening session on {}", self.base_url);
        self.get(&url).await?;
        debug!("Session holds {} cookies", self.cookies.len());
        Ok(())
    }

    /// Performs a GET with the session cookies and fails on non-2xx.
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let request = self
            .client
            .get(url)
            .header("Accept", "text/html,application/json,application/xhtml+xml,*/*;q=0.8")
            .header("Accept-Language", self.region.code.accept_language())
            .header("User-Agent", USER_AGENT)
            .header("X-Requested-With", "XMLHttpRequest");

        let response = request.send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::Http { status: status.as_u16(), url: url.to_string() });
        }

        Ok(response.text().await?)
    }

    /// Attaches a launched browser whose lifetime now follows the session.
    #[cfg(feature = "browser")]
    pub(crate) fn attach_browser(&mut self, browser: BrowserHandle) {
        self.browser = Some(browser);
    }

    /// Returns true when the session was acquired through a browser still held open.
    pub fn has_browser(&self) -> bool {
        #[cfg(feature = "browser")]
        {
            self.browser.is_some()
        }
        #[cfg(not(feature = "browser"))]
        {
            false
        }
    }

    /// Shows the cart page in the held browser. No-op for direct sessions.
    pub async fn show_cart(&mut self) -> Result<()> {
        #[cfg(feature = "browser")]
        {
            let url = self.cart_page_url();
            if let Some(browser) = self.browser.as_mut() {
                info!("Showing cart in browser: {}", url);
                browser.navigate(&url).await?;
            }
        }
        Ok(())
    }

    /// Releases the session, closing the browser process if one is held.
    #[cfg_attr(not(feature = "browser"), allow(unused_mut))]
    pub async fn close(mut self) -> Result<()> {
        #[cfg(feature = "browser")]
        if let Some(mut browser) = self.browser.take() {
            browser.close().await?;
        }
        debug!("Session for {} closed", self.region.code);
        Ok(())
    }
}

#[async_trait]
impl StoreApi for Session {
    fn region(&self) -> &RegionConfig {
        &self.region
    }

    async fn product_page(&mut self, sku: &str) -> Result<String> {
        let url = self.product_url(sku);

        info!("Fetching product: {}", sku);
        self.get(&url).await
    }

    async fn stock_level(&mut self, sku: &str) -> Result<String> {
        let url = self.stock_url(sku);

        info!("Checking stock: {}", sku);
        self.get(&url).await
    }

    async fn submit_cart(&mut self, form: &CartForm) -> Result<u16> {
        let url = self.cart_url();
        debug!("POST {}", url);

        let request = self
            .client
            .post(url.as_str())
            .header("Origin", self.base_url.as_str())
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Accept-Language", self.region.code.accept_language())
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .header("Accept", "*/*")
            .header("Referer", self.referer(form.sku()))
            .header("Connection", "keep-alive")
            .body(form.encode());

        info!("Submitting cart form for {} ({})", form.sku(), form.product_id());
        let response = request.send().await?;

        let status = response.status().as_u16();
        debug!("Cart response status: {}", status);
        Ok(status)
    }
}

//! Session acquisition strategies.
//!
//! Both strategies yield the same artifact: a [`Session`] bound to the
//! region's storefront whose cookie jar already carries the identity cookies.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::site::client::Session;
use crate::site::regions::RegionConfig;
use async_trait::async_trait;
use tracing::info;

/// Establishes a cookie-bearing session for a region.
#[async_trait]
pub trait SessionAcquirer: Send + Sync {
    async fn acquire(&self, region: &RegionConfig) -> Result<Session>;
}

/// Issues a single GET to the storefront and keeps the `Set-Cookie` results.
pub struct DirectAcquirer {
    config: Config,
    endpoints: Option<(String, String)>,
}

impl DirectAcquirer {
    pub fn new(config: Config) -> Self {
        Self { config, endpoints: None }
    }

    /// Targets custom storefront and checkout URLs (for testing).
    pub fn with_endpoints(
        config: Config,
        base_url: impl Into<String>,
        secure_url: impl Into<String>,
    ) -> Self {
        Self { config, endpoints: Some((base_url.into(), secure_url.into())) }
    }
}

#[async_trait]
impl SessionAcquirer for DirectAcquirer {
    async fn acquire(&self, region: &RegionConfig) -> Result<Session> {
        let mut session = match &self.endpoints {
            Some((base, secure)) => {
                Session::with_endpoints(*region, base.as_str(), secure.as_str(), &self.config)?
            }
            None => Session::new(*region, &self.config)?,
        };

        session.bootstrap().await.map_err(|e| Error::SessionAcquisition(e.to_string()))?;

        info!("Session ready for {} ({} cookies)", region.code, session.cookies().len());
        Ok(session)
    }
}

/// Loads the storefront in Chromium and copies its cookies into the session.
///
/// The browser stays open inside the session until [`Session::close`].
#[cfg(feature = "browser")]
pub struct BrowserAcquirer {
    config: Config,
}

#[cfg(feature = "browser")]
impl BrowserAcquirer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl SessionAcquirer for BrowserAcquirer {
    async fn acquire(&self, region: &RegionConfig) -> Result<Session> {
        use crate::site::browser::BrowserHandle;

        let mut session = Session::new(*region, &self.config)?;
        let mut browser = BrowserHandle::launch(self.config.headless).await?;

        let cookies = match load_cookies(&mut browser, session.base_url()).await {
            Ok(cookies) => cookies,
            Err(e) => {
                browser.close().await?;
                return Err(e);
            }
        };

        for (name, value) in cookies {
            session.add_cookie(&name, &value);
        }
        session.attach_browser(browser);

        info!("Browser session ready for {} ({} cookies)", region.code, session.cookies().len());
        Ok(session)
    }
}

#[cfg(feature = "browser")]
async fn load_cookies(
    browser: &mut crate::site::browser::BrowserHandle,
    base_url: &str,
) -> Result<Vec<(String, String)>> {
    browser.navigate(base_url).await?;
    browser.cookies().await
}

/// Picks the acquisition strategy from `Config::use_browser`.
pub fn acquirer_for(config: &Config) -> Result<Box<dyn SessionAcquirer>> {
    if config.use_browser {
        #[cfg(feature = "browser")]
        return Ok(Box::new(BrowserAcquirer::new(config.clone())));

        #[cfg(not(feature = "browser"))]
        return Err(Error::SessionAcquisition(
            "built without browser support (enable the `browser` feature)".into(),
        ));
    }

    Ok(Box::new(DirectAcquirer::new(config.clone())))
}

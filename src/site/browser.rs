//! Chromium instance driven over CDP (feature `browser`).

use crate::error::{Error, Result};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A launched browser with one page, held for the lifetime of a session.
pub struct BrowserHandle {
    browser: Browser,
    page: Option<Page>,
    handler: JoinHandle<()>,
}

impl BrowserHandle {
    /// Launches Chromium. `headless = false` shows the window so the cart can be inspected.
    pub async fn launch(headless: bool) -> Result<Self> {
        let builder = BrowserConfig::builder().viewport(None);
        let builder = if headless { builder } else { builder.with_head() };

        let config = builder.build().map_err(|e| {
            Error::SessionAcquisition(format!("failed to build browser config: {}", e))
        })?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::SessionAcquisition(format!("failed to launch browser: {}", e)))?;

        // The CDP handler must be polled for the browser to make progress.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        Ok(Self { browser, page: None, handler })
    }

    /// Navigates to `url`, opening the page on first use.
    pub async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!("Browser navigating to {}", url);

        match &self.page {
            Some(page) => {
                page.goto(url).await.map_err(navigation_error)?;
            }
            None => {
                let page = self.browser.new_page(url).await.map_err(navigation_error)?;
                page.wait_for_navigation().await.map_err(navigation_error)?;
                self.page = Some(page);
            }
        }

        Ok(())
    }

    /// Returns every cookie visible to the current page as (name, value).
    pub async fn cookies(&self) -> Result<Vec<(String, String)>> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| Error::SessionAcquisition("browser has no open page".into()))?;

        let cookies = page.get_cookies().await.map_err(|e| {
            Error::SessionAcquisition(format!("failed to read browser cookies: {}", e))
        })?;

        Ok(cookies.into_iter().map(|c| (c.name, c.value)).collect())
    }

    /// Closes the browser process and stops the handler task.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(page) = self.page.take() {
            let _ = page.close().await;
        }

        if let Err(e) = self.browser.close().await {
            warn!("Browser did not close cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed waiting for browser exit: {}", e);
        }

        self.handler.abort();
        debug!("Browser closed");
        Ok(())
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        // The child process itself is killed when `Browser` drops.
        self.handler.abort();
    }
}

fn navigation_error(e: chromiumoxide::error::CdpError) -> Error {
    Error::SessionAcquisition(format!("browser navigation failed: {}", e))
}

//! CLI command implementations.

pub mod cart;
pub mod info;
pub mod interactive;
pub mod stock;

pub use cart::CartCommand;
pub use info::{InfoCommand, InfoReport};
pub use interactive::{Action, InteractiveCommand, Prompter};
pub use stock::StockCommand;

use crate::config::Config;
use crate::site::{acquirer_for, Session};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::warn;

/// Acquires a session for the configured region with the configured strategy.
pub async fn open_session(config: &Config) -> Result<Session> {
    let region = config.region.config();
    let acquirer = acquirer_for(config)?;

    acquirer
        .acquire(&region)
        .await
        .with_context(|| format!("Failed to open a session for region {}", region.code))
}

/// Releases a session, optionally showing the cart in the browser first.
///
/// The session is closed even when showing the cart fails.
pub async fn close_session<R: BufRead, W: Write>(
    mut session: Session,
    show_cart: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if show_cart && session.has_browser() {
        match session.show_cart().await {
            Ok(()) => {
                if let Err(e) = prompter.wait_for_enter("Press Enter to close the browser...") {
                    warn!("Could not wait for confirmation: {}", e);
                }
            }
            Err(e) => warn!("Could not show the cart: {}", e),
        }
    }

    session.close().await.context("Failed to close session")
}

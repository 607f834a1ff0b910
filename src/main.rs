//! lv-cart - Louis Vuitton product lookup and add-to-cart CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use lv_cart::commands::{
    close_session, open_session, CartCommand, InfoCommand, InteractiveCommand, Prompter,
    StockCommand,
};
use lv_cart::config::{Config, OutputFormat};
use lv_cart::format::Formatter;
use lv_cart::{Region, Store};
use std::io::{self, StdinLock, Stdout};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lv-cart",
    version,
    about = "Louis Vuitton product lookup and add-to-cart CLI",
    long_about = "Looks up products, checks stock and adds items to the cart on the regional \
                  Louis Vuitton storefronts. Runs interactively when no command is given."
)]
struct Cli {
    /// Storefront region (us, uk, au, hk, eu, kr, jp)
    #[arg(short, long, global = true, env = "LV_REGION")]
    region: Option<Region>,

    /// Acquire the session through a Chromium browser
    #[arg(long, global = true, env = "LV_BROWSER")]
    browser: bool,

    /// Run the browser without a window
    #[arg(long, global = true)]
    headless: bool,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "LV_PROXY")]
    proxy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "LV_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show product details and availability
    #[command(alias = "i")]
    Info {
        /// Product SKU
        sku: String,
    },

    /// Check availability only
    #[command(alias = "s")]
    Stock {
        /// Product SKU
        sku: String,
    },

    /// Add a product to the cart
    #[command(alias = "a")]
    Atc {
        /// Product SKU
        sku: String,
    },

    /// List supported regions
    Regions,
}

type StdPrompter = Prompter<StdinLock<'static>, Stdout>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    config.use_browser |= cli.browser;
    config.headless |= cli.headless;

    let mut prompter: StdPrompter = Prompter::new(io::stdin().lock(), io::stdout());

    match cli.command {
        None => InteractiveCommand::new(config).execute(&mut prompter).await?,

        Some(Commands::Regions) => {
            println!("{}", Formatter::new(config.format).format_regions(Region::all()));
        }

        Some(Commands::Info { sku }) => {
            let mut store = Store::new(open_session(&config).await?);
            let result = InfoCommand::new(config).execute(&mut store, &sku).await;
            close_session(store.into_inner(), false, &mut prompter).await?;

            let report = result?;
            println!("{}", report.output);
            if report.product.is_none() {
                anyhow::bail!("Product {} couldn't be found", report.sku());
            }
        }

        Some(Commands::Stock { sku }) => {
            let mut store = Store::new(open_session(&config).await?);
            let result = StockCommand::new(config).execute(&mut store, &sku).await;
            close_session(store.into_inner(), false, &mut prompter).await?;

            println!("{}", result?);
        }

        Some(Commands::Atc { sku }) => {
            let mut store = Store::new(open_session(&config).await?);
            let result = CartCommand::new(config).execute(&mut store, &sku).await;

            if let Ok((_, output)) = &result {
                println!("{}", output);
            }
            let show_cart = matches!(&result, Ok((outcome, _)) if outcome.succeeded());
            close_session(store.into_inner(), show_cart, &mut prompter).await?;

            let (outcome, _) = result?;
            CartCommand::ensure_submitted(&outcome)?;
        }
    }

    Ok(())
}

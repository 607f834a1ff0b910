//! Prompt-driven mode used when no subcommand is given.

use crate::commands::{close_session, open_session, CartCommand, InfoCommand};
use crate::config::{parse_flag, Config};
use crate::site::{AddToCartOutcome, Region, Store, StoreApi};
use anyhow::{bail, Result};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// What the user wants done with the SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddToCart,
    Info,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atc" => Ok(Action::AddToCart),
            "info" => Ok(Action::Info),
            _ => Err(format!("Unknown action: {}. Use: ATC, INFO", s.trim())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddToCart => write!(f, "ATC"),
            Action::Info => write!(f, "INFO"),
        }
    }
}

/// Line-based question/answer over any reader and writer.
///
/// Invalid answers are reported and asked again; a closed input is an error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints a line of output.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(msg) => self.say(&msg)?,
            }
        }
    }

    /// Asks a yes/no question.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        self.ask_until(question, |a| parse_flag(a).ok_or_else(|| "Please answer Y or N".to_string()))
    }

    /// Asks whether to use the browser; an empty answer keeps `default`.
    pub fn ask_browser(&mut self, default: bool) -> Result<bool> {
        let question = format!("Use browser? (Y/N) [{}]: ", if default { "Y" } else { "N" });
        self.ask_until(&question, |a| {
            if a.is_empty() {
                return Ok(default);
            }
            parse_flag(a).ok_or_else(|| "Please answer Y or N".to_string())
        })
    }

    /// Asks for a region code; an empty answer keeps `default`.
    pub fn ask_region(&mut self, default: Region) -> Result<Region> {
        let codes: Vec<String> = Region::all().iter().map(|r| r.to_string().to_uppercase()).collect();
        let question = format!("Region ({}) [{}]: ", codes.join("|"), default.to_string().to_uppercase());
        self.ask_until(&question, |a| {
            if a.is_empty() {
                return Ok(default);
            }
            a.parse::<Region>().map_err(|e| e.to_string())
        })
    }

    pub fn ask_action(&mut self) -> Result<Action> {
        self.ask_until("Action (ATC|INFO): ", |a| a.parse())
    }

    pub fn ask_sku(&mut self) -> Result<String> {
        self.ask_until("SKU: ", |a| {
            if a.is_empty() {
                Err("SKU cannot be empty".to_string())
            } else {
                Ok(a.to_string())
            }
        })
    }

    /// Blocks until the user presses Enter (or input closes).
    pub fn wait_for_enter(&mut self, message: &str) -> Result<()> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }
}

/// Answers collected before a session is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub use_browser: bool,
    pub region: Region,
    pub action: Action,
    pub sku: String,
}

impl Request {
    /// Asks browser, region, action and SKU, in that order.
    ///
    /// The configured browser mode and region (file, `LV_*` env or flags) are
    /// offered as defaults.
    pub fn gather<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
        config: &Config,
    ) -> Result<Self> {
        let use_browser = prompter.ask_browser(config.use_browser)?;
        let region = prompter.ask_region(config.region)?;
        let action = prompter.ask_action()?;
        let sku = prompter.ask_sku()?;

        Ok(Self { use_browser, region, action, sku })
    }
}

/// Runs one interactive lookup or add-to-cart.
pub struct InteractiveCommand {
    config: Config,
}

impl InteractiveCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Prompts, opens a session for the answers, runs the action and closes the session.
    pub async fn execute<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<()> {
        let request = Request::gather(prompter, &self.config)?;

        let mut config = self.config.clone();
        config.use_browser = request.use_browser;
        config.region = request.region;

        let mut store = Store::new(open_session(&config).await?);
        let result = self.execute_with_store(&mut store, prompter, &request).await;

        let show_cart = matches!(&result, Ok(Some(outcome)) if outcome.succeeded());
        close_session(store.into_inner(), show_cart, prompter).await?;

        if let Some(outcome) = result? {
            CartCommand::ensure_submitted(&outcome)?;
        }
        Ok(())
    }

    /// Runs the requested action against an open store.
    ///
    /// Returns the cart outcome when an add-to-cart was attempted.
    pub async fn execute_with_store<A: StoreApi, R: BufRead, W: Write>(
        &self,
        store: &mut Store<A>,
        prompter: &mut Prompter<R, W>,
        request: &Request,
    ) -> Result<Option<AddToCartOutcome>> {
        let cart = CartCommand::new(self.config.clone());

        match request.action {
            Action::AddToCart => {
                let (outcome, output) = cart.execute(store, &request.sku).await?;
                prompter.say(&output)?;
                Ok(Some(outcome))
            }
            Action::Info => {
                let report = InfoCommand::new(self.config.clone()).execute(store, &request.sku).await?;
                prompter.say(&report.output)?;

                if report.product.is_none() {
                    return Ok(None);
                }
                if !report.available() {
                    prompter.say(&format!("{} is NOT available.", report.sku()))?;
                    return Ok(None);
                }

                if !prompter.confirm("Add to cart? (Y/N): ")? {
                    return Ok(None);
                }

                let (outcome, output) = cart.execute(store, report.sku()).await?;
                prompter.say(&output)?;
                Ok(Some(outcome))
            }
        }
    }
}

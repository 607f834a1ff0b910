//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::site::regions::Region;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storefront region
    #[serde(default)]
    pub region: Region,

    /// Acquire the session through a Chromium instance instead of a direct GET
    #[serde(default)]
    pub use_browser: bool,

    /// Run the acquisition browser without a window
    #[serde(default)]
    pub headless: bool,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::default(),
            use_browser: false,
            headless: false,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("lv-cart").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    ///
    /// Unparseable values are ignored. An invalid `LV_REGION` is left for the
    /// CLI's region argument to reject.
    pub fn with_env(mut self) -> Self {
        if let Ok(region) = std::env::var("LV_REGION") {
            if let Ok(r) = region.parse() {
                self.region = r;
            }
        }

        if let Ok(browser) = std::env::var("LV_BROWSER") {
            if let Some(b) = parse_flag(&browser) {
                self.use_browser = b;
            }
        }

        if let Ok(proxy) = std::env::var("LV_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("LV_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }
}

/// Parses yes/no style flags (`1`, `true`, `y`, `yes` and their negatives).
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "y" | "yes" => Some(true),
        "0" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.region, Region::Uk);
        assert!(!config.use_browser);
        assert!(!config.headless);
        assert!(config.proxy.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);

        let err = "csv".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("Y"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("n"), Some(false));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            region = "jp"
            use_browser = true
            headless = true
            timeout_secs = 12
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.region, Region::Jp);
        assert!(config.use_browser);
        assert!(config.headless);
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_toml_unknown_region() {
        let result: std::result::Result<Config, _> = toml::from_str(r#"region = "de""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            region = "hk"
            proxy = "socks5://localhost:1080"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.region, Region::Hk);
        assert_eq!(config.proxy.as_deref(), Some("socks5://localhost:1080"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"region = "kr""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.region, Region::Kr);
    }

    #[test]
    fn test_config_with_env() {
        let orig_region = std::env::var("LV_REGION").ok();
        let orig_browser = std::env::var("LV_BROWSER").ok();
        let orig_timeout = std::env::var("LV_TIMEOUT").ok();

        std::env::set_var("LV_REGION", "au");
        std::env::set_var("LV_BROWSER", "y");
        std::env::set_var("LV_TIMEOUT", "7");

        let config = Config::new().with_env();
        assert_eq!(config.region, Region::Au);
        assert!(config.use_browser);
        assert_eq!(config.timeout_secs, 7);

        std::env::set_var("LV_REGION", "atlantis");
        std::env::set_var("LV_TIMEOUT", "soon");

        let config = Config::new().with_env();
        assert_eq!(config.region, Region::Uk);
        assert_eq!(config.timeout_secs, 30);

        for (key, orig) in [
            ("LV_REGION", orig_region),
            ("LV_BROWSER", orig_browser),
            ("LV_TIMEOUT", orig_timeout),
        ] {
            match orig {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

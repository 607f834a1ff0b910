//! Regional storefront hosts and locales.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Checkout host shared by every regional storefront.
pub const SECURE_HOST: &str = "secure.louisvuitton.com";

/// Parent domain shared by the storefront and checkout hosts.
pub const COOKIE_DOMAIN: &str = "louisvuitton.com";

/// Supported storefront regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    #[default]
    Uk,
    Au,
    Hk,
    Eu,
    Kr,
    Jp,
}

impl Region {
    /// Returns the storefront host for this region.
    pub fn host(&self) -> &'static str {
        match self {
            Region::Us => "us.louisvuitton.com",
            Region::Uk => "uk.louisvuitton.com",
            Region::Au => "au.louisvuitton.com",
            Region::Hk => "hk.louisvuitton.com",
            Region::Eu => "eu.louisvuitton.com",
            Region::Kr => "kr.louisvuitton.com",
            Region::Jp => "jp.louisvuitton.com",
        }
    }

    /// Returns the `storeLang` locale sent with every request.
    pub fn locale(&self) -> &'static str {
        match self {
            Region::Us => "eng-us",
            Region::Uk => "eng-gb",
            Region::Au => "eng-au",
            Region::Hk => "eng-hk",
            Region::Eu => "eng-e1",
            Region::Kr => "kor-kr",
            Region::Jp => "jpn-jp",
        }
    }

    /// Returns the Accept-Language header value for this region.
    pub fn accept_language(&self) -> &'static str {
        match self {
            Region::Us => "en-US,en;q=0.8",
            Region::Uk => "en-GB,en;q=0.8",
            Region::Au => "en-AU,en;q=0.8",
            Region::Hk => "en-HK,en;q=0.8,zh;q=0.6",
            Region::Eu => "en-US,en;q=0.8,de;q=0.6",
            Region::Kr => "ko-KR,ko;q=0.8,en;q=0.6",
            Region::Jp => "ja-JP,ja;q=0.8,en;q=0.6",
        }
    }

    /// Returns the resolved configuration for this region.
    pub fn config(&self) -> RegionConfig {
        RegionConfig { code: *self, host: self.host(), locale: self.locale() }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[Region::Us, Region::Uk, Region::Au, Region::Hk, Region::Eu, Region::Kr, Region::Jp]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Region::Us => "us",
            Region::Uk => "uk",
            Region::Au => "au",
            Region::Hk => "hk",
            Region::Eu => "eu",
            Region::Kr => "kr",
            Region::Jp => "jp",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "uk" => Ok(Region::Uk),
            "au" => Ok(Region::Au),
            "hk" => Ok(Region::Hk),
            "eu" => Ok(Region::Eu),
            "kr" => Ok(Region::Kr),
            "jp" => Ok(Region::Jp),
            _ => Err(Error::InvalidRegion(s.to_string())),
        }
    }
}

/// Immutable (host, locale) pair for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionConfig {
    pub code: Region,
    pub host: &'static str,
    pub locale: &'static str,
}

impl RegionConfig {
    /// Resolves a user-supplied region code. Unknown codes are rejected.
    pub fn resolve(code: &str) -> crate::Result<Self> {
        code.parse::<Region>().map(|r| r.config())
    }

    /// Storefront base URL, e.g. `https://uk.louisvuitton.com`.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Checkout base URL used for stock and cart requests.
    pub fn secure_url(&self) -> String {
        format!("https://{}", SECURE_HOST)
    }
}

/// Endpoint configuration for the explorer backend and the price feed.
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Url;

pub const API_URL_VAR: &str = "XRPLW_API_URL";
pub const PRICE_URL_VAR: &str = "XRPLW_PRICE_URL";
pub const TIMEOUT_VAR: &str = "XRPLW_TIMEOUT_SECS";

pub const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ripple&vs_currencies=usd";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Explorer base URL without a trailing slash, e.g. `http://10.0.0.2:8000/api`.
    pub api_url: String,
    pub price_url: String,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: normalize_url(api_url).context("Invalid explorer URL")?,
            price_url: DEFAULT_PRICE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_price_url(mut self, price_url: &str) -> Result<Self> {
        self.price_url = normalize_url(price_url).context("Invalid price feed URL")?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Explorer backend requires {API_URL_VAR} to be set"))?;

        let mut config = Self::new(&api_url)?;

        if let Some(price_url) = lookup(PRICE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_price_url(&price_url)?;
        }

        if let Some(secs) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid {TIMEOUT_VAR}: '{secs}'"))?;
            if secs == 0 {
                bail!("{TIMEOUT_VAR} must be greater than 0");
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Full URL of the explore endpoint.
    pub fn explore_url(&self) -> String {
        format!("{}/explore", self.api_url)
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("'{raw}' is not a valid URL"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("Unsupported URL scheme '{other}', expected http or https"),
    }
    Ok(raw.trim_end_matches('/').to_string())
}

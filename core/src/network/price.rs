use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Price shown when the quote service can't be reached or answers nonsense.
pub const FALLBACK_USD_PRICE: f64 = 0.50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub usd: f64,
    pub is_fallback: bool,
}

impl PriceQuote {
    pub fn live(usd: f64) -> Self {
        Self {
            usd,
            is_fallback: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            usd: FALLBACK_USD_PRICE,
            is_fallback: true,
        }
    }
}

/// Current XRP/USD price. Never fails; degrades to [`PriceQuote::fallback`].
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_quote(&self) -> PriceQuote;
}

#[derive(Debug, Error)]
enum PriceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("price is not a finite non-negative number: {0}")]
    OutOfRange(f64),
}

#[derive(Deserialize)]
struct SimplePrice {
    ripple: AssetPrice,
}

#[derive(Deserialize)]
struct AssetPrice {
    usd: f64,
}

/// Parse a simple-price body of the form `{"ripple":{"usd":0.52}}`.
fn parse_quote(body: &str) -> Result<f64, PriceError> {
    let parsed: SimplePrice = serde_json::from_str(body)?;
    let usd = parsed.ripple.usd;
    if !usd.is_finite() || usd < 0.0 {
        return Err(PriceError::OutOfRange(usd));
    }
    Ok(usd)
}

/// Client for a CoinGecko-style simple-price endpoint.
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    url: String,
}

impl PriceClient {
    pub fn with_http(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn try_fetch(&self) -> Result<f64, PriceError> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_quote(&body)
    }
}

#[async_trait]
impl PriceSource for PriceClient {
    async fn fetch_quote(&self) -> PriceQuote {
        match self.try_fetch().await {
            Ok(usd) => {
                tracing::debug!(usd, "fetched XRP price");
                PriceQuote::live(usd)
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "failed to fetch XRP price, using fallback");
                PriceQuote::fallback()
            }
        }
    }
}

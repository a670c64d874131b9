/// HTTP plumbing shared by the explorer and price clients.
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::ApiConfig;

pub mod explorer;
pub mod price;

pub use explorer::{ExploreResponse, Explorer, ExplorerClient};
pub use price::{PriceClient, PriceQuote, PriceSource};

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client both remote sources share.
pub fn http_client(config: &ApiConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.request_timeout.min(MAX_CONNECT_TIMEOUT))
        .build()
        .context("Failed to create HTTP client")
}

/// Both remote clients built from one configuration.
pub struct NetworkClients {
    pub explorer: ExplorerClient,
    pub price: PriceClient,
}

impl NetworkClients {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = http_client(config)?;
        Ok(Self {
            explorer: ExplorerClient::with_http(http.clone(), config.explore_url()),
            price: PriceClient::with_http(http, config.price_url.clone()),
        })
    }
}

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::error::ExploreError;
use crate::state::WalletQuery;

/// Status and untouched body of an explore call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreResponse {
    pub status: u16,
    pub raw_body: String,
}

impl ExploreResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of raw account data for an address.
#[async_trait]
pub trait Explorer: Send + Sync {
    /// Send the address to the backend. Transport problems of any kind
    /// come back as `ExploreError::ConnectionFailure`.
    async fn explore(&self, query: &WalletQuery) -> Result<ExploreResponse, ExploreError>;
}

#[derive(Serialize)]
struct ExploreRequest<'a> {
    address: &'a str,
}

/// Client for the backend's `POST /explore` endpoint.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    url: String,
}

impl ExplorerClient {
    pub fn with_http(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Explorer for ExplorerClient {
    async fn explore(&self, query: &WalletQuery) -> Result<ExploreResponse, ExploreError> {
        let body = ExploreRequest {
            address: query.address(),
        };
        tracing::debug!(url = %self.url, address = query.address(), "sending explore request");

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.url, error = %e, "explore request failed");
                ExploreError::ConnectionFailure
            })?;

        let status = response.status().as_u16();
        let raw_body = response.text().await.map_err(|e| {
            tracing::warn!(status, error = %e, "failed to read explore response body");
            ExploreError::ConnectionFailure
        })?;
        tracing::debug!(status, body = %raw_body, "explore response received");

        Ok(ExploreResponse { status, raw_body })
    }
}

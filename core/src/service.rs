use std::sync::Arc;

use crate::decode::decode_response;
use crate::display;
use crate::error::ExploreError;
use crate::network::Explorer;
use crate::state::{WalletQuery, WalletSummary};

/// Runs one wallet query end to end: explore, decode, format.
pub struct WalletService {
    explorer: Arc<dyn Explorer>,
}

impl WalletService {
    pub fn new(explorer: Arc<dyn Explorer>) -> Self {
        Self { explorer }
    }

    /// Stages run strictly in sequence; the first failure ends the query.
    pub async fn explore(&self, query: &WalletQuery) -> Result<WalletSummary, ExploreError> {
        let response = self.explorer.explore(query).await?;
        let payload = decode_response(&response)?;
        let summary = display::summarize(&payload);
        tracing::info!(
            address = query.address(),
            transactions = summary.transactions.len(),
            "wallet query completed"
        );
        Ok(summary)
    }
}

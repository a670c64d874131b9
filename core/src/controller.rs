/// View state machine for the wallet screen.
///
/// Background work (the price fetch on mount, each wallet query) runs in its
/// own task and reports back over a channel; only [`ViewStateController::update`]
/// mutates state. Price results touch `price`, query results touch `state`,
/// so neither path can clobber the other.
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::config::ApiConfig;
use crate::error::ExploreError;
use crate::network::{NetworkClients, PriceQuote, PriceSource};
use crate::service::WalletService;
use crate::state::{ViewSnapshot, ViewState, WalletQuery, WalletSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PriceLoaded(PriceQuote),
    WalletLoaded(Result<WalletSummary, ExploreError>),
}

pub struct ViewStateController {
    service: Arc<WalletService>,
    prices: Arc<dyn PriceSource>,
    query: String,
    state: ViewState,
    price: Option<PriceQuote>,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    snapshot: watch::Sender<ViewSnapshot>,
}

impl ViewStateController {
    pub fn new(prices: Arc<dyn PriceSource>, service: WalletService) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (snapshot, _) = watch::channel(ViewSnapshot::default());
        Self {
            service: Arc::new(service),
            prices,
            query: String::new(),
            state: ViewState::Idle,
            price: None,
            sender,
            receiver,
            snapshot,
        }
    }

    /// Wire up the real HTTP clients, sharing one connection pool.
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let clients = NetworkClients::new(config)?;
        Ok(Self::new(
            Arc::new(clients.price),
            WalletService::new(Arc::new(clients.explorer)),
        ))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn price(&self) -> Option<&PriceQuote> {
        self.price.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Receiver that sees every state change, for a presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn set_query(&mut self, input: impl Into<String>) {
        self.query = input.into();
        self.publish();
    }

    /// The submit trigger is disabled while loading or with an empty query.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && !self.query.is_empty()
    }

    /// Start the one-off price fetch. The result arrives as [`Message::PriceLoaded`].
    pub fn mount(&self) {
        let prices = Arc::clone(&self.prices);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let quote = prices.fetch_quote().await;
            if sender.send(Message::PriceLoaded(quote)).is_err() {
                tracing::debug!("controller dropped before price arrived");
            }
        });
    }

    /// Submit the current query. Returns `false` and does nothing when
    /// submission is disabled.
    pub fn submit(&mut self) -> bool {
        if self.state.is_loading() {
            tracing::debug!("query already in flight, ignoring submit");
            return false;
        }
        let Some(query) = WalletQuery::new(self.query.clone()) else {
            return false;
        };

        // Drops any previous summary or error message.
        self.state = ViewState::Loading;
        self.publish();

        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = service.explore(&query).await;
            if sender.send(Message::WalletLoaded(result)).is_err() {
                tracing::debug!("controller dropped before wallet query finished");
            }
        });
        true
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::PriceLoaded(quote) => {
                self.price = Some(quote);
            }
            Message::WalletLoaded(result) => {
                if !self.state.is_loading() {
                    tracing::debug!("wallet result arrived with no query in flight, ignoring");
                    return;
                }
                self.state = match result {
                    Ok(summary) => ViewState::Success(summary),
                    Err(e) => {
                        tracing::warn!(kind = e.kind(), error = %e, "wallet query failed");
                        ViewState::Error(e.to_string())
                    }
                };
            }
        }
        self.publish();
    }

    /// Wait for the next background result and apply it.
    pub async fn next_message(&mut self) {
        // The controller holds a sender, so the channel never closes here.
        if let Some(message) = self.receiver.recv().await {
            self.update(message);
        }
    }

    /// Apply every result that has already arrived, without waiting.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.update(message);
            applied += 1;
        }
        applied
    }

    fn publish(&self) {
        let snapshot = ViewSnapshot {
            state: self.state.clone(),
            price: self.price,
            can_submit: self.can_submit(),
        };
        self.snapshot.send_replace(snapshot);
    }
}

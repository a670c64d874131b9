pub mod config;
pub mod controller;
pub mod decode;
pub mod display;
pub mod error;
pub mod network;
pub mod service;
pub mod state;

pub use config::ApiConfig;
pub use controller::{Message, ViewStateController};
pub use error::ExploreError;
pub use network::{ExplorerClient, PriceClient, PriceQuote};
pub use service::WalletService;
pub use state::{DisplayTransaction, FeeAmount, ViewSnapshot, ViewState, WalletQuery, WalletSummary};

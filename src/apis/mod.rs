mod demo;
#[cfg(feature = "goldapi")]
mod goldapi;

pub use demo::*;
#[cfg(feature = "goldapi")]
pub use goldapi::*;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use thiserror::Error;

use crate::{Metal, PriceRecord};

/// A source of metal prices.
#[async_trait]
pub trait Api: Send + Sync {
    const NAME: &'static str;
    /// Whether prices come from a real market.
    const LIVE: bool;

    /// Get the current price record of a single metal.
    async fn get_price(&self, metal: Metal) -> Result<PriceRecord, ApiError>;

    /// Get one price record per metal, in `Metal::ALL` order.
    /// A single failing metal fails the whole batch.
    async fn get_prices(&self) -> Result<Vec<PriceRecord>, ApiError> {
        try_join_all(Metal::ALL.iter().map(|&metal| self.get_price(metal))).await
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Could not connect to the API: {0}")]
    Network(String),
    #[error("The API did not respond in time.")]
    Timeout,
    #[error("The API responded with status {0}.")]
    Status(u16),
    #[error("Malformed API response: {0}")]
    Malformed(String),
}

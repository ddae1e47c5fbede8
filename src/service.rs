use thiserror::Error;

use crate::{
    apis::{Api, ApiError},
    MarketSummary, Metal, PriceRecord, Snapshot,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to fetch metal prices: {0}")]
    Fetch(#[from] ApiError),
    #[error("Metal {0} not found.")]
    NotFound(String),
}

impl Error {
    /// Generic text to show the user in place of the error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Fetch(_) => {
                "Unable to fetch live prices. Please check your connection and try again."
            }
            Error::NotFound(_) => "Failed to load metal details. Please try again.",
        }
    }
}

/// Entry point for the presentation layer, fetching prices through an api.
pub struct PriceService<A: Api> {
    api: A,
}

impl<A: Api> PriceService<A> {
    pub fn new(api: A) -> Self {
        if A::LIVE {
            log::info!("Serving live prices from {}", A::NAME);
        } else {
            log::warn!("Serving synthetic prices from {}", A::NAME);
        }
        PriceService { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch one price record per metal, in canonical order.
    pub async fn fetch_all_prices(&self) -> Result<Vec<PriceRecord>, Error> {
        let prices = self.api.get_prices().await.map_err(|err| {
            log::error!("Error fetching prices from {}: {}", A::NAME, err);
            Error::from(err)
        })?;
        log::debug!("Fetched {} prices from {}", prices.len(), A::NAME);
        Ok(prices)
    }

    /// Look up a single metal by identifier in a fresh snapshot.
    pub async fn fetch_one(&self, id: &str) -> Result<PriceRecord, Error> {
        let metal: Option<Metal> = id.parse().ok();
        let prices = self.fetch_all_prices().await?;

        metal
            .and_then(|metal| prices.into_iter().find(|price| price.metal == metal))
            .ok_or_else(|| {
                log::error!("Error fetching {} price: not found", id);
                Error::NotFound(id.to_owned())
            })
    }

    /// Fetch all prices along with their market summary.
    pub async fn snapshot(&self) -> Result<Snapshot, Error> {
        Ok(Snapshot::new(self.fetch_all_prices().await?))
    }

    pub fn summarize(&self, prices: &[PriceRecord]) -> MarketSummary {
        crate::summarize(prices)
    }
}

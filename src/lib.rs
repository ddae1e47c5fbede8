#![deny(unused_must_use)]
#![deny(unsafe_code)]
#![allow(clippy::new_without_default)]

pub mod apis;
mod config;
mod metal;
mod price;
pub mod schedule;
mod service;
pub mod state;
mod summary;
mod watch;

use std::{sync::Arc, time::Duration};

pub use config::*;
use futures_util::FutureExt;
pub use metal::*;
pub use price::*;
pub use service::*;
pub use summary::*;
pub use watch::*;

use apis::Api;

/// Wires price services to self-refreshing views.
pub struct Bullion {
    pub refresh_interval: Duration,
}

impl Default for Bullion {
    fn default() -> Self {
        Bullion {
            refresh_interval: Duration::from_secs(30),
        }
    }
}

impl Bullion {
    pub fn from_config(config: &Config) -> Self {
        Bullion {
            refresh_interval: config.refresh_interval,
        }
    }

    /// Keep every metal's price and the market summary up to date.
    pub fn watch_market<A: Api + 'static>(&self, service: Arc<PriceService<A>>) -> Watch<Snapshot> {
        log::info!("Watching market every {:?}", self.refresh_interval);
        Watch::spawn(self.refresh_interval, move || {
            let service = service.clone();
            async move { service.snapshot().await }.boxed()
        })
    }

    /// Keep a single metal's price up to date.
    pub fn watch_metal<A: Api + 'static>(
        &self,
        service: Arc<PriceService<A>>,
        id: impl Into<String>,
    ) -> Watch<PriceRecord> {
        let id = id.into();
        log::info!("Watching {} every {:?}", id, self.refresh_interval);
        Watch::spawn(self.refresh_interval, move || {
            let service = service.clone();
            let id = id.clone();
            async move { service.fetch_one(&id).await }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{apis::Demo, state::ViewState};

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn watch_market_loads_snapshot() {
        let service = Arc::new(PriceService::new(Demo::new()));
        let watch = Bullion::default().watch_market(service);
        settle().await;

        let snapshot = watch.state().data().cloned().unwrap();
        assert_eq!(snapshot.prices.len(), Metal::ALL.len());
        assert_eq!(snapshot.summary, summarize(&snapshot.prices));
        watch.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn watch_metal_reports_not_found() {
        let service = Arc::new(PriceService::new(Demo::new()));
        let bullion = Bullion::from_config(&Config::default());

        let gold = bullion.watch_metal(service.clone(), "gold");
        let bronze = bullion.watch_metal(service, "bronze");
        settle().await;

        assert_eq!(gold.state().data().map(|price| price.metal), Some(Metal::Gold));
        assert_eq!(
            bronze.state(),
            ViewState::Failed(Error::NotFound("bronze".to_owned()))
        );
        assert_eq!(
            bronze.state().error().map(Error::user_message),
            Some("Failed to load metal details. Please try again.")
        );
    }
}

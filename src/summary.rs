use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{round_price, PriceRecord};

/// Roll-up statistics over one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    #[serde(rename = "metalsUp")]
    pub advancing: usize,
    #[serde(rename = "metalsDown")]
    pub declining: usize,
    #[serde(rename = "avgChange")]
    pub average_change_percent: Decimal,
}

/// Count advancing and declining metals and average their percentage change.
/// Unchanged metals count toward neither side but are part of the mean.
pub fn summarize(prices: &[PriceRecord]) -> MarketSummary {
    let advancing = prices.iter().filter(|p| p.change > Decimal::ZERO).count();
    let declining = prices.iter().filter(|p| p.change < Decimal::ZERO).count();
    let average_change_percent = if prices.is_empty() {
        Decimal::ZERO
    } else {
        let sum: Decimal = prices.iter().map(|p| p.change_percent).sum();
        round_price(sum / Decimal::from(prices.len()))
    };

    MarketSummary {
        advancing,
        declining,
        average_change_percent,
    }
}

/// Everything the price list needs for one refresh cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub prices: Vec<PriceRecord>,
    pub summary: MarketSummary,
}

impl Snapshot {
    pub fn new(prices: Vec<PriceRecord>) -> Self {
        let summary = summarize(&prices);
        Snapshot { prices, summary }
    }
}

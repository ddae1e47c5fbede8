use super::{Api, ApiError};
use crate::{format_update_time, Metal, PriceRecord};

use async_trait::async_trait;
use chrono::{Local, Utc};
use futures_util::lock::Mutex;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Reference figures a demo price is generated from.
#[derive(Clone, Debug)]
pub struct Reference {
    pub base_price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub previous_close: Decimal,
    pub previous_open: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
    pub week_52_high: Decimal,
    pub week_52_low: Decimal,
    pub volume: &'static str,
}

static REFERENCES: Lazy<HashMap<Metal, Reference>> = Lazy::new(|| {
    HashMap::from([
        (
            Metal::Gold,
            Reference {
                base_price: dec!(6247.50),
                change: dec!(42.30),
                change_percent: dec!(0.68),
                previous_close: dec!(6205.20),
                previous_open: dec!(6210.15),
                day_high: dec!(6258.90),
                day_low: dec!(6198.45),
                week_52_high: dec!(6890.25),
                week_52_low: dec!(5654.80),
                volume: "1,245,678",
            },
        ),
        (
            Metal::Silver,
            Reference {
                base_price: dec!(78.25),
                change: dec!(-1.15),
                change_percent: dec!(-1.45),
                previous_close: dec!(79.40),
                previous_open: dec!(79.12),
                day_high: dec!(79.85),
                day_low: dec!(77.90),
                week_52_high: dec!(89.45),
                week_52_low: dec!(68.30),
                volume: "2,567,432",
            },
        ),
        (
            Metal::Platinum,
            Reference {
                base_price: dec!(2834.75),
                change: dec!(18.65),
                change_percent: dec!(0.66),
                previous_close: dec!(2816.10),
                previous_open: dec!(2821.45),
                day_high: dec!(2847.20),
                day_low: dec!(2809.30),
                week_52_high: dec!(3245.60),
                week_52_low: dec!(2456.80),
                volume: "567,234",
            },
        ),
        (
            Metal::Palladium,
            Reference {
                base_price: dec!(3156.80),
                change: dec!(-25.40),
                change_percent: dec!(-0.80),
                previous_close: dec!(3182.20),
                previous_open: dec!(3175.90),
                day_high: dec!(3189.45),
                day_low: dec!(3145.60),
                week_52_high: dec!(3876.45),
                week_52_low: dec!(2789.30),
                volume: "345,123",
            },
        ),
    ])
});

impl Reference {
    pub fn of(metal: Metal) -> &'static Reference {
        // Every metal has an entry.
        &REFERENCES[&metal]
    }
}

/// Largest accepted jitter, just under 100%.
pub const MAX_JITTER: Decimal = Decimal::from_parts(999_999, 0, 0, false, 6);

/// The Demo API generates synthetic prices around fixed reference figures,
/// moving each price by a random jitter on every call.
///
/// Change figures are the reference constants and are not derived from
/// the jittered price.
pub struct Demo {
    rng: Mutex<StdRng>,
    jitter: Decimal,
}

impl Demo {
    /// Create a demo api seeded from OS entropy, jittering prices by up to 1%.
    pub fn new() -> Self {
        Demo::with_rng(StdRng::from_entropy())
    }

    /// Create a demo api whose jitter sequence is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Demo::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Demo {
            rng: Mutex::new(rng),
            jitter: dec!(0.01),
        }
    }

    /// Set the maximum relative deviation from the base price.
    /// Clamped below 1 so that prices never go negative.
    pub fn with_jitter(mut self, jitter: Decimal) -> Self {
        self.jitter = jitter.abs().min(MAX_JITTER);
        self
    }

    pub fn jitter(&self) -> Decimal {
        self.jitter
    }

    // Uniform in [-jitter, jitter] with six digit resolution.
    async fn draw_jitter(&self) -> Decimal {
        // Cannot overflow once clamped to MAX_JITTER.
        let span = self
            .jitter
            .checked_mul(dec!(1_000_000))
            .and_then(|span| span.to_i64())
            .unwrap_or(0);
        let micros = self.rng.lock().await.gen_range(-span..=span);
        Decimal::new(micros, 6)
    }
}

#[async_trait]
impl Api for Demo {
    const NAME: &'static str = "Demo";
    const LIVE: bool = false;

    async fn get_price(&self, metal: Metal) -> Result<PriceRecord, ApiError> {
        let reference = Reference::of(metal);
        let jitter = self.draw_jitter().await;
        log::trace!("Jittering {} by {}", metal, jitter);

        Ok(PriceRecord {
            metal,
            symbol: metal.symbol().to_owned(),
            name: metal.name().to_owned(),
            price: reference.base_price + reference.base_price * jitter,
            change: reference.change,
            change_percent: reference.change_percent,
            previous_close: reference.previous_close,
            previous_open: reference.previous_open,
            day_high: reference.day_high,
            day_low: reference.day_low,
            week_52_high: reference.week_52_high,
            week_52_low: reference.week_52_low,
            volume: reference.volume.to_owned(),
            last_update: format_update_time(Local::now()),
            timestamp: Utc::now().timestamp_millis(),
        }
        .rounded())
    }
}

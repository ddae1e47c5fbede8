use super::{Api, ApiError};
use crate::{format_update_time, Config, ConfigError, Metal, PriceRecord};

use async_trait::async_trait;
use chrono::{Local, TimeZone, Utc};
use rust_decimal::prelude::*;
use serde::Deserialize;

/// Live INR quotes from goldapi.io.
pub struct GoldApi {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl GoldApi {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let access_token = config
            .access_token
            .clone()
            .ok_or(ConfigError::MissingToken)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;

        Ok(GoldApi {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            access_token,
        })
    }

    pub fn url(&self, metal: Metal) -> String {
        format!("{}/{}/INR", self.endpoint, metal.code())
    }
}

#[derive(Debug, Deserialize)]
struct Quote {
    price: Decimal,
    ch: Decimal,
    chp: Decimal,
    prev_close_price: Decimal,
    open_price: Decimal,
    high_price: Decimal,
    low_price: Decimal,
    // Seconds since the unix epoch.
    timestamp: Option<i64>,
}

impl Quote {
    fn into_record(self, metal: Metal) -> PriceRecord {
        let captured = self
            .timestamp
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now);

        PriceRecord {
            metal,
            symbol: metal.symbol().to_owned(),
            name: metal.name().to_owned(),
            price: self.price,
            change: self.ch,
            change_percent: self.chp,
            previous_close: self.prev_close_price,
            previous_open: self.open_price,
            day_high: self.high_price,
            day_low: self.low_price,
            // Not provided by this api.
            week_52_high: Decimal::ZERO,
            week_52_low: Decimal::ZERO,
            volume: "-".to_owned(),
            last_update: format_update_time(captured.with_timezone(&Local)),
            timestamp: captured.timestamp_millis(),
        }
        .rounded()
    }
}

fn parse_quote(metal: Metal, body: &str) -> Result<PriceRecord, ApiError> {
    let quote: Quote =
        serde_json::from_str(body).map_err(|err| ApiError::Malformed(err.to_string()))?;
    Ok(quote.into_record(metal))
}

#[async_trait]
impl Api for GoldApi {
    const NAME: &'static str = "GoldAPI";
    const LIVE: bool = true;

    async fn get_price(&self, metal: Metal) -> Result<PriceRecord, ApiError> {
        let url = self.url(metal);
        log::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .header("x-access-token", &self.access_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Fetching {} failed with status {}", metal, status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_quote(metal, &body)
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

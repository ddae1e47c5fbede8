use chrono::{DateTime, Local};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Metal;

/// A snapshot of one metal's market, quoted in INR.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub metal: Metal,
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub previous_close: Decimal,
    pub previous_open: Decimal,
    // Not guaranteed to bracket `price`.
    pub day_high: Decimal,
    pub day_low: Decimal,
    #[serde(rename = "weekHigh52")]
    pub week_52_high: Decimal,
    #[serde(rename = "weekLow52")]
    pub week_52_low: Decimal,
    pub volume: String,
    pub last_update: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
}

impl PriceRecord {
    /// Round every decimal field to two fractional digits.
    pub fn rounded(self) -> Self {
        PriceRecord {
            price: round_price(self.price),
            change: round_price(self.change),
            change_percent: round_price(self.change_percent),
            previous_close: round_price(self.previous_close),
            previous_open: round_price(self.previous_open),
            day_high: round_price(self.day_high),
            day_low: round_price(self.day_low),
            week_52_high: round_price(self.week_52_high),
            week_52_low: round_price(self.week_52_low),
            ..self
        }
    }

    pub fn decimals(&self) -> [Decimal; 9] {
        [
            self.price,
            self.change,
            self.change_percent,
            self.previous_close,
            self.previous_open,
            self.day_high,
            self.day_low,
            self.week_52_high,
            self.week_52_low,
        ]
    }
}

/// Round to two fractional digits, with midpoints going up (toward +inf).
pub fn round_price(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}

/// Formats a wall clock time as `hh:mm:ss AM`.
pub fn format_update_time(time: DateTime<Local>) -> String {
    time.format("%I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn record() -> PriceRecord {
        PriceRecord {
            metal: Metal::Gold,
            symbol: Metal::Gold.symbol().to_owned(),
            name: Metal::Gold.name().to_owned(),
            price: dec!(6251.123),
            change: dec!(42.305),
            change_percent: dec!(-0.675),
            previous_close: dec!(6205.2),
            previous_open: dec!(6210.15),
            day_high: dec!(6258.9),
            day_low: dec!(6198.45),
            week_52_high: dec!(6890.25),
            week_52_low: dec!(5654.8),
            volume: "1,245,678".to_owned(),
            last_update: "09:15:00 AM".to_owned(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn rounding_midpoints() {
        assert_eq!(round_price(dec!(1.005)), dec!(1.01));
        assert_eq!(round_price(dec!(-1.005)), dec!(-1.00));
        assert_eq!(round_price(dec!(-0.225)), dec!(-0.22));
        assert_eq!(round_price(dec!(-0.2251)), dec!(-0.23));
        assert_eq!(round_price(dec!(1.004)), dec!(1.00));
        assert_eq!(round_price(dec!(78.25)), dec!(78.25));
    }

    #[test]
    fn rounded_touches_every_decimal() {
        let rounded = record().rounded();
        assert_eq!(rounded.price, dec!(6251.12));
        assert_eq!(rounded.change, dec!(42.31));
        assert_eq!(rounded.change_percent, dec!(-0.67));
        for value in rounded.decimals() {
            assert_eq!(value, value.round_dp(2));
        }
        assert_eq!(rounded.volume, "1,245,678");
        assert_eq!(rounded.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn json_round_trip() {
        let rounded = record().rounded();
        let json = serde_json::to_string(&rounded).unwrap();
        let decoded: PriceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, rounded);
        for (a, b) in decoded.decimals().iter().zip(rounded.decimals().iter()) {
            assert_eq!(a.to_string(), b.to_string());
        }
    }

    #[test]
    fn json_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        for field in [
            "metal",
            "changePercent",
            "previousClose",
            "previousOpen",
            "dayHigh",
            "dayLow",
            "weekHigh52",
            "weekLow52",
            "lastUpdate",
            "timestamp",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["metal"], "gold");
    }

    #[test]
    fn update_time_format() {
        let time = Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        assert_eq!(format_update_time(time), "03:04:05 PM");
        let time = Local.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap();
        assert_eq!(format_update_time(time), "12:30:00 AM");
    }
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::stock_price::StockPrice;

/// Query string accepted by `GET /api/stocks`.
#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    /// Comma separated ticker symbols, e.g. `AAPL,MSFT`.
    pub symbols: Option<String>,
}

/// Quote projection returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPriceDto {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_change: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_change_percent: Decimal,
    pub last_updated: NaiveDateTime,
}

impl From<StockPrice> for StockPriceDto {
    fn from(value: StockPrice) -> Self {
        Self {
            symbol: value.symbol,
            current_price: value.current_price,
            daily_change: value.daily_change,
            daily_change_percent: value.daily_change_percent,
            last_updated: value.last_updated,
        }
    }
}

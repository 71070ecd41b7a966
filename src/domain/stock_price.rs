use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A synthetic quote for a single ticker symbol.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockPrice {
    /// Upper-cased ticker symbol.
    pub symbol: String,
    pub current_price: Decimal,
    /// Absolute change against the baseline price.
    pub daily_change: Decimal,
    /// Relative change against the baseline price, in percent.
    pub daily_change_percent: Decimal,
    pub last_updated: NaiveDateTime,
}

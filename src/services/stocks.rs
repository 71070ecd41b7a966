//! Synthetic stock quotes for demo dashboards.
//!
//! Quotes are computed per request from a fixed baseline table and random
//! daily movements; nothing is persisted and no network calls are made.

use std::collections::HashMap;

use lazy_static::lazy_static;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::stock_price::StockPrice;
use crate::dto::stocks::{StockPriceDto, StockQuery};
use crate::services::{ServiceError, ServiceResult};

/// Detail reported when quote generation fails for reasons other than input.
pub const STOCKS_UNAVAILABLE: &str = "Stock data temporarily unavailable";

/// Steps in the uniform grid used by [`random_decimal`].
const RANDOM_STEPS: i64 = 10_000;

lazy_static! {
    static ref BASELINE_PRICES: HashMap<&'static str, Decimal> = HashMap::from([
        ("AAPL", Decimal::new(17550, 2)),
        ("MSFT", Decimal::new(38025, 2)),
        ("GOOG", Decimal::new(14075, 2)),
        ("AMZN", Decimal::new(15500, 2)),
        ("META", Decimal::new(48550, 2)),
        ("TSLA", Decimal::new(24500, 2)),
        ("NVDA", Decimal::new(49575, 2)),
        ("NFLX", Decimal::new(48525, 2)),
    ]);
}

/// Baseline price for a known, already upper-cased symbol.
pub fn baseline_price(symbol: &str) -> Option<Decimal> {
    BASELINE_PRICES.get(symbol).copied()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// The caller passed no symbols at all.
    #[error("at least one stock symbol is required")]
    MissingSymbols,
    #[error("minimum {min} must be less than maximum {max}")]
    InvalidRange { min: Decimal, max: Decimal },
    #[error("stock price generation was cancelled")]
    Cancelled,
}

/// Draw a value from `[min, max)` on a grid of 10 000 evenly spaced steps.
pub fn random_decimal<R>(rng: &mut R, min: Decimal, max: Decimal) -> Result<Decimal, StockError>
where
    R: Rng + ?Sized,
{
    if min >= max {
        return Err(StockError::InvalidRange { min, max });
    }

    let step = rng.gen_range(0..RANDOM_STEPS);
    let fraction = Decimal::new(step, 4);
    Ok(min + (max - min) * fraction)
}

/// Source of stock quotes.
pub trait StockPriceProvider {
    /// Produce one quote per symbol, aborting once `cancel` fires.
    fn get_stock_prices(
        &self,
        symbols: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<StockPrice>, StockError>;
}

/// Quote provider that fabricates plausible prices locally.
#[derive(Debug, Clone, Default)]
pub struct MockStockPriceService;

impl MockStockPriceService {
    pub fn new() -> Self {
        Self
    }

    fn generate<R>(&self, symbol: &str, rng: &mut R) -> Result<StockPrice, StockError>
    where
        R: Rng + ?Sized,
    {
        let symbol = symbol.to_uppercase();

        let base_price = match baseline_price(&symbol) {
            Some(price) => price,
            None => random_decimal(rng, Decimal::from(50), Decimal::from(500))?,
        };

        let change_percent = random_decimal(rng, Decimal::from(-5), Decimal::from(5))?;
        let daily_change = base_price * (change_percent / Decimal::ONE_HUNDRED);
        let current_price = (base_price + daily_change).round_dp(2);

        Ok(StockPrice {
            symbol,
            current_price,
            daily_change: daily_change.round_dp(2),
            daily_change_percent: change_percent.round_dp(2),
            last_updated: chrono::Utc::now().naive_utc(),
        })
    }

    /// Same as [`StockPriceProvider::get_stock_prices`] with a caller-supplied RNG.
    pub fn get_stock_prices_with<R>(
        &self,
        symbols: &[String],
        cancel: &CancellationToken,
        rng: &mut R,
    ) -> Result<Vec<StockPrice>, StockError>
    where
        R: Rng + ?Sized,
    {
        if symbols.is_empty() {
            return Err(StockError::MissingSymbols);
        }

        log::info!(
            "Retrieving stock prices for {} symbols: {}",
            symbols.len(),
            symbols.join(", ")
        );

        let mut prices = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if cancel.is_cancelled() {
                return Err(StockError::Cancelled);
            }
            prices.push(self.generate(symbol, rng)?);
        }

        Ok(prices)
    }
}

impl StockPriceProvider for MockStockPriceService {
    fn get_stock_prices(
        &self,
        symbols: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<StockPrice>, StockError> {
        self.get_stock_prices_with(symbols, cancel, &mut rand::thread_rng())
    }
}

/// Split the raw `symbols` query value into trimmed, non-empty symbols.
pub fn parse_symbols(raw: Option<&str>) -> ServiceResult<Vec<String>> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            return Err(ServiceError::Validation(
                "At least one stock symbol must be provided".to_string(),
            ));
        }
    };

    let symbols: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect();

    if symbols.is_empty() {
        return Err(ServiceError::Validation(
            "At least one valid stock symbol must be provided".to_string(),
        ));
    }

    Ok(symbols)
}

/// Loads quotes for the symbols named in `query`.
pub fn load_stock_prices<P>(
    provider: &P,
    query: StockQuery,
    cancel: &CancellationToken,
) -> ServiceResult<Vec<StockPriceDto>>
where
    P: StockPriceProvider + ?Sized,
{
    let symbols = parse_symbols(query.symbols.as_deref())?;

    let prices = provider
        .get_stock_prices(&symbols, cancel)
        .map_err(|err| match err {
            StockError::Cancelled => ServiceError::Cancelled,
            StockError::MissingSymbols => ServiceError::Validation(err.to_string()),
            other => {
                log::error!("Failed to generate stock prices: {other}");
                ServiceError::Unavailable(STOCKS_UNAVAILABLE.to_string())
            }
        })?;

    Ok(prices.into_iter().map(StockPriceDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    mock! {
        pub Provider {}

        impl StockPriceProvider for Provider {
            fn get_stock_prices(&self, symbols: &[String], cancel: &CancellationToken) -> Result<Vec<StockPrice>, StockError>;
        }
    }

    fn symbols(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn random_decimal_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let min = Decimal::from(50);
        let max = Decimal::from(500);

        for _ in 0..1_000 {
            let value = random_decimal(&mut rng, min, max).expect("valid range");
            assert!(value >= min && value < max, "{value} outside [{min}, {max})");
        }
    }

    #[test]
    fn random_decimal_rejects_inverted_range() {
        let mut rng = StdRng::seed_from_u64(1);

        let err = random_decimal(&mut rng, Decimal::from(5), Decimal::from(5))
            .expect_err("expected range error");
        assert!(matches!(err, StockError::InvalidRange { .. }));

        let err = random_decimal(&mut rng, Decimal::from(10), Decimal::from(-10))
            .expect_err("expected range error");
        assert!(matches!(err, StockError::InvalidRange { .. }));
    }

    #[test]
    fn known_symbols_move_at_most_five_percent() {
        let service = MockStockPriceService::new();
        let mut rng = StdRng::seed_from_u64(42);
        let cancel = CancellationToken::new();

        for _ in 0..200 {
            let prices = service
                .get_stock_prices_with(&symbols(&["aapl"]), &cancel, &mut rng)
                .expect("expected quotes");
            let quote = &prices[0];
            let base = Decimal::new(17550, 2);
            let tolerance = Decimal::new(1, 2);

            assert_eq!(quote.symbol, "AAPL");
            assert!(quote.current_price >= base * Decimal::new(95, 2) - tolerance);
            assert!(quote.current_price <= base * Decimal::new(105, 2) + tolerance);
            assert!(quote.daily_change_percent >= Decimal::from(-5));
            assert!(quote.daily_change_percent <= Decimal::from(5));
            assert!(quote.current_price.scale() <= 2);
        }
    }

    #[test]
    fn unknown_symbols_get_random_baseline() {
        let service = MockStockPriceService::new();
        let mut rng = StdRng::seed_from_u64(3);
        let cancel = CancellationToken::new();

        for _ in 0..200 {
            let prices = service
                .get_stock_prices_with(&symbols(&["zzzz"]), &cancel, &mut rng)
                .expect("expected quotes");
            let quote = &prices[0];

            assert_eq!(quote.symbol, "ZZZZ");
            assert!(quote.current_price >= Decimal::new(4750, 2));
            assert!(quote.current_price <= Decimal::from(525));
        }
    }

    #[test]
    fn one_quote_per_symbol_in_request_order() {
        let service = MockStockPriceService::new();
        let cancel = CancellationToken::new();

        let prices = service
            .get_stock_prices(&symbols(&["msft", "Goog", "NEW"]), &cancel)
            .expect("expected quotes");

        let returned: Vec<&str> = prices.iter().map(|price| price.symbol.as_str()).collect();
        assert_eq!(returned, vec!["MSFT", "GOOG", "NEW"]);
    }

    #[test]
    fn empty_symbol_set_is_rejected() {
        let service = MockStockPriceService::new();
        let cancel = CancellationToken::new();

        let err = service
            .get_stock_prices(&[], &cancel)
            .expect_err("expected rejection");
        assert_eq!(err, StockError::MissingSymbols);
    }

    #[test]
    fn cancelled_token_aborts_generation() {
        let service = MockStockPriceService::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service
            .get_stock_prices(&symbols(&["AAPL"]), &cancel)
            .expect_err("expected cancellation");
        assert_eq!(err, StockError::Cancelled);
    }

    #[test]
    fn parse_symbols_trims_and_drops_empty_entries() {
        let parsed = parse_symbols(Some(" AAPL, ,msft ,")).expect("expected symbols");
        assert_eq!(parsed, vec!["AAPL".to_string(), "msft".to_string()]);
    }

    #[test]
    fn parse_symbols_distinguishes_missing_from_empty() {
        let missing = parse_symbols(None).expect_err("expected error");
        assert!(
            matches!(missing, ServiceError::Validation(message) if message == "At least one stock symbol must be provided")
        );

        let blank = parse_symbols(Some("   ")).expect_err("expected error");
        assert!(matches!(blank, ServiceError::Validation(_)));

        let commas = parse_symbols(Some(", ,")).expect_err("expected error");
        assert!(
            matches!(commas, ServiceError::Validation(message) if message == "At least one valid stock symbol must be provided")
        );
    }

    #[test]
    fn load_stock_prices_maps_cancellation() {
        let mut provider = MockProvider::new();
        provider
            .expect_get_stock_prices()
            .returning(|_, _| Err(StockError::Cancelled));

        let query = StockQuery {
            symbols: Some("AAPL".to_string()),
        };
        let result = load_stock_prices(&provider, query, &CancellationToken::new());
        assert!(matches!(result, Err(ServiceError::Cancelled)));
    }

    #[test]
    fn load_stock_prices_maps_generation_failures_to_unavailable() {
        let mut provider = MockProvider::new();
        provider.expect_get_stock_prices().returning(|_, _| {
            Err(StockError::InvalidRange {
                min: Decimal::ONE,
                max: Decimal::ZERO,
            })
        });

        let query = StockQuery {
            symbols: Some("AAPL".to_string()),
        };
        let result = load_stock_prices(&provider, query, &CancellationToken::new());
        assert!(
            matches!(result, Err(ServiceError::Unavailable(message)) if message == STOCKS_UNAVAILABLE)
        );
    }
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Number of decimal places kept for product prices.
pub const PRICE_SCALE: u32 = 2;

/// Largest absolute price storable with precision (18, 2).
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999_999_999, PRICE_SCALE)
}

/// Round `price` to cents and return it as an integer amount, or `None`
/// when it does not fit precision (18, 2).
pub fn price_to_cents(price: Decimal) -> Option<i64> {
    let rounded = price.round_dp(PRICE_SCALE);
    if rounded.abs() > max_price() {
        return None;
    }
    (rounded * Decimal::ONE_HUNDRED).to_i64()
}

/// Convert a stored integer cent amount back into a decimal price.
pub fn price_from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, PRICE_SCALE)
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Unit price with two decimal places.
    pub price: Decimal,
    /// Units currently in stock.
    pub stock: i32,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record, if any.
    pub updated_at: Option<NaiveDateTime>,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    /// Price represented in the smallest currency unit (cents).
    pub price_cents: i64,
    pub stock: i32,
    /// Creation timestamp stamped by the server.
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload stamped with the current time.
    pub fn new(name: impl Into<String>, price_cents: i64, stock: i32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price_cents,
            stock,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query over the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_to_cents_rounds_to_two_places() {
        assert_eq!(price_to_cents(Decimal::new(2999, 2)), Some(2999));
        assert_eq!(price_to_cents(Decimal::new(29_995, 3)), Some(3000));
        assert_eq!(price_to_cents(Decimal::new(5, 0)), Some(500));
    }

    #[test]
    fn price_to_cents_rejects_values_beyond_precision() {
        assert_eq!(price_to_cents(max_price()), Some(999_999_999_999_999_999));
        assert_eq!(price_to_cents(max_price() + Decimal::ONE), None);
    }

    #[test]
    fn price_from_cents_keeps_scale() {
        let price = price_from_cents(4999);
        assert_eq!(price, Decimal::new(4999, 2));
        assert_eq!(price.to_string(), "49.99");
    }
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, Product, price_to_cents};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 200;
/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: u64 = 1000;

/// Result type returned by the product DTO helpers.
pub type ProductDtoResult<T> = Result<T, ProductDtoError>;

/// Errors that can occur while turning a request body into a product.
#[derive(Debug, Error)]
pub enum ProductDtoError {
    /// Column limits enforced through the `validator` crate.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    /// The price does not fit precision (18, 2).
    #[error("price: Price must have at most 16 integer digits")]
    PriceOutOfRange,
}

/// Request body accepted by `POST /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(length(
        max = NAME_MAX_LEN,
        message = "Product name must be at most 200 characters"
    ))]
    pub name: String,
    #[validate(length(
        max = DESCRIPTION_MAX_LEN,
        message = "Product description must be at most 1000 characters"
    ))]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
}

impl CreateProductDto {
    /// Validates column limits and converts the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductDtoResult<NewProduct> {
        self.validate()?;

        let price_cents = price_to_cents(self.price).ok_or(ProductDtoError::PriceOutOfRange)?;

        let mut new_product = NewProduct::new(self.name, price_cents, self.stock);
        if let Some(description) = self.description {
            new_product = new_product.with_description(description);
        }

        Ok(new_product)
    }
}

/// Product projection returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            stock: value.stock,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// One page of products plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageDto {
    pub products: Vec<ProductDto>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::dto::products::CreateProductDto;
use crate::forms::{empty_string_as_none, sanitize_inline_text};

const NAME_MAX_LEN: u64 = 200;
const DESCRIPTION_MAX_LEN: u64 = 1000;

pub type ProductFormResult<T> = Result<T, ProductFormError>;

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price field is not a decimal number.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
}

/// Payload of the "Add product" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    pub description: Option<String>,
    /// Price as typed, e.g. `29.99`.
    pub price: String,
    #[validate(range(min = 0))]
    pub stock: i32,
}

impl AddProductForm {
    /// Validates the form and converts it into the API request body.
    pub fn into_create_dto(self) -> ProductFormResult<CreateProductDto> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|price| !price.is_sign_negative())
            .ok_or_else(|| ProductFormError::InvalidPrice {
                value: self.price.clone(),
            })?;

        Ok(CreateProductDto {
            name,
            description: self.description.map(|value| value.trim().to_string()),
            price,
            stock: self.stock,
        })
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Custom validator rejecting names made only of whitespace
fn validate_not_blank(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank_product_name"));
    }
    Ok(())
}

/// Product record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, immutable after creation
    #[schema(example = 1)]
    pub id: i64,
    /// Product name
    #[schema(example = "Phone")]
    pub name: String,
    /// Unit price
    #[schema(example = 500.0)]
    pub price: f64,
}

/// Request payload for creating or replacing a product.
///
/// Carries no id: identifiers are only ever assigned by the store, and an
/// `id` field in the request body is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    #[schema(example = "Phone")]
    pub name: String,
    #[validate(range(min = 0.0))]
    #[schema(example = 500.0)]
    pub price: f64,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl Product {
    /// Build a persisted product from an input and a store-assigned id
    pub fn from_input(id: i64, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
        }
    }

    /// Replace name and price in place; the id is never touched
    pub fn apply_update(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
    }
}

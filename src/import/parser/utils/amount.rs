use rust_decimal::Decimal;

use crate::ir::ValidationError;

/// Parses an exact decimal, e.g. "19.99" stays 19.99 and never becomes 19.990000000000002.
pub fn decimal(content: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str_exact(content.trim())
        .map_err(|_| ValidationError::InvalidDecimal(content.to_string()))
}

/// Quantities may be fractional, e.g. hours worked.
pub fn quantity(content: &str) -> Result<f64, ValidationError> {
    content
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidQuantity(content.to_string()))
}

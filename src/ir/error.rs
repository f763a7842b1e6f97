use thiserror::Error;

/// Raised by the constructors in [crate::ir] when an argument violates an invariant.
/// No partially built value is ever returned alongside one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid account specification: {0:?}")]
    InvalidAccount(String),

    #[error("Unknown currency code: {0:?}")]
    UnknownCurrency(String),

    #[error("Customer ID must be a non-negative integer, got {0:?}")]
    InvalidCustomerId(String),

    #[error("Quantity must be a finite number, got {0:?}")]
    InvalidQuantity(String),

    #[error("Amount must be an exact decimal number, got {0:?}")]
    InvalidDecimal(String),

    #[error("Amount is too large to be represented exactly: {0}")]
    AmountOutOfRange(String),

    #[error("Expected a date in the format YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),

    #[error("A sales list must contain at least one sale")]
    EmptySalesList,

    #[error("Expected sale items to a single customer, found {expected} and {found}")]
    MixedCustomers { expected: String, found: String },

    #[error("All sale items must transact in the same currency, found {expected} and {found}")]
    MixedCurrencies { expected: String, found: String },

    #[error("Invoice customer {invoice} doesn't match the customer of its sales {sales}")]
    InvoiceCustomerMismatch { invoice: String, sales: String },
}

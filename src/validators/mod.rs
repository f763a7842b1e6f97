//! Structural checks on account paths and currency codes.

use thiserror::Error;

mod iso4217;

pub use iso4217::Iso4217;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Commodity table lookup failed: {0}")]
pub struct LookupError(pub String);

/// The table of known commodities of the ledger we're importing into.
/// Lookups may be slow or fail, e.g. when the table lives in an external application.
pub trait CommodityTable {
    /// Ok(false) means the lookup succeeded but there is no such currency.
    fn lookup_currency(&self, code: &str) -> Result<bool, LookupError>;
}

impl<T: CommodityTable + ?Sized> CommodityTable for &T {
    fn lookup_currency(&self, code: &str) -> Result<bool, LookupError> {
        (**self).lookup_currency(code)
    }
}

/// An account specification is a colon separated path like "Assets:Current Assets:Cash in Wallet".
/// Every segment must be non-empty and must not start or end with whitespace.
pub fn is_valid_account_specification(account: &str) -> bool {
    account
        .split(':')
        .all(|segment| !segment.is_empty() && segment.trim() == segment && !segment.contains(':'))
}

/// A failing lookup counts as an invalid currency, it is not propagated.
pub fn is_valid_currency(table: &(impl CommodityTable + ?Sized), code: &str) -> bool {
    match table.lookup_currency(code) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("Treating currency {code:?} as invalid: {err}");
            false
        }
    }
}

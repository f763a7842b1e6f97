use std::fmt::{self, Display};

use super::ValidationError;
use crate::validators::is_valid_account_specification;

pub const ACCOUNTS_RECEIVABLE: &str = "Assets:Accounts Receivable";
pub const PETTY_CASH: &str = "Assets:Current Assets:Petty Cash";

/// A colon separated ledger account path, e.g. "Income:Sales".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account(String);

impl Account {
    pub fn new(path: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.into();
        if !is_valid_account_specification(&path) {
            return Err(ValidationError::InvalidAccount(path));
        }
        Ok(Self(path))
    }

    pub fn accounts_receivable() -> Self {
        Self(ACCOUNTS_RECEIVABLE.to_string())
    }

    pub fn petty_cash() -> Self {
        Self(PETTY_CASH.to_string())
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(':')
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

use crate::book::BeancountBook;
use crate::import::{Field, FieldMappings};
use crate::ir::{Account, Currency, Customer};
use crate::validators::Iso4217;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Column names to try for a field, replacing the built-in ones
    #[serde(default)]
    pub fields: HashMap<Field, Vec<String>>,

    #[serde(default)]
    pub book: BookConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookConfig {
    /// If set, only these accounts can be written to
    #[serde(default)]
    pub accounts: Option<Vec<String>>,

    /// If set, only these customers (id to name) can be written to
    #[serde(default)]
    pub customers: Option<HashMap<String, String>>,

    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            accounts: None,
            customers: None,
            default_currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| anyhow!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| anyhow!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, columns) in &self.fields {
            if columns.is_empty() {
                return Err(anyhow!("Field {field} needs at least one column name"));
            }
        }
        self.default_currency()?;
        for account in self.accounts()?.into_iter().flatten() {
            if !matches!(
                account.segments().next(),
                Some("Assets" | "Liabilities" | "Equity" | "Income" | "Expenses")
            ) {
                return Err(anyhow!(
                    "Error in account {account}: Account must start with one of: Assets:, Liabilities:, Equity:, Income:, Expenses:",
                ));
            }
        }
        self.customers()?;
        Ok(())
    }

    pub fn field_mappings(&self) -> FieldMappings {
        FieldMappings::default().with_overrides(
            self.fields
                .iter()
                .map(|(field, columns)| (*field, columns.clone())),
        )
    }

    pub fn default_currency(&self) -> Result<Currency> {
        Currency::new(self.book.default_currency.as_str(), &Iso4217)
            .with_context(|| anyhow!("Error in default currency"))
    }

    fn accounts(&self) -> Result<Option<Vec<Account>>> {
        let Some(accounts) = &self.book.accounts else {
            return Ok(None);
        };
        accounts
            .iter()
            .map(|path| {
                Account::new(path.as_str()).with_context(|| anyhow!("Error in account {path:?}"))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Customer ids are normalized, so `1` and `000001` are the same customer.
    fn customers(&self) -> Result<Option<HashMap<String, String>>> {
        let Some(customers) = &self.book.customers else {
            return Ok(None);
        };
        customers
            .iter()
            .map(|(id, name)| {
                let customer = Customer::parse(name.as_str(), id)
                    .with_context(|| anyhow!("Error in customer {name:?}"))?;
                Ok((customer.id().to_string(), customer.name().to_string()))
            })
            .collect::<Result<HashMap<_, _>>>()
            .map(Some)
    }

    pub fn book(&self) -> Result<BeancountBook> {
        let mut book = BeancountBook::new(self.default_currency()?);
        if let Some(accounts) = self.accounts()? {
            book = book.with_accounts(accounts);
        }
        if let Some(customers) = self.customers()? {
            book = book.with_customers(customers);
        }
        Ok(book)
    }
}

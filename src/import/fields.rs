use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::Record;

/// The logical fields we read from a record, independent of how the input file names its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerName,
    CustomerId,
    Quantity,
    UnitPrice,
    Description,
    Note,
    IncomeAccount,
    SaleDate,
    Currency,
    PostDate,
    DueDate,
    ReceivableAccount,
    PaymentAmount,
    Refund,
    Memo,
    PaymentDate,
    PostedAccount,
    PaymentTransferAccount,
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::CustomerName,
        Field::CustomerId,
        Field::Quantity,
        Field::UnitPrice,
        Field::Description,
        Field::Note,
        Field::IncomeAccount,
        Field::SaleDate,
        Field::Currency,
        Field::PostDate,
        Field::DueDate,
        Field::ReceivableAccount,
        Field::PaymentAmount,
        Field::Refund,
        Field::Memo,
        Field::PaymentDate,
        Field::PostedAccount,
        Field::PaymentTransferAccount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::CustomerId => "customer_id",
            Field::Quantity => "quantity",
            Field::UnitPrice => "unit_price",
            Field::Description => "description",
            Field::Note => "note",
            Field::IncomeAccount => "income_account",
            Field::SaleDate => "sale_date",
            Field::Currency => "currency",
            Field::PostDate => "post_date",
            Field::DueDate => "due_date",
            Field::ReceivableAccount => "receivable_account",
            Field::PaymentAmount => "payment_amount",
            Field::Refund => "refund",
            Field::Memo => "memo",
            Field::PaymentDate => "payment_date",
            Field::PostedAccount => "posted_account",
            Field::PaymentTransferAccount => "payment_transfer_account",
        }
    }

    fn default_columns(self) -> &'static [&'static str] {
        match self {
            Field::CustomerName => &["CUSTOMER_NAME", "NAME"],
            Field::CustomerId => &["CUSTOMER_ID"],
            Field::Quantity => &["ITEMS_SOLD", "QUANTITY"],
            Field::UnitPrice => &["UNIT_PRICE"],
            Field::Description => &["SALE_DESCRIPTION", "DESCRIPTION"],
            Field::Note => &["SALE_NOTE", "NOTE"],
            Field::IncomeAccount => &["INCOME_ACCOUNT"],
            Field::SaleDate => &["SALE_DATE", "DATE"],
            Field::Currency => &["CURRENCY"],
            Field::PostDate => &["POST_DATE"],
            Field::DueDate => &["DUE_DATE"],
            Field::ReceivableAccount => &["RECEIVABLE_ACCOUNT"],
            Field::PaymentAmount => &["PAYMENT_AMOUNT", "PAYMENT_RECEIVED"],
            Field::Refund => &["REFUND"],
            Field::Memo => &["PAYMENT_MEMO", "MEMO"],
            Field::PaymentDate => &["PAYMENT_DATE", "DATE"],
            Field::PostedAccount => &["POSTED_ACCOUNT", "RELATED_INVOICE_POSTAGE_AC"],
            Field::PaymentTransferAccount => &["PAYMENT_TRANSFER_ACCOUNT"],
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// For each logical field, the column names that may hold it, highest precedence first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappings {
    columns: HashMap<Field, Vec<String>>,
}

impl Default for FieldMappings {
    fn default() -> Self {
        Self {
            columns: Field::ALL
                .into_iter()
                .map(|field| {
                    let columns = field
                        .default_columns()
                        .iter()
                        .map(|column| column.to_string())
                        .collect();
                    (field, columns)
                })
                .collect(),
        }
    }
}

impl FieldMappings {
    /// Replaces the column list of each given field, other fields keep their columns.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (Field, Vec<String>)>) -> Self {
        self.columns.extend(overrides);
        self
    }

    pub fn columns(&self, field: Field) -> &[String] {
        self.columns.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the value of the first column for `field` that has a non-empty value in `record`.
    pub fn resolve<'r>(&self, field: Field, record: &'r Record) -> Option<&'r str> {
        self.columns(field)
            .iter()
            .find_map(|column| record.get(column))
    }
}

#[cfg(test)]
mod tests {
    use common_macros::hash_map;

    use super::*;

    fn record(cells: HashMap<&str, &str>) -> Record {
        Record::new(1, cells)
    }

    #[test]
    fn first_alias_wins() {
        let record = record(hash_map! {"CUSTOMER_NAME" => "Anna", "NAME" => "Karenina"});
        assert_eq!(
            Some("Anna"),
            FieldMappings::default().resolve(Field::CustomerName, &record)
        );
    }

    #[test]
    fn falls_back_to_later_alias() {
        let record = record(hash_map! {"NAME" => "Karenina"});
        assert_eq!(
            Some("Karenina"),
            FieldMappings::default().resolve(Field::CustomerName, &record)
        );
    }

    #[test]
    fn skips_empty_values() {
        let record = record(hash_map! {"CUSTOMER_NAME" => "", "NAME" => "Karenina"});
        assert_eq!(
            Some("Karenina"),
            FieldMappings::default().resolve(Field::CustomerName, &record)
        );
    }

    #[test]
    fn absent() {
        let record = record(hash_map! {"CUSTOMER_NAME" => "", "OTHER" => "Karenina"});
        assert_eq!(None, FieldMappings::default().resolve(Field::CustomerName, &record));
    }

    #[test]
    fn shared_date_column() {
        let record = record(hash_map! {"DATE" => "2024-01-01"});
        let mappings = FieldMappings::default();
        assert_eq!(Some("2024-01-01"), mappings.resolve(Field::SaleDate, &record));
        assert_eq!(Some("2024-01-01"), mappings.resolve(Field::PaymentDate, &record));
    }

    #[test]
    fn every_field_has_columns() {
        let mappings = FieldMappings::default();
        for field in Field::ALL {
            assert!(!mappings.columns(field).is_empty(), "{field} has no columns");
        }
    }

    #[test]
    fn overrides() {
        let mappings = FieldMappings::default()
            .with_overrides([(Field::CustomerName, vec!["KUNDE".to_string()])]);
        let record = record(hash_map! {"CUSTOMER_NAME" => "Anna", "KUNDE" => "Kitty"});
        assert_eq!(Some("Kitty"), mappings.resolve(Field::CustomerName, &record));
        assert_eq!(&["CUSTOMER_ID".to_string()], mappings.columns(Field::CustomerId));
    }

    #[test]
    fn deserializes_snake_case() {
        let field: Field = serde_yaml::from_str("payment_transfer_account").unwrap();
        assert_eq!(Field::PaymentTransferAccount, field);
        assert_eq!("payment_transfer_account", field.to_string());
    }
}

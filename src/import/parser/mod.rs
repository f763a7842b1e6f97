use chrono::NaiveDate;

use super::classify::{is_valid_payment_record, is_valid_sale_record};
use super::{Field, FieldMappings, ImportError, Record};
use crate::ir::{
    Account, Currency, Customer, Invoice, Payment, Sale, SalesList, Transaction, ValidationError,
    DEFAULT_MEMO,
};
use crate::validators::CommodityTable;

pub mod utils;

/// What a single record turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecord {
    None,
    InvoiceOnly(Invoice),
    PaymentOnly(Payment),
    Both(Invoice, Payment),
}

impl ParsedRecord {
    fn from_parts(invoice: Option<Invoice>, payment: Option<Payment>) -> Self {
        match (invoice, payment) {
            (None, None) => ParsedRecord::None,
            (Some(invoice), None) => ParsedRecord::InvoiceOnly(invoice),
            (None, Some(payment)) => ParsedRecord::PaymentOnly(payment),
            (Some(invoice), Some(payment)) => ParsedRecord::Both(invoice, payment),
        }
    }

    /// The invoice, if any, comes before the payment.
    pub fn into_transactions(self) -> Vec<Transaction> {
        match self {
            ParsedRecord::None => vec![],
            ParsedRecord::InvoiceOnly(invoice) => vec![invoice.into()],
            ParsedRecord::PaymentOnly(payment) => vec![payment.into()],
            ParsedRecord::Both(invoice, payment) => vec![invoice.into(), payment.into()],
        }
    }
}

/// Turns records into invoices and payments.
///
/// `today` is the post date of invoices whose record doesn't name one.
pub struct RecordParser<'a> {
    mappings: &'a FieldMappings,
    commodities: &'a dyn CommodityTable,
    today: NaiveDate,
}

impl<'a> RecordParser<'a> {
    pub fn new(
        mappings: &'a FieldMappings,
        commodities: &'a dyn CommodityTable,
        today: NaiveDate,
    ) -> Self {
        Self {
            mappings,
            commodities,
            today,
        }
    }

    pub fn mappings(&self) -> &FieldMappings {
        self.mappings
    }

    pub fn parse_record(&self, record: &Record) -> Result<ParsedRecord, ImportError> {
        let invoice = if is_valid_sale_record(self.mappings, record) {
            Some(self.parse_invoice(record)?)
        } else {
            None
        };
        let payment = if is_valid_payment_record(self.mappings, record) {
            Some(self.parse_payment(record)?)
        } else {
            None
        };
        Ok(ParsedRecord::from_parts(invoice, payment))
    }

    fn parse_invoice(&self, record: &Record) -> Result<Invoice, ImportError> {
        let customer = self.parse_customer(record)?;
        let sales = SalesList::single(self.parse_sale(record, customer.clone())?);
        let post_date = self
            .optional(record, Field::PostDate, utils::date)?
            .unwrap_or(self.today);
        let due_date = self.optional(record, Field::DueDate, utils::date)?;
        let receivable_account = self
            .optional(record, Field::ReceivableAccount, |v| Account::new(v))?
            .unwrap_or_else(Account::accounts_receivable);
        Invoice::new(
            customer,
            sales,
            Some(post_date),
            due_date,
            receivable_account,
            None,
        )
        .map_err(|source| ImportError::InvalidRecord {
            row: record.row(),
            source,
        })
    }

    fn parse_sale(&self, record: &Record, customer: Customer) -> Result<Sale, ImportError> {
        let description = self.required(record, Field::Description, |v| Ok(v.to_string()))?;
        let quantity = self.required(record, Field::Quantity, utils::quantity)?;
        let unit_price = self.required(record, Field::UnitPrice, utils::decimal)?;
        let notes = self
            .optional(record, Field::Note, |v| Ok(v.to_string()))?
            .unwrap_or_default();
        let income_account = self.required(record, Field::IncomeAccount, |v| Account::new(v))?;
        let date = self.required(record, Field::SaleDate, utils::date)?;
        let currency = self.required(record, Field::Currency, |v| {
            Currency::new(v, self.commodities)
        })?;
        Sale::new(
            customer,
            description,
            quantity,
            unit_price,
            notes,
            income_account,
            date,
            currency,
        )
        .map_err(|source| match source {
            ValidationError::InvalidQuantity(_) => ImportError::InvalidField {
                row: record.row(),
                field: Field::Quantity,
                source,
            },
            source => ImportError::InvalidRecord {
                row: record.row(),
                source,
            },
        })
    }

    fn parse_payment(&self, record: &Record) -> Result<Payment, ImportError> {
        let customer = self.parse_customer(record)?;
        let amount = self.required(record, Field::PaymentAmount, utils::decimal)?;
        let date = self.required(record, Field::PaymentDate, utils::date)?;
        let mut payment = Payment::new(customer, amount, date);
        if let Some(refund) = self.optional(record, Field::Refund, utils::decimal)? {
            payment.refund = refund;
        }
        payment.memo = self
            .optional(record, Field::Memo, |v| Ok(v.to_string()))?
            .unwrap_or_else(|| DEFAULT_MEMO.to_string());
        if let Some(account) = self.optional(record, Field::PostedAccount, |v| Account::new(v))? {
            payment.posted_account = account;
        }
        if let Some(account) =
            self.optional(record, Field::PaymentTransferAccount, |v| Account::new(v))?
        {
            payment.transfer_account = account;
        }
        payment
            .net_amount()
            .map_err(|source| ImportError::InvalidRecord {
                row: record.row(),
                source,
            })?;
        if payment.amount.is_sign_negative() || payment.refund > payment.amount {
            log::warn!(
                "Row {}: unusual payment of {} with refund {}",
                record.row(),
                payment.amount,
                payment.refund
            );
        }
        Ok(payment)
    }

    fn parse_customer(&self, record: &Record) -> Result<Customer, ImportError> {
        let name = self.required(record, Field::CustomerName, |v| Ok(v.to_string()))?;
        self.required(record, Field::CustomerId, |id| Customer::parse(name, id))
    }

    fn optional<T>(
        &self,
        record: &Record,
        field: Field,
        parse: impl FnOnce(&str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>, ImportError> {
        self.mappings
            .resolve(field, record)
            .map(parse)
            .transpose()
            .map_err(|source| ImportError::InvalidField {
                row: record.row(),
                field,
                source,
            })
    }

    fn required<T>(
        &self,
        record: &Record,
        field: Field,
        parse: impl FnOnce(&str) -> Result<T, ValidationError>,
    ) -> Result<T, ImportError> {
        self.optional(record, field, parse)?
            .ok_or(ImportError::MissingField {
                row: record.row(),
                field,
            })
    }
}

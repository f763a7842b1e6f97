use indexmap::{map::Entry, IndexMap};
use rust_decimal::Decimal;
use std::hash::Hash;

use crate::import::{is_valid_record, ImportError, Record, RecordParser};
use crate::ir::{Invoice, Payment, SalesList, Transaction, ValidationError};

/// The result of parsing a batch of records.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBatch {
    pub transactions: Vec<Transaction>,
    /// Rows that were neither a sale nor a payment
    pub skipped_rows: Vec<usize>,
}

impl ParsedBatch {
    pub fn invoices(&self) -> impl Iterator<Item = &Invoice> {
        self.transactions.iter().filter_map(|transaction| match transaction {
            Transaction::Invoice(invoice) => Some(invoice),
            Transaction::Payment(_) => None,
        })
    }

    pub fn payments(&self) -> impl Iterator<Item = &Payment> {
        self.transactions.iter().filter_map(|transaction| match transaction {
            Transaction::Invoice(_) => None,
            Transaction::Payment(payment) => Some(payment),
        })
    }

    /// Sum of all payments, net of refunds
    pub fn total_payments(&self) -> Result<Decimal, ValidationError> {
        self.payments().try_fold(Decimal::ZERO, |total, payment| {
            let net_amount = payment.net_amount()?;
            total.checked_add(net_amount).ok_or_else(|| {
                ValidationError::AmountOutOfRange(format!("{total} + {net_amount}"))
            })
        })
    }

    pub fn invoiced_units(&self) -> f64 {
        self.invoices()
            .map(|invoice| invoice.sales().total_quantity())
            .sum()
    }
}

/// Parses all records in order. The first record that fails to parse aborts the batch.
///
/// With `merge`, invoices to the same customer are merged, see [merge_invoices_by_customer].
pub fn parse_batch(
    parser: &RecordParser<'_>,
    records: &[Record],
    merge: bool,
) -> Result<ParsedBatch, ImportError> {
    log::info!("Parsing {} records...", records.len());
    let mut transactions = Vec::new();
    let mut skipped_rows = Vec::new();
    for record in records {
        if !is_valid_record(parser.mappings(), record) {
            log::warn!(
                "Skipping row {}: it is neither a sale nor a payment",
                record.row()
            );
            skipped_rows.push(record.row());
            continue;
        }
        let parsed = parser.parse_record(record)?;
        transactions.extend(
            parsed
                .into_transactions()
                .into_iter()
                .map(|transaction| (record.row(), transaction)),
        );
    }
    let transactions = if merge {
        merge_numbered(transactions)
            .map_err(|(row, source)| ImportError::InvalidRecord { row, source })?
    } else {
        transactions
            .into_iter()
            .map(|(_row, transaction)| transaction)
            .collect()
    };
    log::info!("Parsing {} records...done", records.len());
    Ok(ParsedBatch {
        transactions,
        skipped_rows,
    })
}

/// Merges all invoices with the same customer name into the first of them, which then carries
/// the sales of all of them in their original order. Invoices come first, ordered by the first
/// appearance of their customer, followed by all payments in their original order.
///
/// Fails if invoices sharing a customer name differ in customer ID or currency.
pub fn merge_invoices_by_customer(
    transactions: Vec<Transaction>,
) -> Result<Vec<Transaction>, ValidationError> {
    merge_numbered(transactions.into_iter().enumerate().collect()).map_err(|(_, err)| err)
}

/// Each transaction is paired with a number identifying where it came from,
/// errors report the number of the invoice that couldn't be merged.
fn merge_numbered(
    transactions: Vec<(usize, Transaction)>,
) -> Result<Vec<Transaction>, (usize, ValidationError)> {
    let mut invoices = Vec::new();
    let mut payments = Vec::new();
    for (number, transaction) in transactions {
        match transaction {
            Transaction::Invoice(invoice) => invoices.push((number, invoice)),
            Transaction::Payment(payment) => payments.push(payment),
        }
    }

    let num_invoices = invoices.len();
    let grouped = group_by(invoices.into_iter(), |(_, invoice)| {
        invoice.customer().name().to_string()
    });

    let mut merged = Vec::with_capacity(grouped.len() + payments.len());
    for (_customer_name, group) in grouped {
        let mut group = group.into_iter();
        let Some((first_number, first)) = group.next() else {
            continue;
        };
        let mut rest = group.peekable();
        if rest.peek().is_none() {
            merged.push(Transaction::Invoice(first));
            continue;
        }
        let mut sales = first.sales().clone();
        for (number, invoice) in rest {
            sales = SalesList::concat([sales, invoice.into_sales()])
                .map_err(|err| (number, err))?;
        }
        let invoice = first
            .with_sales(sales)
            .map_err(|err| (first_number, err))?;
        merged.push(Transaction::Invoice(invoice));
    }
    log::debug!("Merged {} invoices into {}", num_invoices, merged.len());
    merged.extend(payments.into_iter().map(Transaction::Payment));
    Ok(merged)
}

/// Like a `HashMap` based grouping, but groups keep the order in which their keys first appeared.
fn group_by<T, K>(items: impl Iterator<Item = T>, key_fn: impl Fn(&T) -> K) -> IndexMap<K, Vec<T>>
where
    K: Eq + Hash,
{
    let mut grouped: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        match grouped.entry(key_fn(&item)) {
            Entry::Occupied(mut group) => group.get_mut().push(item),
            Entry::Vacant(group) => {
                group.insert(vec![item]);
            }
        }
    }
    grouped
}

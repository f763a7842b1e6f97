//! Writing imported transactions into a ledger.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ir::{Account, Currency, Customer, Invoice, Payment, Transaction};

mod beancount;

pub use beancount::BeancountBook;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceId(pub String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Rejected by the ledger: {0}")]
    Rejected(String),
}

/// Failure to hand off one transaction. Transactions before it were already written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to write transaction #{number} for customer {customer}: {source}")]
pub struct PostError {
    /// 1-based position of the transaction in the handed off list
    pub number: usize,
    pub customer: String,
    #[source]
    pub source: BookError,
}

/// What's needed to post an invoice to its receivable account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePosting<'a> {
    pub receivable_account: &'a Account,
    pub post_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub description: String,
}

/// The ledger that imported invoices and payments get written to.
pub trait Book {
    fn lookup_account(&self, account: &Account) -> bool;

    fn lookup_customer(&self, customer: &Customer) -> bool;

    fn lookup_currency(&self, currency: &Currency) -> bool;

    /// Creates an unposted invoice carrying one entry per sale.
    fn create_invoice(&mut self, invoice: &Invoice) -> Result<InvoiceId, BookError>;

    fn post_invoice(&mut self, id: &InvoiceId, posting: InvoicePosting<'_>)
        -> Result<(), BookError>;

    fn apply_payment(&mut self, payment: &Payment) -> Result<(), BookError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostingSummary {
    pub invoices_posted: usize,
    pub payments_applied: usize,
}

/// Writes all transactions to the book, in order. Stops at the first one that fails.
pub fn post_transactions(
    book: &mut impl Book,
    transactions: Vec<Transaction>,
) -> Result<PostingSummary, PostError> {
    log::info!("Writing {} transactions...", transactions.len());
    let mut summary = PostingSummary::default();
    for (index, transaction) in transactions.into_iter().enumerate() {
        let customer = transaction.customer().to_string();
        let result = match transaction {
            Transaction::Invoice(invoice) => {
                post_invoice(book, &invoice).map(|()| summary.invoices_posted += 1)
            }
            Transaction::Payment(payment) => {
                apply_payment(book, &payment).map(|()| summary.payments_applied += 1)
            }
        };
        result.map_err(|source| PostError {
            number: index + 1,
            customer,
            source,
        })?;
    }
    log::info!(
        "Writing transactions...done ({} invoices, {} payments)",
        summary.invoices_posted,
        summary.payments_applied
    );
    Ok(summary)
}

fn post_invoice(book: &mut impl Book, invoice: &Invoice) -> Result<(), BookError> {
    check_customer(book, invoice.customer())?;
    if !book.lookup_currency(invoice.currency()) {
        return Err(BookError::CurrencyNotFound(invoice.currency().to_string()));
    }
    for sale in invoice.sales().sales() {
        check_account(book, sale.income_account())?;
    }
    check_account(book, invoice.receivable_account())?;

    let id = book.create_invoice(invoice)?;
    let post_date = invoice.post_date().unwrap_or_else(|| latest_sale_date(invoice));
    log::debug!("Posting invoice {} for {}", id.0, invoice.customer());
    book.post_invoice(
        &id,
        InvoicePosting {
            receivable_account: invoice.receivable_account(),
            post_date,
            due_date: invoice.due_date(),
            description: invoice.description_or_sales_summary(),
        },
    )
}

fn apply_payment(book: &mut impl Book, payment: &Payment) -> Result<(), BookError> {
    check_customer(book, &payment.customer)?;
    check_account(book, &payment.posted_account)?;
    check_account(book, &payment.transfer_account)?;
    log::debug!("Applying payment of {} for {}", payment.amount, payment.customer);
    book.apply_payment(payment)
}

fn check_customer(book: &impl Book, customer: &Customer) -> Result<(), BookError> {
    if book.lookup_customer(customer) {
        Ok(())
    } else {
        Err(BookError::CustomerNotFound(customer.to_string()))
    }
}

fn check_account(book: &impl Book, account: &Account) -> Result<(), BookError> {
    if book.lookup_account(account) {
        Ok(())
    } else {
        Err(BookError::AccountNotFound(account.to_string()))
    }
}

fn latest_sale_date(invoice: &Invoice) -> NaiveDate {
    invoice
        .sales()
        .sales()
        .iter()
        .map(|sale| sale.date())
        .max()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use super::*;
    use crate::ir::{test_sale, SalesList};

    /// Records every call so tests can check what was written.
    #[derive(Default)]
    struct RecordingBook {
        unknown_accounts: HashSet<String>,
        unknown_customers: HashSet<String>,
        created: Vec<String>,
        posted: Vec<(InvoiceId, String, NaiveDate, String)>,
        payments: Vec<Decimal>,
    }

    impl Book for RecordingBook {
        fn lookup_account(&self, account: &Account) -> bool {
            !self.unknown_accounts.contains(account.path())
        }

        fn lookup_customer(&self, customer: &Customer) -> bool {
            !self.unknown_customers.contains(customer.id())
        }

        fn lookup_currency(&self, currency: &Currency) -> bool {
            currency.code() != "EUR"
        }

        fn create_invoice(&mut self, invoice: &Invoice) -> Result<InvoiceId, BookError> {
            self.created.push(invoice.customer().name().to_string());
            Ok(InvoiceId(format!("{}", self.created.len())))
        }

        fn post_invoice(
            &mut self,
            id: &InvoiceId,
            posting: InvoicePosting<'_>,
        ) -> Result<(), BookError> {
            self.posted.push((
                id.clone(),
                posting.receivable_account.to_string(),
                posting.post_date,
                posting.description,
            ));
            Ok(())
        }

        fn apply_payment(&mut self, payment: &Payment) -> Result<(), BookError> {
            self.payments.push(payment.net_amount().unwrap());
            Ok(())
        }
    }

    fn anna() -> Customer {
        Customer::new("Anna Karenina", 1)
    }

    fn invoice(currency: &str, post_date: Option<NaiveDate>) -> Transaction {
        let sales = SalesList::new(vec![
            test_sale(anna(), currency, "Tea"),
            test_sale(anna(), currency, "Jam"),
        ])
        .unwrap();
        Invoice::new(anna(), sales, post_date, None, Account::accounts_receivable(), None)
            .unwrap()
            .into()
    }

    fn payment() -> Transaction {
        let mut payment = Payment::new(
            anna(),
            Decimal::new(100, 0),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        );
        payment.refund = Decimal::new(30, 0);
        payment.into()
    }

    #[test]
    fn posts_invoices_and_applies_payments() {
        let mut book = RecordingBook::default();
        let post_date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let summary =
            post_transactions(&mut book, vec![invoice("NPR", Some(post_date)), payment()]).unwrap();
        assert_eq!(
            PostingSummary {
                invoices_posted: 1,
                payments_applied: 1
            },
            summary
        );
        assert_eq!(vec!["Anna Karenina".to_string()], book.created);
        assert_eq!(
            vec![(
                InvoiceId("1".to_string()),
                "Assets:Accounts Receivable".to_string(),
                post_date,
                "Tea; Jam".to_string()
            )],
            book.posted
        );
        assert_eq!(vec![Decimal::new(70, 0)], book.payments);
    }

    #[test]
    fn invoice_without_post_date_uses_sale_date() {
        let mut book = RecordingBook::default();
        post_transactions(&mut book, vec![invoice("NPR", None)]).unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), book.posted[0].2);
    }

    #[test]
    fn unknown_customer() {
        let mut book = RecordingBook::default();
        book.unknown_customers.insert("000001".to_string());
        let err = post_transactions(&mut book, vec![payment()]).unwrap_err();
        assert_eq!(
            PostError {
                number: 1,
                customer: "Anna Karenina (000001)".to_string(),
                source: BookError::CustomerNotFound("Anna Karenina (000001)".to_string()),
            },
            err
        );
        assert!(book.payments.is_empty());
    }

    #[test]
    fn unknown_income_account_stops_before_creating() {
        let mut book = RecordingBook::default();
        book.unknown_accounts.insert("Income:Sales".to_string());
        let err = post_transactions(&mut book, vec![payment(), invoice("NPR", None)]).unwrap_err();
        assert_eq!(2, err.number);
        assert_eq!(BookError::AccountNotFound("Income:Sales".to_string()), err.source);
        assert!(book.created.is_empty());
        assert_eq!(1, book.payments.len());
    }

    #[test]
    fn unknown_transfer_account() {
        let mut book = RecordingBook::default();
        book.unknown_accounts
            .insert("Assets:Current Assets:Petty Cash".to_string());
        let err = post_transactions(&mut book, vec![payment()]).unwrap_err();
        assert_eq!(
            BookError::AccountNotFound("Assets:Current Assets:Petty Cash".to_string()),
            err.source
        );
    }

    #[test]
    fn unknown_currency() {
        let mut book = RecordingBook::default();
        let err = post_transactions(&mut book, vec![invoice("EUR", None)]).unwrap_err();
        assert_eq!(BookError::CurrencyNotFound("EUR".to_string()), err.source);
    }
}

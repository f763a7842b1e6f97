//! Validated intermediate representation of what gets written to the ledger.

mod account;
mod currency;
mod customer;
mod error;
mod invoice;
mod payment;
mod sale;

pub use account::{Account, ACCOUNTS_RECEIVABLE, PETTY_CASH};
pub use currency::Currency;
pub use customer::Customer;
pub use error::ValidationError;
pub use invoice::Invoice;
pub use payment::{Payment, DEFAULT_MEMO};
pub use sale::{Sale, SalesList};

#[cfg(test)]
pub(crate) use sale::tests::sale as test_sale;

/// What the import hands off to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Invoice(Invoice),
    Payment(Payment),
}

impl Transaction {
    pub fn customer(&self) -> &Customer {
        match self {
            Transaction::Invoice(invoice) => invoice.customer(),
            Transaction::Payment(payment) => &payment.customer,
        }
    }
}

impl From<Invoice> for Transaction {
    fn from(invoice: Invoice) -> Self {
        Transaction::Invoice(invoice)
    }
}

impl From<Payment> for Transaction {
    fn from(payment: Payment) -> Self {
        Transaction::Payment(payment)
    }
}

use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    io::Write,
};

use anyhow::Result;
use beancount_core::{
    metadata::MetaValue, AccountType, Directive, Flag, IncompleteAmount, Ledger, Posting,
};
use common_macros::{hash_map, hash_set};
use rust_decimal::Decimal;

use super::{Book, BookError, InvoiceId, InvoicePosting};
use crate::{
    ir::{Account, Currency, Customer, Invoice, Payment},
    validators::{self, Iso4217},
};

/// A book that turns invoices and payments into beancount transactions.
pub struct BeancountBook {
    default_currency: Currency,
    /// `None` means any account with a valid root is accepted
    accounts: Option<HashSet<String>>,
    /// Customer id to name. `None` means any customer is accepted.
    customers: Option<HashMap<String, String>>,
    last_invoice_number: u64,
    created_invoices: HashMap<InvoiceId, Invoice>,
    customer_currencies: HashMap<String, Currency>,
    directives: Vec<Directive<'static>>,
}

impl BeancountBook {
    pub fn new(default_currency: Currency) -> Self {
        Self {
            default_currency,
            accounts: None,
            customers: None,
            last_invoice_number: 0,
            created_invoices: HashMap::new(),
            customer_currencies: HashMap::new(),
            directives: vec![],
        }
    }

    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Account>) -> Self {
        self.accounts = Some(
            accounts
                .into_iter()
                .map(|account| account.path().to_string())
                .collect(),
        );
        self
    }

    pub fn with_customers(mut self, customers: HashMap<String, String>) -> Self {
        self.customers = Some(customers);
        self
    }

    pub fn directives(&self) -> &[Directive<'static>] {
        &self.directives
    }

    pub fn render(self, writer: &mut impl Write) -> Result<()> {
        let ledger = Ledger {
            directives: self.directives,
        };
        beancount_render::render(writer, &ledger)?;
        Ok(())
    }

    fn currency_for(&self, customer: &Customer) -> &Currency {
        self.customer_currencies
            .get(customer.id())
            .unwrap_or(&self.default_currency)
    }
}

impl Book for BeancountBook {
    fn lookup_account(&self, account: &Account) -> bool {
        if account_to_beancount(account).is_err() {
            return false;
        }
        match &self.accounts {
            None => true,
            Some(accounts) => accounts.contains(account.path()),
        }
    }

    fn lookup_customer(&self, customer: &Customer) -> bool {
        let Some(customers) = &self.customers else {
            return true;
        };
        match customers.get(customer.id()) {
            None => false,
            Some(name) => {
                if name != customer.name() {
                    log::warn!(
                        "Customer {} is known as {name:?} in the book",
                        customer,
                    );
                }
                true
            }
        }
    }

    fn lookup_currency(&self, currency: &Currency) -> bool {
        validators::is_valid_currency(&Iso4217, currency.code())
    }

    fn create_invoice(&mut self, invoice: &Invoice) -> Result<InvoiceId, BookError> {
        self.last_invoice_number += 1;
        let id = InvoiceId(format!("{:06}", self.last_invoice_number));
        self.customer_currencies
            .insert(invoice.customer().id().to_string(), invoice.currency().clone());
        self.created_invoices.insert(id.clone(), invoice.clone());
        Ok(id)
    }

    fn post_invoice(
        &mut self,
        id: &InvoiceId,
        posting: InvoicePosting<'_>,
    ) -> Result<(), BookError> {
        let invoice = self
            .created_invoices
            .remove(id)
            .ok_or_else(|| BookError::InvoiceNotFound(id.0.clone()))?;
        let currency = invoice.currency().code().to_string();

        let mut postings = vec![posting_for(
            posting.receivable_account,
            invoice.sales().total(),
            &currency,
        )?];
        for sale in invoice.sales().sales() {
            postings.push(posting_for(sale.income_account(), -sale.total(), &currency)?);
        }

        let mut meta = hash_map![
            Cow::Borrowed("invoice_id") => MetaValue::Text(Cow::Owned(id.0.clone())),
            Cow::Borrowed("customer_id") => MetaValue::Text(Cow::Owned(invoice.customer().id().to_string())),
        ];
        if let Some(due_date) = posting.due_date {
            meta.insert(Cow::Borrowed("due_date"), MetaValue::Date(due_date.into()));
        }
        self.directives
            .push(Directive::Transaction(beancount_core::Transaction {
                date: posting.post_date.into(),
                flag: Flag::Okay,
                payee: Some(Cow::Owned(invoice.customer().name().to_string())),
                narration: Cow::Owned(posting.description),
                tags: hash_set![],
                links: hash_set![],
                postings,
                meta,
                source: None,
            }));
        Ok(())
    }

    fn apply_payment(&mut self, payment: &Payment) -> Result<(), BookError> {
        let currency = self.currency_for(&payment.customer).code().to_string();
        let amount = payment
            .net_amount()
            .map_err(|err| BookError::Rejected(err.to_string()))?;
        let postings = vec![
            posting_for(&payment.transfer_account, amount, &currency)?,
            posting_for(&payment.posted_account, -amount, &currency)?,
        ];

        let mut meta = hash_map![
            Cow::Borrowed("customer_id") => MetaValue::Text(Cow::Owned(payment.customer.id().to_string())),
        ];
        if !payment.refund.is_zero() {
            meta.insert(
                Cow::Borrowed("refund"),
                MetaValue::Text(Cow::Owned(payment.refund.to_string())),
            );
        }
        self.directives
            .push(Directive::Transaction(beancount_core::Transaction {
                date: payment.date.into(),
                flag: Flag::Okay,
                payee: Some(Cow::Owned(payment.customer.name().to_string())),
                narration: Cow::Owned(payment.memo.clone()),
                tags: hash_set![],
                links: hash_set![],
                postings,
                meta,
                source: None,
            }));
        Ok(())
    }
}

fn posting_for(
    account: &Account,
    amount: Decimal,
    currency: &str,
) -> Result<Posting<'static>, BookError> {
    Ok(Posting {
        account: account_to_beancount(account)?,
        units: IncompleteAmount {
            num: Some(amount),
            currency: Some(Cow::Owned(currency.to_string())),
        },
        cost: None,
        price: None,
        flag: None,
        meta: hash_map![],
    })
}

/// Beancount account names can't contain whitespace, so "Accounts Receivable" becomes "Accounts-Receivable".
fn account_to_beancount(account: &Account) -> Result<beancount_core::Account<'static>, BookError> {
    let mut segments = account.segments();
    let ty = match segments.next() {
        Some("Assets") => AccountType::Assets,
        Some("Liabilities") => AccountType::Liabilities,
        Some("Equity") => AccountType::Equity,
        Some("Income") => AccountType::Income,
        Some("Expenses") => AccountType::Expenses,
        _ => {
            return Err(BookError::Rejected(format!(
                "Account {account} must start with one of: Assets:, Liabilities:, Equity:, Income:, Expenses:"
            )))
        }
    };
    let parts = segments
        .map(|segment| Cow::Owned(segment.split_whitespace().collect::<Vec<_>>().join("-")))
        .collect();
    Ok(beancount_core::Account { ty, parts })
}

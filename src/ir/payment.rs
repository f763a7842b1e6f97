use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Account, Customer, ValidationError};

pub const DEFAULT_MEMO: &str = "Payment Received";

/// Money received from a customer, possibly with a refund.
///
/// Amounts are not checked for sign or magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub customer: Customer,
    pub amount: Decimal,
    pub refund: Decimal,
    pub memo: String,
    pub date: NaiveDate,
    pub posted_account: Account,
    pub transfer_account: Account,
}

impl Payment {
    /// A payment with zero refund, the default memo, and the default accounts.
    pub fn new(customer: Customer, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            customer,
            amount,
            refund: Decimal::ZERO,
            memo: DEFAULT_MEMO.to_string(),
            date,
            posted_account: Account::accounts_receivable(),
            transfer_account: Account::petty_cash(),
        }
    }

    /// payment amount - refund
    pub fn net_amount(&self) -> Result<Decimal, ValidationError> {
        self.amount.checked_sub(self.refund).ok_or_else(|| {
            ValidationError::AmountOutOfRange(format!("{} - {}", self.amount, self.refund))
        })
    }
}

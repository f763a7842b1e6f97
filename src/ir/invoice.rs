use chrono::NaiveDate;

use super::{Account, Currency, Customer, Sale, SalesList, ValidationError};

/// A bundle of sales billed together to one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    customer: Customer,
    sales: SalesList,
    post_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    receivable_account: Account,
    description: Option<String>,
}

impl Invoice {
    pub fn new(
        customer: Customer,
        sales: SalesList,
        post_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        receivable_account: Account,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        if &customer != sales.customer() {
            return Err(ValidationError::InvoiceCustomerMismatch {
                invoice: customer.to_string(),
                sales: sales.customer().to_string(),
            });
        }
        Ok(Self {
            customer,
            sales,
            post_date,
            due_date,
            receivable_account,
            description,
        })
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn sales(&self) -> &SalesList {
        &self.sales
    }

    pub fn currency(&self) -> &Currency {
        self.sales.currency()
    }

    pub fn post_date(&self) -> Option<NaiveDate> {
        self.post_date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn receivable_account(&self) -> &Account {
        &self.receivable_account
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The explicit description, or the descriptions of all sales joined with "; ".
    pub fn description_or_sales_summary(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => self
                .sales
                .sales()
                .iter()
                .map(Sale::description)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    /// Replaces the sales list wholesale. The new list must belong to the same customer.
    pub fn with_sales(self, sales: SalesList) -> Result<Self, ValidationError> {
        Self::new(
            self.customer,
            sales,
            self.post_date,
            self.due_date,
            self.receivable_account,
            self.description,
        )
    }

    pub fn into_sales(self) -> SalesList {
        self.sales
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::sale::tests::sale;

    fn anna() -> Customer {
        Customer::new("Anna Karenina", 1)
    }

    fn invoice(sales: SalesList, description: Option<&str>) -> Invoice {
        Invoice::new(
            anna(),
            sales,
            NaiveDate::from_ymd_opt(2024, 3, 2),
            None,
            Account::accounts_receivable(),
            description.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn customer_must_match_sales() {
        let sales = SalesList::single(sale(Customer::new("Vronsky", 2), "NPR", "Horse"));
        assert_eq!(
            Err(ValidationError::InvoiceCustomerMismatch {
                invoice: "Anna Karenina (000001)".to_string(),
                sales: "Vronsky (000002)".to_string(),
            }),
            Invoice::new(anna(), sales, None, None, Account::accounts_receivable(), None)
        );
    }

    #[test]
    fn explicit_description() {
        let invoice = invoice(SalesList::single(sale(anna(), "NPR", "Tea")), Some("March"));
        assert_eq!(Some("March"), invoice.description());
        assert_eq!("March", invoice.description_or_sales_summary());
    }

    #[test]
    fn synthesized_description() {
        let sales = SalesList::new(vec![sale(anna(), "NPR", "Tea"), sale(anna(), "NPR", "Jam")]).unwrap();
        let invoice = invoice(sales, None);
        assert_eq!(None, invoice.description());
        assert_eq!("Tea; Jam", invoice.description_or_sales_summary());
    }

    #[test]
    fn with_sales_keeps_header() {
        let original = invoice(SalesList::single(sale(anna(), "NPR", "Tea")), None);
        let sales = SalesList::new(vec![sale(anna(), "NPR", "Tea"), sale(anna(), "NPR", "Jam")]).unwrap();
        let replaced = original.clone().with_sales(sales.clone()).unwrap();
        assert_eq!(&sales, replaced.sales());
        assert_eq!(original.post_date(), replaced.post_date());
        assert_eq!(original.receivable_account(), replaced.receivable_account());
        assert_eq!("NPR", replaced.currency().code());
    }

    #[test]
    fn with_sales_of_other_customer() {
        let original = invoice(SalesList::single(sale(anna(), "NPR", "Tea")), None);
        let sales = SalesList::single(sale(Customer::new("Vronsky", 2), "NPR", "Horse"));
        assert!(matches!(
            original.with_sales(sales),
            Err(ValidationError::InvoiceCustomerMismatch { .. })
        ));
    }
}

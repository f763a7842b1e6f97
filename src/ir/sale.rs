use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive as _;
use rust_decimal::Decimal;

use super::{Account, Currency, Customer, ValidationError};

/// One line item sold to a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    customer: Customer,
    description: String,
    quantity: f64,
    unit_price: Decimal,
    notes: String,
    income_account: Account,
    date: NaiveDate,
    currency: Currency,
    total: Decimal,
}

impl Sale {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer: Customer,
        description: String,
        quantity: f64,
        unit_price: Decimal,
        notes: String,
        income_account: Account,
        date: NaiveDate,
        currency: Currency,
    ) -> Result<Self, ValidationError> {
        let exact_quantity = match Decimal::from_f64(quantity) {
            Some(exact_quantity) if quantity.is_finite() => exact_quantity,
            _ => return Err(ValidationError::InvalidQuantity(quantity.to_string())),
        };
        let total = exact_quantity.checked_mul(unit_price).ok_or_else(|| {
            ValidationError::AmountOutOfRange(format!("{quantity} x {unit_price}"))
        })?;
        Ok(Self {
            customer,
            description,
            quantity,
            unit_price,
            notes,
            income_account,
            date,
            currency,
            total,
        })
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn income_account(&self) -> &Account {
        &self.income_account
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// quantity * unit price
    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// A non-empty list of sales that all go to the same customer in the same currency.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesList {
    sales: Vec<Sale>,
    total: Decimal,
}

impl SalesList {
    pub fn new(sales: Vec<Sale>) -> Result<Self, ValidationError> {
        let Some(first) = sales.first() else {
            return Err(ValidationError::EmptySalesList);
        };
        for sale in &sales[1..] {
            if sale.customer != first.customer {
                return Err(ValidationError::MixedCustomers {
                    expected: first.customer.to_string(),
                    found: sale.customer.to_string(),
                });
            }
            if sale.currency != first.currency {
                return Err(ValidationError::MixedCurrencies {
                    expected: first.currency.to_string(),
                    found: sale.currency.to_string(),
                });
            }
        }
        let total = sales
            .iter()
            .try_fold(Decimal::ZERO, |total, sale| total.checked_add(sale.total))
            .ok_or_else(|| {
                ValidationError::AmountOutOfRange(format!(
                    "total of {} sales to {}",
                    sales.len(),
                    first.customer
                ))
            })?;
        Ok(Self { sales, total })
    }

    pub fn single(sale: Sale) -> Self {
        Self {
            total: sale.total,
            sales: vec![sale],
        }
    }

    /// Concatenates the sales of all lists, keeping their order.
    pub fn concat(lists: impl IntoIterator<Item = SalesList>) -> Result<Self, ValidationError> {
        Self::new(lists.into_iter().flat_map(SalesList::into_sales).collect())
    }

    pub fn customer(&self) -> &Customer {
        &self.sales[0].customer
    }

    pub fn currency(&self) -> &Currency {
        &self.sales[0].currency
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn into_sales(self) -> Vec<Sale> {
        self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn total_quantity(&self) -> f64 {
        self.sales.iter().map(Sale::quantity).sum()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::validators::Iso4217;

    pub fn sale(customer: Customer, currency: &str, description: &str) -> Sale {
        Sale::new(
            customer,
            description.to_string(),
            2.0,
            Decimal::new(1999, 2),
            "Notes".to_string(),
            Account::new("Income:Sales").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Currency::new(currency, &Iso4217).unwrap(),
        )
        .unwrap()
    }

    fn anna() -> Customer {
        Customer::new("Anna Karenina", 1)
    }

    #[test]
    fn rejects_non_finite_quantity() {
        for quantity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Sale::new(
                anna(),
                "Tea".to_string(),
                quantity,
                Decimal::ONE,
                String::new(),
                Account::new("Income:Sales").unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                Currency::new("NPR", &Iso4217).unwrap(),
            );
            assert!(matches!(result, Err(ValidationError::InvalidQuantity(_))));
        }
    }

    fn priced(quantity: f64, unit_price: Decimal) -> Result<Sale, ValidationError> {
        Sale::new(
            anna(),
            "Samovar".to_string(),
            quantity,
            unit_price,
            String::new(),
            Account::new("Income:Sales").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Currency::new("NPR", &Iso4217).unwrap(),
        )
    }

    #[test]
    fn rejects_line_total_out_of_range() {
        assert_eq!(
            Err(ValidationError::AmountOutOfRange(
                "100000000000000000000 x 10000000000".to_string()
            )),
            priced(1e20, Decimal::new(10_000_000_000, 0))
        );
    }

    #[test]
    fn rejects_list_total_out_of_range() {
        let expensive = priced(1.0, Decimal::MAX).unwrap();
        assert_eq!(Decimal::MAX, expensive.total());
        assert!(matches!(
            SalesList::new(vec![expensive.clone(), expensive]),
            Err(ValidationError::AmountOutOfRange(_))
        ));
    }

    #[test]
    fn total() {
        assert_eq!(Decimal::new(3998, 2), sale(anna(), "NPR", "Tea").total());
    }

    #[test]
    fn empty_list() {
        assert_eq!(Err(ValidationError::EmptySalesList), SalesList::new(vec![]));
    }

    #[test]
    fn mixed_customers() {
        let result = SalesList::new(vec![
            sale(anna(), "NPR", "Tea"),
            sale(Customer::new("Anna Karenina", 2), "NPR", "Tea"),
        ]);
        assert_eq!(
            Err(ValidationError::MixedCustomers {
                expected: "Anna Karenina (000001)".to_string(),
                found: "Anna Karenina (000002)".to_string(),
            }),
            result
        );
    }

    #[test]
    fn mixed_currencies() {
        let result = SalesList::new(vec![sale(anna(), "NPR", "Tea"), sale(anna(), "USD", "Tea")]);
        assert_eq!(
            Err(ValidationError::MixedCurrencies {
                expected: "NPR".to_string(),
                found: "USD".to_string(),
            }),
            result
        );
    }

    #[test]
    fn homogeneous_list() {
        let list = SalesList::new(vec![
            sale(anna(), "NPR", "Tea"),
            sale(anna(), "NPR", "Samovar"),
            sale(anna(), "NPR", "Jam"),
        ])
        .unwrap();
        assert_eq!(3, list.len());
        assert_eq!(&anna(), list.customer());
        assert_eq!("NPR", list.currency().code());
        assert_eq!(6.0, list.total_quantity());
        assert_eq!(Decimal::new(11994, 2), list.total());
    }

    #[test]
    fn concat_keeps_order() {
        let first = SalesList::new(vec![sale(anna(), "NPR", "Tea"), sale(anna(), "NPR", "Jam")]).unwrap();
        let second = SalesList::single(sale(anna(), "NPR", "Samovar"));
        let merged = SalesList::concat([first, second]).unwrap();
        assert_eq!(
            vec!["Tea", "Jam", "Samovar"],
            merged.sales().iter().map(Sale::description).collect::<Vec<_>>()
        );
    }

    #[test]
    fn concat_checks_homogeneity() {
        let first = SalesList::single(sale(anna(), "NPR", "Tea"));
        let second = SalesList::single(sale(anna(), "EUR", "Tea"));
        assert!(matches!(
            SalesList::concat([first, second]),
            Err(ValidationError::MixedCurrencies { .. })
        ));
    }
}

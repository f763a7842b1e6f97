use std::fmt::{self, Display};

use super::ValidationError;
use crate::validators::{is_valid_currency, CommodityTable};

/// A currency known to the ledger's commodity table. Two currencies are equal iff their codes are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    pub fn new(
        code: impl Into<String>,
        commodities: &(impl CommodityTable + ?Sized),
    ) -> Result<Self, ValidationError> {
        let code = code.into();
        if !is_valid_currency(commodities, &code) {
            return Err(ValidationError::UnknownCurrency(code));
        }
        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::Iso4217;

    #[test]
    fn known_currency() {
        let npr = Currency::new("NPR", &Iso4217).unwrap();
        assert_eq!("NPR", npr.code());
        assert_eq!("NPR", npr.to_string());
    }

    #[test]
    fn unknown_currency() {
        assert_eq!(
            Err(ValidationError::UnknownCurrency("LOL".to_string())),
            Currency::new("LOL", &Iso4217)
        );
    }

    #[test]
    fn equality_is_by_code() {
        let a = Currency::new("USD", &Iso4217).unwrap();
        let b = Currency::new("USD".to_string(), &Iso4217).unwrap();
        let c = Currency::new("EUR", &Iso4217).unwrap();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
    }
}

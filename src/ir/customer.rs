use std::fmt::{self, Display};

use super::ValidationError;

/// A customer in the ledger. The ID is stored zero-padded to six digits, e.g. 1 becomes "000001".
/// Two customers are equal iff both name and ID are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Customer {
    name: String,
    id: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id: format!("{id:06}"),
        }
    }

    /// Parses the customer ID from its textual form. Negative or non-integer IDs are rejected.
    pub fn parse(name: impl Into<String>, id: &str) -> Result<Self, ValidationError> {
        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidCustomerId(id.to_string()))?;
        Ok(Self::new(name, id))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

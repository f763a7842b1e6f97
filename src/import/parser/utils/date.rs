use chrono::NaiveDate;

use crate::ir::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn date(content: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(content.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(content.to_string()))
}

mod amount;
mod date;

pub use amount::{decimal, quantity};
pub use date::{date, DATE_FORMAT};

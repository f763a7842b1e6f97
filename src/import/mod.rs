use anyhow::{bail, Context as _, Result};
use std::{collections::HashSet, io::Read};

mod classify;
mod error;
mod fields;
mod parser;
mod record;

pub use classify::{is_valid_payment_record, is_valid_record, is_valid_sale_record};
pub use error::ImportError;
pub use fields::{Field, FieldMappings};
pub use parser::{utils::DATE_FORMAT, ParsedRecord, RecordParser};
pub use record::Record;

/// Reads a CSV file with a header row. Rows are numbered from 1, not counting the header.
pub fn load(mut input_stream: impl Read, delimiter: u8) -> Result<Vec<Record>> {
    log::info!("Loading records...");
    let mut content = String::new();
    input_stream
        .read_to_string(&mut content)
        .context("Failed to read input")?;
    let content = maybe_remove_byte_order_mark(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let mut seen = HashSet::new();
    for header in &headers {
        if !header.is_empty() && !seen.insert(header.as_str()) {
            bail!("Column {header:?} appears more than once in the header row");
        }
    }
    let records = reader
        .records()
        .enumerate()
        .map(|(index, row)| {
            let row = row.with_context(|| format!("Failed to read row {}", index + 1))?;
            Ok(Record::new(
                index + 1,
                headers.iter().cloned().zip(row.iter().map(str::to_string)),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!("Loading records...done ({} records)", records.len());
    Ok(records)
}

fn maybe_remove_byte_order_mark(mut content: String) -> String {
    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }
    content
}

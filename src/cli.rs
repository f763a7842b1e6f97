use anyhow::{anyhow, Context as _, Result};
use console::{pad_str, style, Alignment, StyledObject};
use rust_decimal::Decimal;
use std::{fs::File, io::stdout, path::Path};

use crate::args::Args;
use crate::book;
use crate::config::Config;
use crate::import::{self, RecordParser, DATE_FORMAT};
use crate::ir::{Invoice, Payment};
use crate::operations::{self, ParsedBatch};
use crate::terminal::{self, BulletPointPrinter, LineWriter};
use crate::validators::Iso4217;

pub fn main(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    let delimiter = delimiter(args.delimiter)?;

    let file = File::open(&args.from_csv)
        .with_context(|| anyhow!("Failed to open {}", args.from_csv))?;
    let records = import::load(file, delimiter)?;

    let mappings = config.field_mappings();
    let today = chrono::Local::now().date_naive();
    let parser = RecordParser::new(&mappings, &Iso4217, today);
    let batch = operations::parse_batch(&parser, &records, !args.no_merge)
        .with_context(|| anyhow!("Failed to import {}", args.from_csv))?;

    print_summary(&BulletPointPrinter::new(), &batch)?;
    if batch.transactions.is_empty() {
        println!("{}", style("Nothing to import").italic());
        return Ok(());
    }
    if !args.yes && !terminal::confirm("Write these transactions?")? {
        println!("Aborted, nothing was written");
        return Ok(());
    }

    let mut book = config.book()?;
    book::post_transactions(&mut book, batch.transactions)?;
    match &args.output {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| anyhow!("Failed to create {path}"))?;
            book.render(&mut file)?;
        }
        None => book.render(&mut stdout())?,
    }
    Ok(())
}

fn delimiter(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(anyhow!("Delimiter must be an ASCII character, got {delimiter:?}"))
    }
}

const SUMMARY_WIDTH: usize = 15;

fn print_summary<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    batch: &ParsedBatch,
) -> Result<()> {
    let total_payments = batch
        .total_payments()
        .context("Failed to sum up payments")?;

    println!("{}", style_header("Invoices:"));
    let mut invoices = batch.invoices().peekable();
    if invoices.peek().is_none() {
        printer.print_item(style("(none)").italic());
    }
    for invoice in invoices {
        print_invoice(printer, invoice);
    }

    println!("{}", style_header("Payments:"));
    let mut payments = batch.payments().peekable();
    if payments.peek().is_none() {
        printer.print_item(style("(none)").italic());
    }
    for payment in payments {
        print_payment(printer, payment);
    }

    println!("{}", style_header("Summary:"));
    printer.print_entry("Invoices", batch.invoices().count(), SUMMARY_WIDTH);
    printer.print_entry("Invoiced units", batch.invoiced_units(), SUMMARY_WIDTH);
    printer.print_entry("Payments", batch.payments().count(), SUMMARY_WIDTH);
    printer.print_entry("Total payments", total_payments, SUMMARY_WIDTH);
    if !batch.skipped_rows.is_empty() {
        let rows: Vec<String> = batch.skipped_rows.iter().map(usize::to_string).collect();
        printer.print_item(style(format!("Skipped rows: {}", rows.join(", "))).yellow());
    }
    Ok(())
}

fn print_invoice<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, invoice: &Invoice) {
    printer.print_item(format!(
        "{} {}",
        style_customer(&invoice.customer().to_string()),
        style_amount(invoice.sales().total(), Some(invoice.currency().code())),
    ));
    let printer = printer.indent();
    for sale in invoice.sales().sales() {
        printer.print_item(style_sale(&format!(
            "{} {} x {} {}",
            style_date(&sale.date()),
            sale.quantity(),
            sale.unit_price(),
            sale.description(),
        )));
    }
}

fn print_payment<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, payment: &Payment) {
    let refund = if payment.refund.is_zero() {
        "".to_string()
    } else {
        format!(" (refund {})", payment.refund)
    };
    printer.print_item(format!(
        "{} {} {}{}",
        style_date(&payment.date),
        style_customer(&payment.customer.to_string()),
        style_amount(payment.amount, None),
        refund,
    ));
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_customer(customer: &str) -> StyledObject<&str> {
    style(customer).cyan().bold()
}

fn style_sale(sale: &str) -> StyledObject<&str> {
    style(sale).italic()
}

fn style_date(date: &chrono::NaiveDate) -> StyledObject<String> {
    style(date.format(DATE_FORMAT).to_string())
}

fn style_amount(amount: Decimal, currency: Option<&str>) -> StyledObject<String> {
    let text = match currency {
        Some(currency) => format!("{amount} {currency}"),
        None => amount.to_string(),
    };
    let result = style(pad_str(&text, 15, Alignment::Right, None).into_owned());
    if amount.is_sign_negative() {
        result.red()
    } else {
        result.green()
    }
}

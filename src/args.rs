use clap::Parser;

/// Import invoices and payments from a CSV file and export them to beancount
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the CSV file
    #[clap(short, long)]
    pub from_csv: String,

    /// Path to a YAML config file with column names and book restrictions
    #[clap(short, long)]
    pub config: Option<String>,

    /// Column delimiter of the CSV file
    #[clap(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Keep one invoice per sale instead of one invoice per customer
    #[clap(long)]
    pub no_merge: bool,

    /// Don't ask for confirmation before writing
    #[clap(short, long)]
    pub yes: bool,

    /// Write the beancount ledger to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

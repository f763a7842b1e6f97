use anyhow::Result;

use invoice_import::{args, cli};

fn main() -> Result<()> {
    env_logger::init();

    let args = args::parse();
    cli::main(args)
}

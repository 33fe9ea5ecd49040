use coffee_ledger::COFFEE_SHOP_SCHEMA;

use crate::{cli::SchemaArgs, error::Result};

pub fn run(args: SchemaArgs) -> Result<()> {
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&COFFEE_SHOP_SCHEMA)?);
    } else {
        println!("{}", serde_json::to_string(&COFFEE_SHOP_SCHEMA)?);
    }

    Ok(())
}

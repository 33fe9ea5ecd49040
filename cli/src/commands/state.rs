use serde_json::json;

use crate::{cli::StateArgs, error::Result, store::LedgerFile};

pub fn run(args: StateArgs) -> Result<()> {
    let ledger = LedgerFile::open(&args.ledger)?;
    let deployment = ledger.host.deployment(&args.contract)?;

    let state = json!({
        "contract": args.contract,
        "owner": deployment.shop.owner(),
        "price": deployment.shop.price(),
        "purchase_count": deployment.shop.purchase_count(),
        "balance": deployment.balance,
        "deployed_at": deployment.deployed_at,
    });

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", serde_json::to_string(&state)?);
    }
    Ok(())
}

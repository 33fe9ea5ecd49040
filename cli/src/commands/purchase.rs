use crate::{cli::PurchaseArgs, error::Result, store::LedgerFile, ui};

pub fn run(args: PurchaseArgs) -> Result<()> {
    let mut ledger = LedgerFile::open(&args.ledger)?;
    let buyer = args.from.address();
    let value = match args.value {
        Some(value) => value,
        None => ledger.host.shop(&args.contract)?.price(),
    };

    let receipt = ledger.host.purchase(args.contract, buyer, value)?;
    ledger.save()?;

    let count = ledger.host.shop(&args.contract)?.purchase_count();
    ui::success(format!("Coffee #{count} bought by {buyer}"));
    for event in &receipt.events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

use crate::{cli::DeployArgs, error::Result, store::LedgerFile, ui};

pub fn run(args: DeployArgs) -> Result<()> {
    let mut ledger = LedgerFile::open(&args.ledger)?;
    let owner = args.owner.address();
    let price = args.price.unwrap_or(ledger.config.default_price);

    let contract = ledger.host.deploy(owner, price);
    ledger.save()?;

    ui::success(format!(
        "Deployed coffee shop owned by {owner} selling at {price}"
    ));
    println!("{contract}");
    Ok(())
}

use crate::{cli::FundArgs, error::Result, store::LedgerFile, ui};

pub fn run(args: FundArgs) -> Result<()> {
    let mut ledger = LedgerFile::open(&args.ledger)?;
    let account = args.account.address();

    let balance = ledger.host.fund(account, args.amount)?;
    ledger.save()?;

    ui::success(format!("Funded {account} with {}", args.amount));
    println!("{balance}");
    Ok(())
}

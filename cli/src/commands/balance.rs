use crate::{cli::BalanceArgs, error::Result, store::LedgerFile};

pub fn run(args: BalanceArgs) -> Result<()> {
    let ledger = LedgerFile::open(&args.ledger)?;
    println!("{}", ledger.host.balance(&args.account.address()));
    Ok(())
}

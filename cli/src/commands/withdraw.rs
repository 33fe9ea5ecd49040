use crate::{cli::WithdrawArgs, error::Result, store::LedgerFile, ui};

pub fn run(args: WithdrawArgs) -> Result<()> {
    let mut ledger = LedgerFile::open(&args.ledger)?;
    let caller = args.from.address();

    let receipt = ledger.host.withdraw_funds(args.contract, caller)?;
    ledger.save()?;

    if receipt.data == 0 {
        ui::warn("Nothing to withdraw");
    } else {
        ui::success(format!("Withdrew {} to {caller}", receipt.data));
    }
    println!("{}", receipt.data);
    Ok(())
}

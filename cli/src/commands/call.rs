use coffee_ledger::{Call, Transaction};

use crate::{cli::CallArgs, error::Result, store::LedgerFile, ui};

pub fn run(args: CallArgs) -> Result<()> {
    let call = Call::encode_input(&args.function, &args.input)?;
    let mut ledger = LedgerFile::open(&args.ledger)?;

    let tx = Transaction {
        caller: args.from.address(),
        value: args.value,
        call,
    };
    let receipt = ledger.host.call(args.contract, &tx)?;

    if call.is_mutating() {
        ledger.save()?;
        ui::status(format!(
            "'{}' committed with {} event(s) and {} transfer(s)",
            call.name(),
            receipt.events.len(),
            receipt.transfers.len()
        ));
    }

    println!("{}", receipt.data.to_json());
    Ok(())
}

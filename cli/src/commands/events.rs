use crate::{cli::EventsArgs, error::Result, store::LedgerFile};

pub fn run(args: EventsArgs) -> Result<()> {
    let ledger = LedgerFile::open(&args.ledger)?;
    if let Some(contract) = &args.contract {
        ledger.host.deployment(contract)?;
    }

    let events = ledger
        .host
        .events_since(args.since)
        .iter()
        .filter(|event| args.contract.map_or(true, |c| event.source == c));

    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

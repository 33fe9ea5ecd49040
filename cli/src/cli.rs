use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use coffee_ledger::{Amount, ContractId};

use crate::account::AccountArg;

#[derive(Debug, Parser)]
#[command(name = "coffee-shop")]
#[command(bin_name = "coffee-shop")]
#[command(about = "Deploy and operate Buy Me Coffee shops on a local ledger")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deploy a new coffee shop.
    Deploy(DeployArgs),
    /// Mint funds into an account.
    Fund(FundArgs),
    /// Buy a coffee.
    Purchase(PurchaseArgs),
    /// Send everything a shop collected to its owner.
    Withdraw(WithdrawArgs),
    /// Call any contract function by name with a JSON input.
    Call(CallArgs),
    /// Show the state of a shop.
    State(StateArgs),
    /// Show the balance of an account.
    Balance(BalanceArgs),
    /// Print the event log as JSON lines.
    Events(EventsArgs),
    /// Print the contract schema as JSON.
    Schema(SchemaArgs),
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct LedgerOptions {
    /// Ledger state file (defaults to the `state` entry of the config).
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Configuration file.
    #[arg(long, default_value = "coffee-shop.toml")]
    pub config: PathBuf,
}

#[derive(Debug, Args)]
pub struct DeployArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Owner of the shop: a hex address or an account label.
    #[arg(long)]
    pub owner: AccountArg,

    /// Price of one coffee in base units (defaults to `default_price`).
    #[arg(long)]
    pub price: Option<Amount>,
}

#[derive(Debug, Args)]
pub struct FundArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Account to fund: a hex address or an account label.
    pub account: AccountArg,

    /// Amount to mint, in base units.
    pub amount: Amount,
}

#[derive(Debug, Args)]
pub struct PurchaseArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Shop to buy from.
    #[arg(long)]
    pub contract: ContractId,

    /// Paying account.
    #[arg(long)]
    pub from: AccountArg,

    /// Value to attach (defaults to the shop's price).
    #[arg(long)]
    pub value: Option<Amount>,
}

#[derive(Debug, Args)]
pub struct WithdrawArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Shop to withdraw from.
    #[arg(long)]
    pub contract: ContractId,

    /// Calling account; must be the owner.
    #[arg(long)]
    pub from: AccountArg,
}

#[derive(Debug, Args)]
pub struct CallArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Contract to call.
    #[arg(long)]
    pub contract: ContractId,

    /// Calling account.
    #[arg(long)]
    pub from: AccountArg,

    /// Value to attach, in base units.
    #[arg(long, default_value_t = 0)]
    pub value: Amount,

    /// Function name, as listed by `coffee-shop schema`.
    pub function: String,

    /// JSON input for the function.
    #[arg(default_value = "null")]
    pub input: String,
}

#[derive(Debug, Args)]
pub struct StateArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Shop to inspect.
    #[arg(long)]
    pub contract: ContractId,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Account to inspect: a hex address or an account label.
    pub account: AccountArg,
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(flatten)]
    pub ledger: LedgerOptions,

    /// Only print events with at least this sequence number.
    #[arg(long, default_value_t = 0)]
    pub since: u64,

    /// Only print events emitted by this contract.
    #[arg(long)]
    pub contract: Option<ContractId>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

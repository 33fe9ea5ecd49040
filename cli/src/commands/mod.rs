pub mod balance;
pub mod call;
pub mod completions;
pub mod deploy;
pub mod events;
pub mod fund;
pub mod purchase;
pub mod schema;
pub mod state;
pub mod withdraw;

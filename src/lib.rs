// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The "Buy Me Coffee" payment-counter contract, together with the minimal
//! in-process ledger host needed to deploy it, call it and observe it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unused_must_use)]
#![deny(unused_extern_crates)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![warn(missing_debug_implementations, unreachable_pub, rustdoc::all)]

/// Account and contract identities.
pub mod address;
/// Call encoding and decoding from JSON.
pub mod driver;
/// Contract and host error types.
pub mod error;
/// Notification events emitted by contracts.
pub mod event;
/// The in-process ledger host.
pub mod host;
/// Contract schema types and the coffee shop schema.
pub mod schema;
/// Thread-safe handle around the host.
pub mod shared;
/// The coffee shop contract.
pub mod shop;

pub use address::{Address, ContractId};
pub use driver::{Call, Output};
pub use error::{ContractError, LedgerError};
pub use event::{CoffeePurchased, Event, EventData};
pub use host::{CallContext, CallReceipt, Host, Transaction, Transfer};
pub use schema::COFFEE_SHOP_SCHEMA;
pub use shared::SharedLedger;
pub use shop::CoffeeShop;

/// Amount of the network's native currency, in base units.
pub type Amount = u64;

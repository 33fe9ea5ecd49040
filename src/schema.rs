// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Schema types for contract metadata.
//!
//! A schema describes the functions and events of a contract so that
//! off-chain tools can encode calls and decode events without linking the
//! contract itself.

use serde::Serialize;

use crate::event::CoffeePurchased;

/// Schema for a contract function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSchema {
    /// Function name.
    pub name: &'static str,
    /// Documentation string.
    pub doc: &'static str,
    /// Input type name (or "()" for no input).
    pub input: &'static str,
    /// Output type name (or "()" for no output).
    pub output: &'static str,
    /// Whether the function accepts an attached value.
    pub payable: bool,
    /// Whether the function may change state.
    pub mutating: bool,
}

/// Schema for a contract event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventSchema {
    /// Event topic string.
    pub topic: &'static str,
    /// Event data type name.
    pub data: &'static str,
}

/// Complete schema for a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractSchema {
    /// Contract name.
    pub name: &'static str,
    /// List of contract functions.
    pub functions: &'static [FunctionSchema],
    /// List of contract events.
    pub events: &'static [EventSchema],
}

impl ContractSchema {
    /// Returns an iterator over all functions.
    pub fn iter_functions(&self) -> impl Iterator<Item = &FunctionSchema> {
        self.functions.iter()
    }

    /// Returns an iterator over all events.
    pub fn iter_events(&self) -> impl Iterator<Item = &EventSchema> {
        self.events.iter()
    }

    /// Find a function by name.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&FunctionSchema> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find an event by topic.
    #[must_use]
    pub fn get_event(&self, topic: &str) -> Option<&EventSchema> {
        self.events.iter().find(|e| e.topic == topic)
    }
}

/// Schema of the coffee shop contract.
pub const COFFEE_SHOP_SCHEMA: ContractSchema = ContractSchema {
    name: "CoffeeShop",
    functions: &[
        FunctionSchema {
            name: "purchase",
            doc: "Buy one coffee. The attached value must equal the price.",
            input: "()",
            output: "()",
            payable: true,
            mutating: true,
        },
        FunctionSchema {
            name: "withdraw_funds",
            doc: "Send the whole held balance to the owner. Owner only.",
            input: "()",
            output: "u64",
            payable: false,
            mutating: true,
        },
        FunctionSchema {
            name: "owner",
            doc: "The account that deployed the contract.",
            input: "()",
            output: "Address",
            payable: false,
            mutating: false,
        },
        FunctionSchema {
            name: "price",
            doc: "Price of one coffee, in base units.",
            input: "()",
            output: "u64",
            payable: false,
            mutating: false,
        },
        FunctionSchema {
            name: "purchase_count",
            doc: "Number of successful purchases.",
            input: "()",
            output: "u64",
            payable: false,
            mutating: false,
        },
    ],
    events: &[EventSchema {
        topic: CoffeePurchased::TOPIC,
        data: "CoffeePurchased",
    }],
};

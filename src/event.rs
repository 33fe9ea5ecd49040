// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, ContractId};

/// Emitted by a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeePurchased {
    /// The account that paid.
    pub buyer: Address,
    /// The value it paid, in base units.
    pub amount: Amount,
}

impl CoffeePurchased {
    /// Topic under which the event is emitted.
    pub const TOPIC: &'static str = "coffee_purchased";
}

/// Payload of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    /// See [`CoffeePurchased`].
    CoffeePurchased(CoffeePurchased),
}

impl From<CoffeePurchased> for EventData {
    fn from(event: CoffeePurchased) -> Self {
        Self::CoffeePurchased(event)
    }
}

/// A committed entry of the host's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Position in the log, starting at zero.
    pub seq: u64,
    /// Contract that emitted the event.
    pub source: ContractId,
    /// Event topic.
    pub topic: String,
    /// Event payload.
    pub data: EventData,
}

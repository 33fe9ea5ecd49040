// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Data driver for the coffee shop contract.
//!
//! Turns a function name plus a JSON input into a typed [`Call`], and the
//! typed results and events back into JSON. Every function listed in
//! [`COFFEE_SHOP_SCHEMA`] has a matching [`Call`] variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LedgerError;
use crate::event::{CoffeePurchased, EventData};
use crate::schema::COFFEE_SHOP_SCHEMA;
use crate::{Address, Amount};

/// A call to one of the contract's functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    /// Buy a coffee.
    Purchase,
    /// Sweep the held balance to the owner.
    WithdrawFunds,
    /// Read the owner.
    Owner,
    /// Read the price.
    Price,
    /// Read the purchase counter.
    PurchaseCount,
}

impl Call {
    /// All calls, in schema order.
    pub const ALL: [Call; 5] = [
        Call::Purchase,
        Call::WithdrawFunds,
        Call::Owner,
        Call::Price,
        Call::PurchaseCount,
    ];

    /// Function name as listed in the schema.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Call::Purchase => "purchase",
            Call::WithdrawFunds => "withdraw_funds",
            Call::Owner => "owner",
            Call::Price => "price",
            Call::PurchaseCount => "purchase_count",
        }
    }

    /// Whether value may be attached to the call.
    #[must_use]
    pub const fn is_payable(self) -> bool {
        matches!(self, Call::Purchase)
    }

    /// Whether the call may change state.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(self, Call::Purchase | Call::WithdrawFunds)
    }

    /// Looks a call up by function name.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownFunction`] if no function has that name.
    pub fn from_name(name: &str) -> Result<Self, LedgerError> {
        Self::ALL
            .into_iter()
            .find(|call| call.name() == name)
            .ok_or_else(|| LedgerError::UnknownFunction(name.to_string()))
    }

    /// Decodes a call from its function name and JSON input.
    ///
    /// None of the functions take arguments, so the input must be blank,
    /// `null`, `[]` or `{}`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownFunction`] for an unknown name and
    /// [`LedgerError::InvalidInput`] for malformed or non-empty input.
    pub fn encode_input(name: &str, json: &str) -> Result<Self, LedgerError> {
        let call = Self::from_name(name)?;
        let invalid = |reason: String| LedgerError::InvalidInput {
            function: name.to_string(),
            reason,
        };

        if json.trim().is_empty() {
            return Ok(call);
        }

        let value: Value = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        let empty = match &value {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            _ => false,
        };

        if empty {
            Ok(call)
        } else {
            Err(invalid(format!("'{name}' takes no arguments, got {value}")))
        }
    }
}

/// Result of a call.
///
/// Serialized untagged, so [`Output::Amount`] and [`Output::Count`] both
/// render as plain JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// No return value.
    Unit,
    /// An identity.
    Address(Address),
    /// An amount in base units.
    Amount(Amount),
    /// A counter.
    Count(u64),
}

impl Output {
    /// Renders the output as JSON.
    #[must_use]
    pub fn to_json(self) -> Value {
        match self {
            Output::Unit => Value::Null,
            Output::Address(address) => Value::String(address.to_string()),
            Output::Amount(amount) => Value::from(amount),
            Output::Count(count) => Value::from(count),
        }
    }
}

/// Decodes an event payload published under `topic`.
///
/// # Errors
///
/// [`LedgerError::InvalidInput`] if the topic is not part of the schema or
/// the payload does not match it.
pub fn decode_event(topic: &str, json: &str) -> Result<EventData, LedgerError> {
    let invalid = |reason: String| LedgerError::InvalidInput {
        function: topic.to_string(),
        reason,
    };

    if COFFEE_SHOP_SCHEMA.get_event(topic).is_none() {
        return Err(invalid(format!("unknown event topic '{topic}'")));
    }

    let event: CoffeePurchased = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
    Ok(event.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_function_has_a_call() {
        for function in COFFEE_SHOP_SCHEMA.iter_functions() {
            let call = Call::from_name(function.name).expect("schema function should decode");

            assert_eq!(call.name(), function.name);
            assert_eq!(call.is_payable(), function.payable);
            assert_eq!(call.is_mutating(), function.mutating);
        }
    }

    #[test]
    fn accepts_empty_inputs() {
        for input in ["", "  ", "null", "{}", "[]"] {
            assert_eq!(Call::encode_input("purchase", input), Ok(Call::Purchase));
        }
    }

    #[test]
    fn rejects_arguments_and_unknown_functions() {
        assert!(matches!(
            Call::encode_input("purchase", "{\"amount\": 1}"),
            Err(LedgerError::InvalidInput { .. })
        ));
        assert!(matches!(
            Call::encode_input("price", "not json"),
            Err(LedgerError::InvalidInput { .. })
        ));
        assert_eq!(
            Call::encode_input("transfer_ownership", ""),
            Err(LedgerError::UnknownFunction("transfer_ownership".into()))
        );
    }

    #[test]
    fn outputs_render_as_plain_json() {
        let owner = Address::from_label("owner");

        assert_eq!(Output::Unit.to_json(), Value::Null);
        assert_eq!(Output::Amount(7).to_json(), Value::from(7u64));
        assert_eq!(Output::Count(3).to_json(), Value::from(3u64));
        assert_eq!(
            serde_json::to_value(Output::Count(3)).expect("output should serialize"),
            Output::Count(3).to_json()
        );
        assert_eq!(
            Output::Address(owner).to_json(),
            Value::String(owner.to_string())
        );
    }

    #[test]
    fn decodes_purchase_events() {
        let buyer = Address::from_label("alice");
        let json = format!("{{\"buyer\":\"{buyer}\",\"amount\":5}}");

        assert_eq!(
            decode_event(CoffeePurchased::TOPIC, &json),
            Ok(EventData::CoffeePurchased(CoffeePurchased { buyer, amount: 5 }))
        );
        assert!(decode_event("refund", &json).is_err());
        assert!(decode_event(CoffeePurchased::TOPIC, "{}").is_err());
    }
}

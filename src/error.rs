// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use thiserror::Error;

use crate::{Address, Amount, ContractId};

/// A contract call rejected by the contract itself.
///
/// Both variants are deterministic precondition failures: repeating the call
/// with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The value attached to a purchase is not the configured price.
    #[error("incorrect payment amount: expected {expected}, got {attached}")]
    IncorrectPayment {
        /// The configured price.
        expected: Amount,
        /// The value attached to the call.
        attached: Amount,
    },

    /// The caller is not allowed to perform the operation.
    #[error("unauthorized caller {caller}")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// The purchase counter cannot be incremented any further.
    #[error("purchase count overflow")]
    CountOverflow,
}

/// A call or deployment rejected by the ledger host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The contract rejected the call; nothing was committed.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// No contract is deployed under the given id.
    #[error("unknown contract {0}")]
    UnknownContract(ContractId),

    /// The called function does not exist.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// The function input could not be decoded.
    #[error("invalid input for '{function}': {reason}")]
    InvalidInput {
        /// The called function.
        function: String,
        /// Why decoding failed.
        reason: String,
    },

    /// Value was attached to a function that does not accept payments.
    #[error("function '{function}' does not accept value (attached {value})")]
    NonPayable {
        /// The called function.
        function: &'static str,
        /// The value attached to the call.
        value: Amount,
    },

    /// The caller cannot cover the value attached to the call.
    #[error("insufficient balance for {account}: has {available}, needs {required}")]
    InsufficientBalance {
        /// The paying account.
        account: Address,
        /// The account's balance.
        available: Amount,
        /// The value attached to the call.
        required: Amount,
    },

    /// Crediting an account or contract would overflow its balance.
    #[error("balance overflow")]
    BalanceOverflow,

    /// The ledger state could not be encoded.
    #[error("could not encode ledger state: {0}")]
    Serialization(String),

    /// Another caller panicked while holding the ledger lock.
    #[error("ledger lock poisoned")]
    Poisoned,
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The "Buy Me Coffee" contract.
//!
//! Anyone can buy a coffee by attaching exactly the configured price; the
//! owner can sweep everything collected so far. The contract only mutates
//! its own fields and talks to the host through the [`CallContext`], so a
//! rejected call leaves nothing behind once the host discards the context.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::event::CoffeePurchased;
use crate::host::CallContext;
use crate::{Address, Amount};

/// Contract state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeShop {
    /// The deployer. Never reassigned.
    owner: Address,
    /// Price of one coffee in base units. Never reassigned.
    price: Amount,
    /// Successful purchases so far. Only ever incremented.
    purchase_count: u64,
}

impl CoffeeShop {
    /// Initialize a new shop owned by `owner`, selling at `price`.
    ///
    /// The price is taken as is: zero is a valid (free) price.
    #[must_use]
    pub const fn new(owner: Address, price: Amount) -> Self {
        Self {
            owner,
            price,
            purchase_count: 0,
        }
    }

    /// The account that deployed the shop.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Price of one coffee.
    #[must_use]
    pub const fn price(&self) -> Amount {
        self.price
    }

    /// Number of successful purchases.
    #[must_use]
    pub const fn purchase_count(&self) -> u64 {
        self.purchase_count
    }

    /// Buy a coffee with the value attached to the call.
    ///
    /// # Errors
    ///
    /// [`ContractError::IncorrectPayment`] unless the attached value equals
    /// the price.
    pub fn purchase(&mut self, ctx: &mut CallContext) -> Result<(), ContractError> {
        let attached = ctx.value();
        if attached != self.price {
            return Err(ContractError::IncorrectPayment {
                expected: self.price,
                attached,
            });
        }

        self.purchase_count = self
            .purchase_count
            .checked_add(1)
            .ok_or(ContractError::CountOverflow)?;

        ctx.emit(
            CoffeePurchased::TOPIC,
            CoffeePurchased {
                buyer: ctx.caller(),
                amount: attached,
            },
        );
        Ok(())
    }

    /// Send the whole balance held by the contract to the owner.
    ///
    /// Returns the amount transferred, which is zero when nothing was
    /// collected since the last withdrawal. An empty balance moves nothing
    /// and records no transfer.
    ///
    /// # Errors
    ///
    /// [`ContractError::Unauthorized`] if the caller is not the owner.
    pub fn withdraw_funds(&mut self, ctx: &mut CallContext) -> Result<Amount, ContractError> {
        let caller = ctx.caller();
        if caller != self.owner {
            return Err(ContractError::Unauthorized { caller });
        }

        let balance = ctx.self_balance();
        if balance > 0 {
            ctx.transfer_balance(self.owner);
        }
        Ok(balance)
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Thread-safe access to a [`Host`].
//!
//! Each operation holds the lock for its whole duration, so calls from
//! different threads are applied one after the other in a total order and a
//! withdrawal can never observe a balance another withdrawal already swept.

use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use crate::driver::Output;
use crate::error::LedgerError;
use crate::event::Event;
use crate::host::{CallReceipt, Host, Transaction};
use crate::shop::CoffeeShop;
use crate::{Address, Amount, ContractId};

/// Cloneable handle to a host shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger(Arc<Mutex<Host>>);

impl SharedLedger {
    /// Wraps an existing host.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self(Arc::new(Mutex::new(host)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Host>, LedgerError> {
        self.0.lock().map_err(|_| LedgerError::Poisoned)
    }

    /// Runs `f` with exclusive access to the host.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Poisoned`] if another holder of the lock panicked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Host) -> R) -> Result<R, LedgerError> {
        let mut host = self.lock()?;
        Ok(f(&mut host))
    }

    /// See [`Host::deploy`].
    ///
    /// # Errors
    ///
    /// [`LedgerError::Poisoned`] if the lock is poisoned.
    pub fn deploy(&self, creator: Address, price: Amount) -> Result<ContractId, LedgerError> {
        self.with(|host| host.deploy(creator, price))
    }

    /// See [`Host::fund`].
    ///
    /// # Errors
    ///
    /// As [`Host::fund`], or [`LedgerError::Poisoned`].
    pub fn fund(&self, account: Address, amount: Amount) -> Result<Amount, LedgerError> {
        self.lock()?.fund(account, amount)
    }

    /// See [`Host::call`].
    ///
    /// # Errors
    ///
    /// As [`Host::call`], or [`LedgerError::Poisoned`].
    pub fn call(
        &self,
        contract: ContractId,
        tx: &Transaction,
    ) -> Result<CallReceipt<Output>, LedgerError> {
        self.lock()?.call(contract, tx)
    }

    /// See [`Host::purchase`].
    ///
    /// # Errors
    ///
    /// As [`Host::purchase`], or [`LedgerError::Poisoned`].
    pub fn purchase(
        &self,
        contract: ContractId,
        buyer: Address,
        value: Amount,
    ) -> Result<CallReceipt<()>, LedgerError> {
        self.lock()?.purchase(contract, buyer, value)
    }

    /// See [`Host::withdraw_funds`].
    ///
    /// # Errors
    ///
    /// As [`Host::withdraw_funds`], or [`LedgerError::Poisoned`].
    pub fn withdraw_funds(
        &self,
        contract: ContractId,
        caller: Address,
    ) -> Result<CallReceipt<Amount>, LedgerError> {
        self.lock()?.withdraw_funds(contract, caller)
    }

    /// A copy of the shop's current state.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownContract`] or [`LedgerError::Poisoned`].
    pub fn shop(&self, contract: &ContractId) -> Result<CoffeeShop, LedgerError> {
        self.lock()?.shop(contract).cloned()
    }

    /// Balance of an account.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Poisoned`] if the lock is poisoned.
    pub fn balance_of(&self, account: &Address) -> Result<Amount, LedgerError> {
        self.with(|host| host.balance(account))
    }

    /// Balance held by a contract.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownContract`] or [`LedgerError::Poisoned`].
    pub fn contract_balance(&self, contract: &ContractId) -> Result<Amount, LedgerError> {
        self.lock()?.contract_balance(contract)
    }

    /// See [`Host::subscribe`].
    ///
    /// # Errors
    ///
    /// [`LedgerError::Poisoned`] if the lock is poisoned.
    pub fn subscribe(&self) -> Result<mpsc::Receiver<Event>, LedgerError> {
        self.with(Host::subscribe)
    }

    /// Serializes the host state to JSON.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Serialization`] or [`LedgerError::Poisoned`].
    pub fn snapshot(&self) -> Result<serde_json::Value, LedgerError> {
        let host = self.lock()?;
        serde_json::to_value(&*host).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Takes the host back if this is the last handle.
    ///
    /// # Errors
    ///
    /// Returns the handle unchanged while other clones are alive.
    pub fn try_into_inner(self) -> Result<Host, Self> {
        Arc::try_unwrap(self.0)
            .map(|mutex| mutex.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner))
            .map_err(Self)
    }
}

impl From<Host> for SharedLedger {
    fn from(host: Host) -> Self {
        Self::new(host)
    }
}

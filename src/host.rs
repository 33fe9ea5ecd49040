// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! In-process ledger host.
//!
//! The host keeps account balances, deployed contracts with the balance each
//! one holds, and an append-only event log. Calls are all-or-nothing: the
//! contract runs against a staged copy of its deployment and a
//! [`CallContext`] that buffers events and outgoing transfers, and the host
//! commits all of it only when the call returns `Ok`.

use std::collections::BTreeMap;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::driver::{Call, Output};
use crate::error::{ContractError, LedgerError};
use crate::event::{Event, EventData};
use crate::shop::CoffeeShop;
use crate::{Address, Amount, ContractId};

/// A signed request to call a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account making the call and paying the attached value.
    pub caller: Address,
    /// Value attached to the call, in base units.
    pub value: Amount,
    /// The function to call.
    pub call: Call,
}

/// Funds moved out of a contract to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Paying contract.
    pub from: ContractId,
    /// Receiving account.
    pub to: Address,
    /// Amount moved.
    pub amount: Amount,
}

/// Outcome of a committed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReceipt<T> {
    /// Value returned by the function.
    pub data: T,
    /// Events appended to the log by the call.
    pub events: Vec<Event>,
    /// Transfers performed by the call.
    pub transfers: Vec<Transfer>,
}

/// What a contract sees of the host while it runs.
#[derive(Debug)]
pub struct CallContext {
    contract: ContractId,
    caller: Address,
    value: Amount,
    balance: Amount,
    events: Vec<(&'static str, EventData)>,
    transfers: Vec<Transfer>,
}

impl CallContext {
    fn new(contract: ContractId, caller: Address, value: Amount, balance: Amount) -> Self {
        Self {
            contract,
            caller,
            value,
            balance,
            events: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// The account that made the call.
    #[must_use]
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Value attached to the call.
    #[must_use]
    pub fn value(&self) -> Amount {
        self.value
    }

    /// Balance held by the running contract, attached value included.
    #[must_use]
    pub fn self_balance(&self) -> Amount {
        self.balance
    }

    /// Publishes an event. It reaches the log only if the call succeeds.
    pub fn emit(&mut self, topic: &'static str, data: impl Into<EventData>) {
        self.events.push((topic, data.into()));
    }

    /// Moves the whole balance held by the contract to `to`.
    pub fn transfer_balance(&mut self, to: Address) {
        let amount = std::mem::take(&mut self.balance);
        self.transfers.push(Transfer {
            from: self.contract,
            to,
            amount,
        });
    }
}

/// A deployed coffee shop and the funds it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Contract state.
    pub shop: CoffeeShop,
    /// Balance held by the contract.
    pub balance: Amount,
    /// Host height at which the contract was deployed.
    pub deployed_at: u64,
}

/// The ledger host.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Host {
    height: u64,
    nonce: u64,
    accounts: BTreeMap<Address, Amount>,
    contracts: BTreeMap<ContractId, Deployment>,
    events: Vec<Event>,
    #[serde(skip)]
    subscribers: Vec<mpsc::Sender<Event>>,
}

impl Host {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed state changes so far.
    #[must_use]
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Balance of an account. Unknown accounts hold nothing.
    #[must_use]
    pub fn balance(&self, account: &Address) -> Amount {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    /// Mints `amount` into `account` and returns the new balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] if the balance would overflow.
    pub fn fund(&mut self, account: Address, amount: Amount) -> Result<Amount, LedgerError> {
        let balance = self
            .balance(&account)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        self.accounts.insert(account, balance);
        self.height += 1;
        debug!(%account, amount, balance, "funded account");
        Ok(balance)
    }

    /// Deploys a coffee shop owned by `creator` and returns its id.
    pub fn deploy(&mut self, creator: Address, price: Amount) -> ContractId {
        let contract = ContractId::derive(&creator, self.nonce);
        self.nonce += 1;

        self.contracts.insert(
            contract,
            Deployment {
                shop: CoffeeShop::new(creator, price),
                balance: 0,
                deployed_at: self.height,
            },
        );
        self.height += 1;

        info!(%contract, %creator, price, "deployed coffee shop");
        contract
    }

    /// Looks a deployment up.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownContract`] if nothing is deployed under `contract`.
    pub fn deployment(&self, contract: &ContractId) -> Result<&Deployment, LedgerError> {
        self.contracts
            .get(contract)
            .ok_or(LedgerError::UnknownContract(*contract))
    }

    /// State of a deployed coffee shop.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownContract`] if nothing is deployed under `contract`.
    pub fn shop(&self, contract: &ContractId) -> Result<&CoffeeShop, LedgerError> {
        self.deployment(contract).map(|d| &d.shop)
    }

    /// Balance held by a deployed contract.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownContract`] if nothing is deployed under `contract`.
    pub fn contract_balance(&self, contract: &ContractId) -> Result<Amount, LedgerError> {
        self.deployment(contract).map(|d| d.balance)
    }

    /// All deployments, ordered by id.
    pub fn contracts(&self) -> impl Iterator<Item = (&ContractId, &Deployment)> {
        self.contracts.iter()
    }

    /// The whole event log.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events with a sequence number of at least `seq`.
    #[must_use]
    pub fn events_since(&self, seq: u64) -> &[Event] {
        let start = self.events.partition_point(|event| event.seq < seq);
        &self.events[start..]
    }

    /// Returns a receiver fed with every event committed from now on.
    pub fn subscribe(&mut self) -> mpsc::Receiver<Event> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Runs a read-only function without a transaction.
    ///
    /// # Errors
    ///
    /// [`LedgerError::UnknownContract`] for an unknown contract and
    /// [`LedgerError::InvalidInput`] for a function that changes state.
    pub fn query(&self, contract: &ContractId, call: Call) -> Result<Output, LedgerError> {
        let shop = self.shop(contract)?;
        match call {
            Call::Owner => Ok(Output::Address(shop.owner())),
            Call::Price => Ok(Output::Amount(shop.price())),
            Call::PurchaseCount => Ok(Output::Count(shop.purchase_count())),
            Call::Purchase | Call::WithdrawFunds => Err(LedgerError::InvalidInput {
                function: call.name().to_string(),
                reason: "state-changing functions need a transaction".to_string(),
            }),
        }
    }

    /// Buys a coffee from `contract`, paying `value` from `buyer`.
    ///
    /// # Errors
    ///
    /// See [`Host::call`].
    pub fn purchase(
        &mut self,
        contract: ContractId,
        buyer: Address,
        value: Amount,
    ) -> Result<CallReceipt<()>, LedgerError> {
        let tx = Transaction {
            caller: buyer,
            value,
            call: Call::Purchase,
        };
        self.transact(contract, &tx, CoffeeShop::purchase)
    }

    /// Sweeps the balance of `contract` to its owner, on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// See [`Host::call`].
    pub fn withdraw_funds(
        &mut self,
        contract: ContractId,
        caller: Address,
    ) -> Result<CallReceipt<Amount>, LedgerError> {
        let tx = Transaction {
            caller,
            value: 0,
            call: Call::WithdrawFunds,
        };
        self.transact(contract, &tx, CoffeeShop::withdraw_funds)
    }

    /// Executes a transaction against `contract`.
    ///
    /// On error nothing changes: no balance moves, no event is logged and the
    /// contract state is left as it was.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::UnknownContract`] if nothing is deployed there.
    /// - [`LedgerError::NonPayable`] if value is attached to a function that
    ///   does not take payments.
    /// - [`LedgerError::InsufficientBalance`] if the caller cannot pay.
    /// - [`LedgerError::BalanceOverflow`] if a credit would overflow.
    /// - [`LedgerError::Contract`] if the contract rejects the call.
    pub fn call(
        &mut self,
        contract: ContractId,
        tx: &Transaction,
    ) -> Result<CallReceipt<Output>, LedgerError> {
        let call = tx.call;
        self.transact(contract, tx, |shop, ctx| dispatch(call, shop, ctx))
    }

    fn transact<T>(
        &mut self,
        contract: ContractId,
        tx: &Transaction,
        run: impl FnOnce(&mut CoffeeShop, &mut CallContext) -> Result<T, ContractError>,
    ) -> Result<CallReceipt<T>, LedgerError> {
        match self.execute(contract, tx, run) {
            Ok(receipt) => {
                debug!(
                    %contract,
                    caller = %tx.caller,
                    function = tx.call.name(),
                    value = tx.value,
                    events = receipt.events.len(),
                    "call committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                debug!(
                    %contract,
                    caller = %tx.caller,
                    function = tx.call.name(),
                    value = tx.value,
                    %err,
                    "call reverted"
                );
                Err(err)
            }
        }
    }

    fn execute<T>(
        &mut self,
        contract: ContractId,
        tx: &Transaction,
        run: impl FnOnce(&mut CoffeeShop, &mut CallContext) -> Result<T, ContractError>,
    ) -> Result<CallReceipt<T>, LedgerError> {
        let deployment = self.deployment(&contract)?;

        if tx.value > 0 && !tx.call.is_payable() {
            return Err(LedgerError::NonPayable {
                function: tx.call.name(),
                value: tx.value,
            });
        }

        let available = self.balance(&tx.caller);
        let remaining =
            available
                .checked_sub(tx.value)
                .ok_or(LedgerError::InsufficientBalance {
                    account: tx.caller,
                    available,
                    required: tx.value,
                })?;

        let mut staged = deployment.clone();
        staged.balance = staged
            .balance
            .checked_add(tx.value)
            .ok_or(LedgerError::BalanceOverflow)?;

        let mut ctx = CallContext::new(contract, tx.caller, tx.value, staged.balance);
        let data = run(&mut staged.shop, &mut ctx)?;
        staged.balance = ctx.balance;

        let mut touched = BTreeMap::new();
        if tx.value > 0 {
            touched.insert(tx.caller, remaining);
        }
        for transfer in &ctx.transfers {
            let current = touched
                .get(&transfer.to)
                .copied()
                .unwrap_or_else(|| self.balance(&transfer.to));
            let credited = current
                .checked_add(transfer.amount)
                .ok_or(LedgerError::BalanceOverflow)?;
            touched.insert(transfer.to, credited);
        }

        // Nothing below can fail.
        self.accounts.extend(touched);
        self.contracts.insert(contract, staged);
        if tx.call.is_mutating() {
            self.height += 1;
        }

        let events = ctx
            .events
            .into_iter()
            .map(|(topic, data)| self.append_event(contract, topic, data))
            .collect();

        Ok(CallReceipt {
            data,
            events,
            transfers: ctx.transfers,
        })
    }

    fn append_event(&mut self, source: ContractId, topic: &str, data: EventData) -> Event {
        let seq = self.events.last().map_or(0, |last| last.seq + 1);
        let event = Event {
            seq,
            source,
            topic: topic.to_string(),
            data,
        };

        self.events.push(event.clone());
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        event
    }
}

fn dispatch(
    call: Call,
    shop: &mut CoffeeShop,
    ctx: &mut CallContext,
) -> Result<Output, ContractError> {
    Ok(match call {
        Call::Purchase => {
            shop.purchase(ctx)?;
            Output::Unit
        }
        Call::WithdrawFunds => Output::Amount(shop.withdraw_funds(ctx)?),
        Call::Owner => Output::Address(shop.owner()),
        Call::Price => Output::Amount(shop.price()),
        Call::PurchaseCount => Output::Count(shop.purchase_count()),
    })
}

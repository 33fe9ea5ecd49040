// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Fixed-size identities for accounts and deployed contracts.
//!
//! Both are 32 bytes, rendered as `0x`-prefixed lowercase hex and parsed with
//! or without the prefix.

use core::fmt;
use core::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Size in bytes of every identity.
pub const IDENTITY_BYTES: usize = 32;

const ACCOUNT_LABEL_CONTEXT: &str = "coffee-ledger 2026-10 account label";
const CONTRACT_ID_CONTEXT: &str = "coffee-ledger 2026-10 contract id";

/// Failure to parse an identity from its hex form.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid identity: {0}")]
pub struct ParseIdentityError(#[from] hex::FromHexError);

macro_rules! identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name([u8; IDENTITY_BYTES]);

        impl $name {
            /// Creates the identity from its raw bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; IDENTITY_BYTES]) -> Self {
                Self(bytes)
            }

            /// Returns the raw bytes.
            #[must_use]
            pub const fn to_bytes(&self) -> [u8; IDENTITY_BYTES] {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdentityError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; IDENTITY_BYTES];
                hex::decode_to_slice(digits, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(D::Error::custom)
            }
        }
    };
}

identity! {
    /// Identity of an account holding a balance on the ledger.
    Address
}

identity! {
    /// Identity assigned to a contract when it is deployed.
    ContractId
}

impl Address {
    /// Derives a stable address from a human readable label.
    ///
    /// The same label always yields the same address, which lets tools refer
    /// to accounts as `alice` or `owner` instead of raw hex.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self(blake3::derive_key(ACCOUNT_LABEL_CONTEXT, label.as_bytes()))
    }
}

impl ContractId {
    /// Derives the id of the `nonce`-th deployment made on a host by
    /// `creator`.
    #[must_use]
    pub fn derive(creator: &Address, nonce: u64) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key(CONTRACT_ID_CONTEXT);
        hasher.update(&creator.0);
        hasher.update(&nonce.to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let address = Address::from_label("alice");
        let shown = address.to_string();

        assert!(shown.starts_with("0x"));
        assert_eq!(shown.len(), 2 + 2 * IDENTITY_BYTES);
        assert_eq!(shown.parse::<Address>(), Ok(address));
        assert_eq!(shown[2..].parse::<Address>(), Ok(address));
    }

    #[test]
    fn labels_are_stable_and_distinct() {
        assert_eq!(Address::from_label("alice"), Address::from_label("alice"));
        assert_ne!(Address::from_label("alice"), Address::from_label("bob"));
    }

    #[test]
    fn rejects_short_or_non_hex_input() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("zz".repeat(IDENTITY_BYTES).parse::<ContractId>().is_err());
    }

    #[test]
    fn contract_ids_depend_on_creator_and_nonce() {
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");

        assert_eq!(ContractId::derive(&alice, 0), ContractId::derive(&alice, 0));
        assert_ne!(ContractId::derive(&alice, 0), ContractId::derive(&alice, 1));
        assert_ne!(ContractId::derive(&alice, 0), ContractId::derive(&bob, 0));
    }

    #[test]
    fn serializes_as_hex_string() {
        let id = ContractId::from_bytes([0xab; IDENTITY_BYTES]);
        let json = serde_json::to_string(&id).expect("serializing should succeed");

        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(IDENTITY_BYTES)));
        let back: ContractId = serde_json::from_str(&json).expect("deserializing should succeed");
        assert_eq!(back, id);
    }
}

use std::str::FromStr;

use coffee_ledger::address::{ParseIdentityError, IDENTITY_BYTES};
use coffee_ledger::Address;

/// An account given on the command line.
///
/// Anything that looks like hex (a `0x` prefix, or exactly 64 hex digits) is
/// parsed as a raw address; everything else is an account label.
#[derive(Debug, Clone, Copy)]
pub struct AccountArg(pub Address);

impl AccountArg {
    pub fn address(self) -> Address {
        self.0
    }
}

impl FromStr for AccountArg {
    type Err = ParseIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let looks_like_hex = s.starts_with("0x")
            || (s.len() == 2 * IDENTITY_BYTES && s.chars().all(|c| c.is_ascii_hexdigit()));

        if looks_like_hex {
            s.parse().map(Self)
        } else {
            Ok(Self(Address::from_label(s)))
        }
    }
}

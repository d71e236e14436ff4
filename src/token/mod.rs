//! Token issuance and transfer.
//!
//! The [`Keeper`] validates requests, drives the [`BankKeeper`] and reports
//! every successful mutation to an [`EventSink`](crate::events::EventSink).
//! Issuance routes new supply through the module's own account before it
//! reaches the requester; transfers move balances directly.

pub mod mint;
pub mod msgs;
pub mod query;
pub mod transfer;

pub use msgs::{
    MsgMintTokens, MsgMintTokensResponse, MsgTransferTokens, MsgTransferTokensResponse,
    QueryTokenInfoRequest, QueryTokenInfoResponse,
};

use crate::account::{AccountAddress, AddressCodec, BURNER, MINTER};
use crate::bank::BankKeeper;
use crate::coin::{Coin, Coins};
use crate::error::{AddressRole, TokenError};

/// Reserved name of the token module's own account.
pub const MODULE_NAME: &str = "token";

/// Permissions the token module account is registered with.
pub const MODULE_PERMISSIONS: [&str; 2] = [MINTER, BURNER];

pub struct Keeper<B, C> {
    bank: B,
    address_codec: C,
}

impl<B, C> Keeper<B, C>
where
    B: BankKeeper,
    C: AddressCodec,
{
    pub fn new(bank: B, address_codec: C) -> Self {
        Self {
            bank,
            address_codec,
        }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    fn decode_address(&self, role: AddressRole, text: &str) -> Result<AccountAddress, TokenError> {
        self.address_codec
            .string_to_bytes(text)
            .map_err(|source| TokenError::InvalidAddress { role, source })
    }
}

/// Single-coin amount for a request; zero is refused before the ledger.
fn requested_coins(amount: u64, denom: &str) -> Result<Coins, TokenError> {
    if amount == 0 {
        return Err(TokenError::InvalidAmount);
    }
    Ok(Coins::from(Coin::new(denom, amount)))
}

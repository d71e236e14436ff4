//! Fixtures shared by the unit tests.

use crate::account::{AccountAddress, AddressCodec, Bech32Codec, BURNER, MINTER};
use crate::bank::{Bank, BankError, BankKeeper};
use crate::coin::Coins;
use crate::crypto::module_address;
use crate::token::MODULE_NAME;

pub const PREFIX: &str = "cosmos";

pub fn codec() -> Bech32Codec {
    Bech32Codec::new(PREFIX)
}

pub fn raw_address(n: u8) -> AccountAddress {
    AccountAddress::new(vec![n; 20]).unwrap()
}

/// Bech32 form of `raw_address(n)`.
pub fn dummy_address(n: u8) -> String {
    codec().bytes_to_string(&raw_address(n)).unwrap()
}

pub fn module_account_address(name: &str) -> String {
    codec().bytes_to_string(&module_address(name)).unwrap()
}

/// Bank with the token module account registered.
pub fn token_bank() -> Bank {
    Bank::new().with_module_account(MODULE_NAME, &[MINTER, BURNER])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankCall {
    Mint,
    SendFromModule,
    Send,
}

impl BankCall {
    fn name(self) -> &'static str {
        match self {
            BankCall::Mint => "mint_coins",
            BankCall::SendFromModule => "send_coins_from_module_to_account",
            BankCall::Send => "send_coins",
        }
    }
}

/// Wraps a [`Bank`], recording every call and optionally failing one kind.
#[derive(Debug)]
pub struct RecordingBank {
    pub inner: Bank,
    pub calls: Vec<BankCall>,
    pub fail_on: Option<BankCall>,
}

impl RecordingBank {
    pub fn new(inner: Bank) -> Self {
        Self {
            inner,
            calls: Vec::new(),
            fail_on: None,
        }
    }

    pub fn failing(inner: Bank, call: BankCall) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::new(inner)
        }
    }

    fn record(&mut self, call: BankCall) -> Result<(), BankError> {
        self.calls.push(call);
        if self.fail_on == Some(call) {
            return Err(BankError::Injected(call.name()));
        }
        Ok(())
    }
}

impl BankKeeper for RecordingBank {
    fn mint_coins(&mut self, module: &str, coins: &Coins) -> Result<(), BankError> {
        self.record(BankCall::Mint)?;
        self.inner.mint_coins(module, coins)
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError> {
        self.record(BankCall::SendFromModule)?;
        self.inner.send_coins_from_module_to_account(module, to, coins)
    }

    fn send_coins(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError> {
        self.record(BankCall::Send)?;
        self.inner.send_coins(from, to, coins)
    }
}

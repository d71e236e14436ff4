//! Ledger engine consumed by the token module.
//!
//! [`BankKeeper`] is the boundary the message handlers are written against.
//! [`Bank`] is the in-memory implementation used by the CLI and the tests:
//! module accounts are ordinary balance holders whose address is derived
//! from a reserved name, and minting is gated by the `minter` permission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::account::{AccountAddress, BalanceError, BalanceStore, MINTER};
use crate::coin::Coins;
use crate::crypto::module_address;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("module account {0} does not exist")]
    UnknownModuleAccount(String),
    #[error("module account {module} does not have permissions to {permission} tokens")]
    MissingPermission { module: String, permission: String },
    #[error("invalid denom: {0}")]
    InvalidDenom(String),
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[cfg(test)]
    #[error("injected ledger failure at {0}")]
    Injected(&'static str),
}

/// Balance mutations the token module relies on. Each call is atomic: it
/// either applies completely or returns an error and changes nothing.
pub trait BankKeeper {
    /// Create `coins` out of thin air inside the named module account.
    fn mint_coins(&mut self, module: &str, coins: &Coins) -> Result<(), BankError>;

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError>;

    fn send_coins(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError>;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModuleAccountInfo {
    pub address: AccountAddress,
    pub permissions: Vec<String>,
}

impl ModuleAccountInfo {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bank {
    modules: BTreeMap<String, ModuleAccountInfo>,
    store: BalanceStore,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_account(mut self, name: &str, permissions: &[&str]) -> Self {
        self.register_module_account(name, permissions.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Register (or re-register) a module account; returns its address.
    pub fn register_module_account(
        &mut self,
        name: &str,
        permissions: Vec<String>,
    ) -> AccountAddress {
        let address = module_address(name);
        debug!("bank: module account '{}' at {} {:?}", name, address, permissions);
        self.modules.insert(
            name.to_string(),
            ModuleAccountInfo {
                address: address.clone(),
                permissions,
            },
        );
        address
    }

    pub fn module_account(&self, name: &str) -> Option<&ModuleAccountInfo> {
        self.modules.get(name)
    }

    pub fn balance(&self, account: &AccountAddress, denom: &str) -> u128 {
        self.store.balance(account, denom)
    }

    pub fn all_balances(&self, account: &AccountAddress) -> Coins {
        self.store.all_balances(account)
    }

    pub fn supply_of(&self, denom: &str) -> u128 {
        self.store.total_supply(denom)
    }

    pub fn supply(&self) -> &Coins {
        self.store.supply()
    }

    /// Seed an initial balance; the coins are added to the total supply.
    pub fn set_genesis_balance(
        &mut self,
        account: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError> {
        validate_denoms(coins)?;
        self.store.mint(account, coins)?;
        Ok(())
    }

    /// Load a snapshot written by [`Bank::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BankError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    fn module_address_of(&self, module: &str) -> Result<&AccountAddress, BankError> {
        self.modules
            .get(module)
            .map(|m| &m.address)
            .ok_or_else(|| BankError::UnknownModuleAccount(module.to_string()))
    }
}

impl BankKeeper for Bank {
    fn mint_coins(&mut self, module: &str, coins: &Coins) -> Result<(), BankError> {
        let info = self
            .modules
            .get(module)
            .ok_or_else(|| BankError::UnknownModuleAccount(module.to_string()))?;
        if !info.has_permission(MINTER) {
            return Err(BankError::MissingPermission {
                module: module.to_string(),
                permission: MINTER.to_string(),
            });
        }
        validate_denoms(coins)?;

        let address = info.address.clone();
        self.store.mint(&address, coins)?;
        debug!("bank: minted {} into module {}", coins, module);
        Ok(())
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError> {
        let from = self.module_address_of(module)?.clone();
        self.send_coins(&from, to, coins)
    }

    fn send_coins(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BankError> {
        validate_denoms(coins)?;
        self.store.transfer(from, to, coins)?;
        debug!("bank: sent {} from {} to {}", coins, from, to);
        Ok(())
    }
}

/// Denominations look like `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), BankError> {
    let mut chars = denom.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !first_ok || !rest_ok || !(3..=128).contains(&denom.len()) {
        return Err(BankError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

fn validate_denoms(coins: &Coins) -> Result<(), BankError> {
    coins.iter().try_for_each(|c| validate_denom(&c.denom))
}

//! Balance tracking per account and denomination

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::address::AccountAddress;
use crate::coin::Coins;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("insufficient funds: {address} has {available}, needs {needed}")]
    InsufficientFunds {
        address: AccountAddress,
        available: Coins,
        needed: Coins,
    },
    #[error("balance overflow")]
    Overflow,
}

/// Balances of every account plus the total supply per denomination.
///
/// Every mutating call computes all new values before writing any of them,
/// so a failed call leaves the store untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceStore {
    balances: BTreeMap<AccountAddress, Coins>,
    supply: Coins,
}

impl BalanceStore {
    /// Create a new empty balance store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get balance for an account and denomination
    pub fn balance(&self, account: &AccountAddress, denom: &str) -> u128 {
        self.balances
            .get(account)
            .map(|coins| coins.amount_of(denom))
            .unwrap_or(0)
    }

    /// Get all balances for an account
    pub fn all_balances(&self, account: &AccountAddress) -> Coins {
        self.balances.get(account).cloned().unwrap_or_default()
    }

    /// Get total supply of a denomination
    pub fn total_supply(&self, denom: &str) -> u128 {
        self.supply.amount_of(denom)
    }

    pub fn supply(&self) -> &Coins {
        &self.supply
    }

    /// Create new supply owned by `account`
    pub fn mint(&mut self, account: &AccountAddress, coins: &Coins) -> Result<(), BalanceError> {
        let supply = self
            .supply
            .checked_add(coins)
            .ok_or(BalanceError::Overflow)?;
        let balance = self.credited(account, coins)?;

        self.supply = supply;
        self.store(account.clone(), balance);
        Ok(())
    }

    /// Move coins between two accounts; supply is unchanged
    pub fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        coins: &Coins,
    ) -> Result<(), BalanceError> {
        let from_balance = self.debited(from, coins)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.credited(to, coins)?;

        self.store(from.clone(), from_balance);
        self.store(to.clone(), to_balance);
        Ok(())
    }

    fn credited(&self, account: &AccountAddress, coins: &Coins) -> Result<Coins, BalanceError> {
        self.all_balances(account)
            .checked_add(coins)
            .ok_or(BalanceError::Overflow)
    }

    fn debited(&self, account: &AccountAddress, coins: &Coins) -> Result<Coins, BalanceError> {
        let available = self.all_balances(account);
        available
            .checked_sub(coins)
            .ok_or_else(|| BalanceError::InsufficientFunds {
                address: account.clone(),
                available: available.clone(),
                needed: coins.clone(),
            })
    }

    fn store(&mut self, account: AccountAddress, coins: Coins) {
        if coins.is_empty() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, coins);
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::account::{AccountAddress, AddressCodec, GenesisAccount};
use crate::bank::{Bank, BankError};
use crate::coin::Coins;
use crate::error::AccountError;

#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("cannot read genesis file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse genesis file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("genesis account #{index} ({address}): {source}")]
    Account {
        index: usize,
        address: String,
        #[source]
        source: AccountError,
    },
    #[error("duplicate account found in genesis state: {0}")]
    DuplicateAccount(String),
    #[error("invalid genesis balance for {address}: {reason}")]
    InvalidBalance { address: String, reason: String },
    #[error("duplicate genesis balance found for {0}")]
    DuplicateBalance(String),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Initial balance of one account.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisBalance {
    pub address: String,
    pub coins: Coins,
}

/// The ledger's starting state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisState {
    pub genesis_time: DateTime<Utc>,
    pub chain_id: String,
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,
    #[serde(default)]
    pub balances: Vec<GenesisBalance>,
}

impl GenesisState {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            genesis_time: Utc::now(),
            chain_id: chain_id.into(),
            accounts: Vec::new(),
            balances: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GenesisError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Validation result of each account, in document order.
    pub fn account_results<'a, C: AddressCodec>(
        &'a self,
        codec: &'a C,
    ) -> impl Iterator<Item = (&'a GenesisAccount, Result<(), AccountError>)> + 'a {
        self.accounts.iter().map(move |acc| (acc, acc.validate(codec)))
    }

    /// Validate every account, then the set as a whole. Stops at the first
    /// problem.
    pub fn validate<C: AddressCodec>(&self, codec: &C) -> Result<(), GenesisError> {
        let mut seen = HashSet::new();
        for (index, account) in self.accounts.iter().enumerate() {
            account.validate(codec).map_err(|source| {
                warn!("genesis: account #{} ({}) rejected: {}", index, account.address(), source);
                GenesisError::Account {
                    index,
                    address: account.address().to_string(),
                    source,
                }
            })?;
            // validated above, so the address decodes
            let address = codec
                .string_to_bytes(account.address())
                .map_err(|e| GenesisError::Account {
                    index,
                    address: account.address().to_string(),
                    source: AccountError::BaseAccountInvalid(e.to_string()),
                })?;
            if !seen.insert(address) {
                return Err(GenesisError::DuplicateAccount(account.address().to_string()));
            }
        }

        self.decoded_balances(codec)?;

        info!(
            "genesis: {} accounts and {} balances valid for chain '{}'",
            self.accounts.len(),
            self.balances.len(),
            self.chain_id
        );
        Ok(())
    }

    /// Validate, then register genesis module accounts and seed balances.
    /// `bank` is only replaced once every balance has been applied.
    pub fn init_bank<C: AddressCodec>(&self, codec: &C, bank: &mut Bank) -> Result<(), GenesisError> {
        self.validate(codec)?;

        let mut seeded = bank.clone();
        for module in self.accounts.iter().filter_map(GenesisAccount::module_account) {
            seeded.register_module_account(module.name, module.permissions.to_vec());
        }
        for (address, coins) in self.decoded_balances(codec)? {
            seeded.set_genesis_balance(&address, &coins)?;
        }

        info!("genesis: bank initialised, supply {}", seeded.supply());
        *bank = seeded;
        Ok(())
    }

    fn decoded_balances<C: AddressCodec>(
        &self,
        codec: &C,
    ) -> Result<Vec<(AccountAddress, Coins)>, GenesisError> {
        let mut seen = HashSet::new();
        let mut decoded = Vec::with_capacity(self.balances.len());
        for balance in &self.balances {
            let address = codec
                .string_to_bytes(&balance.address)
                .map_err(|e| GenesisError::InvalidBalance {
                    address: balance.address.clone(),
                    reason: e.to_string(),
                })?;
            for coin in balance.coins.iter() {
                crate::bank::validate_denom(&coin.denom).map_err(|e| {
                    GenesisError::InvalidBalance {
                        address: balance.address.clone(),
                        reason: e.to_string(),
                    }
                })?;
            }
            if !seen.insert(address.clone()) {
                return Err(GenesisError::DuplicateBalance(balance.address.clone()));
            }
            decoded.push((address, balance.coins.clone()));
        }
        Ok(decoded)
    }
}

//! Structural and temporal checks run over genesis accounts.
//!
//! Checks run in a fixed order (vesting schedule, module account, base
//! account) and the first failure is returned.

use std::collections::HashSet;

use super::address::AddressCodec;
use super::types::{BaseAccount, GenesisAccount, ModuleAccount, VestingFacet};
use crate::crypto::{module_address, pub_key_address};
use crate::error::AccountError;

impl VestingFacet {
    /// A schedule only has to be well-ordered when something actually vests.
    pub fn validate(&self) -> Result<(), AccountError> {
        if !self.original_vesting.is_zero() && self.start_time >= self.end_time {
            return Err(AccountError::VestingScheduleInvalid {
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }
        Ok(())
    }
}

impl ModuleAccount<'_> {
    /// Name, permissions and name-derived address. The base account's own
    /// rule is not re-run here.
    pub fn validate<C: AddressCodec>(&self, codec: &C) -> Result<(), AccountError> {
        if self.name.trim().is_empty() {
            return Err(AccountError::ModuleAccountInvalid(
                "module account name cannot be blank".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for permission in self.permissions {
            if permission.trim().is_empty() {
                return Err(AccountError::ModuleAccountInvalid(format!(
                    "module '{}' has an empty permission",
                    self.name
                )));
            }
            if !seen.insert(permission.as_str()) {
                return Err(AccountError::ModuleAccountInvalid(format!(
                    "module '{}' lists permission '{}' more than once",
                    self.name, permission
                )));
            }
        }

        let derived = module_address(self.name);
        match codec.string_to_bytes(&self.base.address) {
            Ok(address) if address == derived => Ok(()),
            _ => Err(AccountError::ModuleAccountInvalid(format!(
                "address {} cannot be derived from the module name '{}'",
                self.base.address, self.name
            ))),
        }
    }
}

impl BaseAccount {
    pub fn validate<C: AddressCodec>(&self, codec: &C) -> Result<(), AccountError> {
        let address = codec.string_to_bytes(&self.address).map_err(|e| {
            AccountError::BaseAccountInvalid(format!("address '{}': {}", self.address, e))
        })?;

        if let Some(pub_key) = &self.pub_key {
            let key_address = pub_key_address(pub_key)
                .map_err(|e| AccountError::BaseAccountInvalid(e.to_string()))?;
            if key_address != address {
                return Err(AccountError::BaseAccountInvalid(
                    "account address and pubkey address do not match".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl GenesisAccount {
    pub fn validate<C: AddressCodec>(&self, codec: &C) -> Result<(), AccountError> {
        if let Some(vesting) = &self.vesting {
            vesting.validate()?;
        }

        if let Some(module) = self.module_account() {
            module.validate(codec)?;
        }

        self.base.validate(codec)
    }
}

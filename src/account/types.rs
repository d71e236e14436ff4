//! Account shapes found in the genesis state.

use serde::{Deserialize, Serialize};

use crate::coin::Coins;

/// Permission allowing a module account to mint new supply.
pub const MINTER: &str = "minter";
/// Permission allowing a module account to burn supply.
pub const BURNER: &str = "burner";

/// Plain account record.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseAccount {
    pub address: String,
    /// Hex-encoded ed25519 public key, absent until the first signed tx.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_key: Option<String>,
    #[serde(default)]
    pub account_number: u64,
    #[serde(default)]
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }
}

/// Time-gated release schedule carried by a vesting account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VestingFacet {
    pub original_vesting: Coins,
    pub delegated_free: Coins,
    pub delegated_vesting: Coins,
    /// Unix epoch seconds
    pub start_time: i64,
    /// Unix epoch seconds
    pub end_time: i64,
}

impl VestingFacet {
    fn is_unset(&self) -> bool {
        self.original_vesting.is_empty()
            && self.delegated_free.is_empty()
            && self.delegated_vesting.is_empty()
            && self.start_time == 0
            && self.end_time == 0
    }
}

/// Name and permissions of a system-owned account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleFacet {
    pub name: String,
    pub permissions: Vec<String>,
}

/// A module account: a base account identified by a reserved name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleAccount<'a> {
    pub base: &'a BaseAccount,
    pub name: &'a str,
    pub permissions: &'a [String],
}

impl ModuleAccount<'_> {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Account present in the initial ledger state.
///
/// The vesting and module facets are orthogonal; an account may carry
/// either, both or neither.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "GenesisAccountRecord", into = "GenesisAccountRecord")]
pub struct GenesisAccount {
    pub base: BaseAccount,
    pub vesting: Option<VestingFacet>,
    pub module: Option<ModuleFacet>,
}

impl GenesisAccount {
    pub fn new(base: BaseAccount) -> Self {
        Self {
            base,
            vesting: None,
            module: None,
        }
    }

    pub fn with_vesting(mut self, vesting: VestingFacet) -> Self {
        self.vesting = Some(vesting);
        self
    }

    pub fn with_module(mut self, name: impl Into<String>, permissions: Vec<String>) -> Self {
        self.module = Some(ModuleFacet {
            name: name.into(),
            permissions,
        });
        self
    }

    pub fn address(&self) -> &str {
        &self.base.address
    }

    /// Module-account view of this account, if it carries a module facet.
    pub fn module_account(&self) -> Option<ModuleAccount<'_>> {
        self.module.as_ref().map(|m| ModuleAccount {
            base: &self.base,
            name: &m.name,
            permissions: &m.permissions,
        })
    }
}

/// Flat on-disk layout of a genesis account.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
struct GenesisAccountRecord {
    #[serde(flatten)]
    base: BaseAccount,

    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    original_vesting: Coins,
    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    delegated_free: Coins,
    #[serde(default, skip_serializing_if = "Coins::is_empty")]
    delegated_vesting: Coins,
    #[serde(default, skip_serializing_if = "is_zero")]
    start_time: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    end_time: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    module_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    module_permissions: Vec<String>,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

impl From<GenesisAccountRecord> for GenesisAccount {
    fn from(record: GenesisAccountRecord) -> Self {
        let vesting = VestingFacet {
            original_vesting: record.original_vesting,
            delegated_free: record.delegated_free,
            delegated_vesting: record.delegated_vesting,
            start_time: record.start_time,
            end_time: record.end_time,
        };
        let module = (!record.module_name.is_empty()).then(|| ModuleFacet {
            name: record.module_name,
            permissions: record.module_permissions,
        });

        Self {
            base: record.base,
            vesting: (!vesting.is_unset()).then_some(vesting),
            module,
        }
    }
}

impl From<GenesisAccount> for GenesisAccountRecord {
    fn from(account: GenesisAccount) -> Self {
        let vesting = account.vesting.unwrap_or_default();
        let module = account.module.unwrap_or_default();
        Self {
            base: account.base,
            original_vesting: vesting.original_vesting,
            delegated_free: vesting.delegated_free,
            delegated_vesting: vesting.delegated_vesting,
            start_time: vesting.start_time,
            end_time: vesting.end_time,
            module_name: module.name,
            module_permissions: module.permissions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::Coin;

    #[test]
    fn test_plain_record_has_no_facets() {
        let account: GenesisAccount =
            serde_json::from_str(r#"{"address":"cosmos1xyz","account_number":3}"#).unwrap();

        assert_eq!(account.base.address, "cosmos1xyz");
        assert_eq!(account.base.account_number, 3);
        assert!(account.vesting.is_none());
        assert!(account.module.is_none());
    }

    #[test]
    fn test_record_with_both_facets() {
        let json = r#"{
            "address": "cosmos1xyz",
            "original_vesting": [{"denom": "stake", "amount": "100"}],
            "start_time": 1000,
            "end_time": 2000,
            "module_name": "mint",
            "module_permissions": ["minter"]
        }"#;
        let account: GenesisAccount = serde_json::from_str(json).unwrap();

        let vesting = account.vesting.as_ref().unwrap();
        assert_eq!(vesting.original_vesting, Coins::from(Coin::new("stake", 100u64)));
        assert_eq!((vesting.start_time, vesting.end_time), (1000, 2000));

        let module = account.module_account().unwrap();
        assert_eq!(module.name, "mint");
        assert!(module.has_permission(MINTER));
        assert!(!module.has_permission(BURNER));
    }

    #[test]
    fn test_permissions_without_name_are_not_a_module_account() {
        let account: GenesisAccount = serde_json::from_str(
            r#"{"address":"cosmos1xyz","module_permissions":["minter"]}"#,
        )
        .unwrap();
        assert!(account.module.is_none());
    }

    #[test]
    fn test_serializes_flat() {
        let account = GenesisAccount::new(BaseAccount::new("cosmos1xyz"))
            .with_module("token", vec![MINTER.to_string()]);
        let value = serde_json::to_value(&account).unwrap();

        assert_eq!(value["address"], "cosmos1xyz");
        assert_eq!(value["module_name"], "token");
        assert!(value.get("original_vesting").is_none());
    }
}

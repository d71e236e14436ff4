//! Account model: addresses, genesis account shapes and balances.
//!
//! - Human-readable (bech32) and canonical binary addresses
//! - Plain, vesting and module account facets
//! - Structural validation of genesis accounts
//! - Per-account, per-denomination balance tracking

pub mod address;
pub mod balance;
pub mod types;
pub mod validate;

pub use address::{AccountAddress, AddressCodec, AddressError, Bech32Codec};
pub use balance::{BalanceError, BalanceStore};
pub use types::{BaseAccount, GenesisAccount, ModuleAccount, ModuleFacet, VestingFacet, BURNER, MINTER};

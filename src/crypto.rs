use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::account::AccountAddress;

/// Length of addresses derived from hashes (truncated SHA-256).
pub const ADDRESS_HASH_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("public key is not valid hex: {0}")]
    Hex(String),
    #[error("public key must be 32 bytes, got {0}")]
    Length(usize),
    #[error("not a valid ed25519 public key")]
    InvalidPoint,
}

/// SHA-256 truncated to 20 bytes.
pub fn address_hash(data: &[u8]) -> AccountAddress {
    let digest = Sha256::digest(data);
    AccountAddress::from_digest(&digest[..ADDRESS_HASH_LEN])
}

/// Address owned by the module with the given name.
pub fn module_address(name: &str) -> AccountAddress {
    address_hash(name.as_bytes())
}

/// Parse a hex ed25519 public key and return the address it controls.
pub fn pub_key_address(pub_key_hex: &str) -> Result<AccountAddress, KeyError> {
    let bytes = hex::decode(pub_key_hex).map_err(|e| KeyError::Hex(e.to_string()))?;
    let raw: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyError::Length(bytes.len()))?;
    let key = VerifyingKey::from_bytes(&raw).map_err(|_| KeyError::InvalidPoint)?;
    Ok(address_hash(key.as_bytes()))
}

//! Account addresses and the human-readable codec.

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Longest canonical address accepted by the codec.
pub const MAX_ADDRESS_LEN: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,
    #[error("invalid bech32 string: {0}")]
    Bech32(String),
    #[error("invalid bech32 prefix: expected {expected}, got {got}")]
    WrongPrefix { expected: String, got: String },
    #[error("unsupported bech32 variant, expected bech32")]
    WrongVariant,
    #[error("address length {0} out of range (1..={MAX_ADDRESS_LEN} bytes)")]
    InvalidLength(usize),
    #[error("invalid hex address: {0}")]
    Hex(String),
}

/// Canonical binary form of an account identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress(Vec<u8>);

impl AccountAddress {
    pub fn new(bytes: Vec<u8>) -> Result<Self, AddressError> {
        if bytes.is_empty() || bytes.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// Wraps bytes already known to be within bounds (fixed-size digests).
    pub(crate) fn from_digest(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(s).map_err(|e| AddressError::Hex(e.to_string()))?;
        Self::new(bytes)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(&self.0))
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Snapshots store addresses as upper-case hex; the codec prefix is a
// per-chain concern the ledger does not know about.
impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Converts between human-readable identifiers and [`AccountAddress`].
pub trait AddressCodec {
    fn string_to_bytes(&self, text: &str) -> Result<AccountAddress, AddressError>;

    fn bytes_to_string(&self, address: &AccountAddress) -> Result<String, AddressError>;
}

/// Bech32 codec bound to one human-readable prefix.
#[derive(Clone, Debug)]
pub struct Bech32Codec {
    prefix: String,
}

impl Bech32Codec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl AddressCodec for Bech32Codec {
    fn string_to_bytes(&self, text: &str) -> Result<AccountAddress, AddressError> {
        if text.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data, variant) =
            bech32::decode(text).map_err(|e| AddressError::Bech32(e.to_string()))?;
        if hrp != self.prefix {
            return Err(AddressError::WrongPrefix {
                expected: self.prefix.clone(),
                got: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::WrongVariant);
        }

        let bytes = Vec::<u8>::from_base32(&data).map_err(|e| AddressError::Bech32(e.to_string()))?;
        AccountAddress::new(bytes)
    }

    fn bytes_to_string(&self, address: &AccountAddress) -> Result<String, AddressError> {
        bech32::encode(&self.prefix, address.as_bytes().to_base32(), Variant::Bech32)
            .map_err(|e| AddressError::Bech32(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> Bech32Codec {
        Bech32Codec::new("cosmos")
    }

    #[test]
    fn test_encode_then_decode() {
        let addr = AccountAddress::new(vec![7u8; 20]).unwrap();
        let text = codec().bytes_to_string(&addr).unwrap();

        assert!(text.starts_with("cosmos1"));
        assert_eq!(codec().string_to_bytes(&text).unwrap(), addr);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(codec().string_to_bytes(""), Err(AddressError::Empty));
        assert_eq!(codec().string_to_bytes("   "), Err(AddressError::Empty));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            codec().string_to_bytes("not-an-address"),
            Err(AddressError::Bech32(_))
        ));
    }

    #[test]
    fn test_rejects_other_prefix() {
        let addr = AccountAddress::new(vec![1u8; 20]).unwrap();
        let text = Bech32Codec::new("osmo").bytes_to_string(&addr).unwrap();

        assert!(matches!(
            codec().string_to_bytes(&text),
            Err(AddressError::WrongPrefix { .. })
        ));
    }

    #[test]
    fn test_address_length_bounds() {
        assert_eq!(AccountAddress::new(vec![]), Err(AddressError::InvalidLength(0)));
        assert!(AccountAddress::new(vec![0u8; MAX_ADDRESS_LEN]).is_ok());
        assert!(AccountAddress::new(vec![0u8; MAX_ADDRESS_LEN + 1]).is_err());
    }

    #[test]
    fn test_hex_serde() {
        let addr = AccountAddress::new(vec![0xAB, 0x01]).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"AB01\"");
        assert_eq!(serde_json::from_str::<AccountAddress>(&json).unwrap(), addr);
    }
}

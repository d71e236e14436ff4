//! Amounts of named tokens.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Denomination identifier (e.g. `stake`)
pub type Denom = String;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("negative coin amount: {0}")]
    NegativeAmount(i128),
    #[error("duplicate denomination {0}")]
    DuplicateDenom(Denom),
}

/// A non-negative quantity of a single denomination.
///
/// Zero is a valid coin; rejecting zero-amount requests is up to the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coin {
    pub denom: Denom,
    #[serde(with = "crate::encoding::serde_string")]
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<Denom>, amount: impl Into<u128>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Build a coin from a signed amount, refusing negative values.
    pub fn from_signed(denom: impl Into<Denom>, amount: i128) -> Result<Self, CoinError> {
        let amount = u128::try_from(amount).map_err(|_| CoinError::NegativeAmount(amount))?;
        Ok(Self::new(denom, amount))
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A multiset of coins: sorted by denomination, one entry per denomination,
/// no zero entries.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there is no coin with a positive amount.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Coin::is_zero)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .map(|i| self.0[i].amount)
            .unwrap_or(0)
    }

    /// Sum of `self` and `other`, `None` on overflow.
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut merged: BTreeMap<&str, u128> =
            self.0.iter().map(|c| (c.denom.as_str(), c.amount)).collect();
        for coin in &other.0 {
            let slot = merged.entry(coin.denom.as_str()).or_insert(0);
            *slot = slot.checked_add(coin.amount)?;
        }
        Some(Self::from_sorted(
            merged.into_iter().map(|(d, a)| Coin::new(d, a)),
        ))
    }

    /// Difference `self - other`, `None` if any denomination would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut remaining: BTreeMap<&str, u128> =
            self.0.iter().map(|c| (c.denom.as_str(), c.amount)).collect();
        for coin in &other.0 {
            let current = remaining.get(coin.denom.as_str()).copied().unwrap_or(0);
            let left = current.checked_sub(coin.amount)?;
            remaining.insert(coin.denom.as_str(), left);
        }
        Some(Self::from_sorted(
            remaining.into_iter().map(|(d, a)| Coin::new(d, a)),
        ))
    }

    fn from_sorted(iter: impl Iterator<Item = Coin>) -> Self {
        Self(iter.filter(|c| !c.is_zero()).collect())
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Self::from_sorted(std::iter::once(coin))
    }
}

/// Sorts by denomination and drops zero amounts. A denomination listed
/// twice is refused rather than summed.
impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        let mut sorted: BTreeMap<Denom, u128> = BTreeMap::new();
        for coin in coins {
            if sorted.insert(coin.denom.clone(), coin.amount).is_some() {
                return Err(CoinError::DuplicateDenom(coin.denom));
            }
        }
        Ok(Self::from_sorted(sorted.into_iter().map(|(d, a)| Coin::new(d, a))))
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_coin_is_allowed() {
        let coin = Coin::new("stake", 0u64);
        assert!(coin.is_zero());
        assert_eq!(coin.to_string(), "0stake");
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(Coin::from_signed("stake", 42).unwrap(), Coin::new("stake", 42u64));
        assert_eq!(
            Coin::from_signed("stake", -1),
            Err(CoinError::NegativeAmount(-1))
        );
    }

    #[test]
    fn test_coins_are_normalized() {
        let coins = Coins::try_from(vec![
            Coin::new("uatom", 12u64),
            Coin::new("stake", 10u64),
            Coin::new("zero", 0u64),
        ])
        .unwrap();

        assert_eq!(coins.len(), 2);
        assert_eq!(coins.amount_of("uatom"), 12);
        assert_eq!(coins.amount_of("stake"), 10);
        assert_eq!(coins.amount_of("zero"), 0);
        assert_eq!(coins.to_string(), "10stake,12uatom");
    }

    #[test]
    fn test_is_zero() {
        assert!(Coins::new().is_zero());
        assert!(Coins::from(Coin::new("stake", 0u64)).is_zero());
        assert!(!Coins::from(Coin::new("stake", 1u64)).is_zero());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Coins::try_from(vec![Coin::new("stake", 100u64), Coin::new("uatom", 3u64)]).unwrap();
        let b = Coins::from(Coin::new("stake", 100u64));

        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff, Coins::from(Coin::new("uatom", 3u64)));

        assert!(b.checked_sub(&a).is_none());

        let sum = diff.checked_add(&b).unwrap();
        assert_eq!(sum, a);

        let max = Coins::from(Coin::new("stake", u128::MAX));
        assert!(max.checked_add(&b).is_none());
    }

    #[test]
    fn test_coins_json_shape() {
        let coins: Coins =
            serde_json::from_str(r#"[{"denom":"stake","amount":"100"}]"#).unwrap();
        assert_eq!(coins.amount_of("stake"), 100);
        assert_eq!(
            serde_json::to_string(&coins).unwrap(),
            r#"[{"denom":"stake","amount":"100"}]"#
        );
    }

    #[test]
    fn test_duplicate_denoms_are_refused() {
        assert_eq!(
            Coins::try_from(vec![Coin::new("stake", 1u64), Coin::new("stake", 2u64)]),
            Err(CoinError::DuplicateDenom("stake".to_string()))
        );

        let json = format!(
            r#"[{{"denom":"stake","amount":"{}"}},{{"denom":"stake","amount":"5"}}]"#,
            u128::MAX
        );
        let err = serde_json::from_str::<Coins>(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate denomination stake"));
    }
}

//! Serde helpers shared by the wire and genesis types.

/// (De)serializes any `Display + FromStr` value as a JSON string.
///
/// Coin amounts travel as decimal strings; JSON numbers lose precision
/// past 2^53.
pub mod serde_string {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Wrapper {
        #[serde(with = "super::serde_string")]
        amount: u128,
    }

    #[test]
    fn test_amount_is_a_string_on_the_wire() {
        let json = serde_json::to_string(&Wrapper { amount: u128::MAX }).unwrap();
        assert_eq!(json, format!("{{\"amount\":\"{}\"}}", u128::MAX));

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, u128::MAX);
    }

    #[test]
    fn test_rejects_non_numeric_amount() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"12abc"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"-5"}"#).is_err());
    }
}

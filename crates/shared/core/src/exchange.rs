use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an exchange
///
/// Identifiers are lowercase and hyphen-separated (`binance-usds-futures`).
/// Construction normalizes case so lookups are insensitive to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ExchangeId(String);

impl ExchangeId {
    pub fn new(id: impl Into<String>) -> Self {
        ExchangeId(id.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        ExchangeId::new(s)
    }
}

impl From<String> for ExchangeId {
    fn from(s: String) -> Self {
        ExchangeId::new(s)
    }
}

impl From<ExchangeId> for String {
    fn from(id: ExchangeId) -> Self {
        id.0
    }
}

impl AsRef<str> for ExchangeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_id_normalizes_case() {
        let id = ExchangeId::new("Binance-USDS-Futures");
        assert_eq!(id.as_str(), "binance-usds-futures");
        assert_eq!(id, ExchangeId::from("binance-usds-futures"));
    }

    #[test]
    fn test_exchange_id_serde_is_plain_string() {
        let id = ExchangeId::new("okx");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"okx\"");

        let back: ExchangeId = serde_json::from_str("\"OKX\"").unwrap();
        assert_eq!(back, id);
    }
}

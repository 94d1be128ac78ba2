use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Contract family of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Spot trading pair (e.g., BTC/USDT)
    #[default]
    Spot,
    /// Dated futures contract
    Future,
    /// Perpetual swap without expiry
    Swap,
    /// Option contract
    Option,
}

impl InstrumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Spot => "spot",
            InstrumentKind::Future => "future",
            InstrumentKind::Swap => "swap",
            InstrumentKind::Option => "option",
        }
    }

    /// Check if this is a derivative (non-spot)
    pub fn is_derivative(&self) -> bool {
        !matches!(self, InstrumentKind::Spot)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown instrument kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for InstrumentKind {
    type Err = ParseKindError;

    /// Accepts the spellings exchanges use for their product categories.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" => Ok(InstrumentKind::Spot),
            "future" | "futures" | "delivery" => Ok(InstrumentKind::Future),
            "swap" | "perpetual" | "perp" | "linear" | "inverse" => Ok(InstrumentKind::Swap),
            "option" | "options" => Ok(InstrumentKind::Option),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::InstrumentKind;

/// Unique identifier for an instrument on its exchange
///
/// This is the exchange-native name (`BTCUSDT`, `XBTUSD`, `BTC-PERPETUAL`),
/// not the unified `BASE/QUOTE` label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    /// Create a new instrument ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tradable symbol on one exchange, in the uniform schema
///
/// Increments and limits are `None` when the exchange did not report them.
/// A reported `"0"` is kept as `Some(0.0)`. The increments are also kept as
/// exact decimals parsed from the exchange's own text.
///
/// `info` holds every raw field the exchange returned, untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    /// `BASE/QUOTE` when both assets are known, otherwise the id
    pub symbol: String,
    pub base: String,
    pub quote: String,
    /// Settlement asset for derivatives
    pub settle: String,
    pub underlying: String,
    pub kind: InstrumentKind,
    /// `None` when the exchange does not report a trading status
    pub active: Option<bool>,
    /// Minimum price increment
    pub tick_size: Option<f64>,
    /// Minimum quantity increment
    pub step_size: Option<f64>,
    #[serde(default)]
    pub tick_size_exact: Option<Decimal>,
    #[serde(default)]
    pub step_size_exact: Option<Decimal>,
    pub min_size: Option<f64>,
    pub min_notional: Option<f64>,
    pub contract_size: Option<f64>,
    pub contract_multiplier: Option<f64>,
    pub info: BTreeMap<String, String>,
}

impl Instrument {
    /// Create an instrument that only knows its exchange id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            symbol: id.clone(),
            id,
            ..Default::default()
        }
    }

    /// Set the asset pair and re-derive the symbol
    pub fn with_assets(mut self, base: impl Into<String>, quote: impl Into<String>) -> Self {
        self.base = base.into();
        self.quote = quote.into();
        self.symbol = Self::unified_symbol(&self.id, &self.base, &self.quote);
        self
    }

    /// `BASE/QUOTE` when both sides are non-empty, else the exchange id.
    pub fn unified_symbol(id: &str, base: &str, quote: &str) -> String {
        if !base.is_empty() && !quote.is_empty() {
            format!("{}/{}", base, quote)
        } else {
            id.to_string()
        }
    }

    pub fn instrument_id(&self) -> InstrumentId {
        InstrumentId::new(self.id.clone())
    }

    /// Set the price increment from the exchange's text
    pub fn with_tick_size(mut self, raw: &str) -> Self {
        self.tick_size = raw.trim().parse().ok();
        self.tick_size_exact = exact_decimal(raw);
        self
    }

    /// Set the quantity increment from the exchange's text
    pub fn with_step_size(mut self, raw: &str) -> Self {
        self.step_size = raw.trim().parse().ok();
        self.step_size_exact = exact_decimal(raw);
        self
    }

    /// Price increment exactly as the exchange wrote it
    pub fn tick_size_decimal(&self) -> Option<Decimal> {
        self.tick_size_exact
    }

    /// Quantity increment exactly as the exchange wrote it
    pub fn step_size_decimal(&self) -> Option<Decimal> {
        self.step_size_exact
    }

    /// Raw value the exchange sent for a field
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.info.get(field).map(String::as_str)
    }
}

/// Parse exchange text into an exact decimal.
///
/// Accepts plain (`0.00001`) and scientific (`1e-5`) notation. `None` for
/// blank text or values outside the 28-digit decimal range.
pub fn exact_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instrument(id={}, symbol={}, base={}, quote={}, kind={}",
            self.id, self.symbol, self.base, self.quote, self.kind
        )?;
        if let Some(tick) = self.tick_size {
            write!(f, ", tick={}", tick)?;
        }
        if let Some(step) = self.step_size {
            write!(f, ", step={}", step)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_symbol_from_assets() {
        let inst = Instrument::new("BTCUSDT").with_assets("BTC", "USDT");
        assert_eq!(inst.symbol, "BTC/USDT");
        assert_eq!(inst.instrument_id().as_str(), "BTCUSDT");
    }

    #[test]
    fn test_symbol_falls_back_to_id() {
        let inst = Instrument::new("XBTUSD").with_assets("XBT", "");
        assert_eq!(inst.symbol, "XBTUSD");

        let inst = Instrument::new("XBTUSD").with_assets("", "USD");
        assert_eq!(inst.symbol, "XBTUSD");
    }

    #[test]
    fn test_increments_unset_by_default() {
        let inst = Instrument::new("ETHBTC");
        assert_eq!(inst.tick_size, None);
        assert_eq!(inst.step_size, None);
        assert_eq!(inst.tick_size_decimal(), None);
    }

    #[test]
    fn test_decimal_increments() {
        let inst = Instrument::new("BTCUSDT")
            .with_tick_size("0.01")
            .with_step_size("0.00001");
        assert_eq!(inst.tick_size, Some(0.01));
        assert_eq!(inst.tick_size_decimal(), Some(dec!(0.01)));
        assert_eq!(inst.step_size_decimal(), Some(dec!(0.00001)));
    }

    #[test]
    fn test_decimal_keeps_digits_beyond_f64() {
        let inst = Instrument::new("SHIBUSDT").with_tick_size("0.1234567890123456789");
        assert_eq!(inst.tick_size_decimal(), Some(dec!(0.1234567890123456789)));
        assert_eq!(inst.tick_size, Some(0.12345678901234568));
    }

    #[test]
    fn test_exact_decimal_notations() {
        assert_eq!(exact_decimal(" 0.0005 "), Some(dec!(0.0005)));
        assert_eq!(exact_decimal("1e-8"), Some(dec!(0.00000001)));
        assert_eq!(exact_decimal("5E-3"), Some(dec!(0.005)));
        assert_eq!(exact_decimal(""), None);
        assert_eq!(exact_decimal("abc"), None);
    }

    #[test]
    fn test_display() {
        let inst = Instrument {
            tick_size: Some(0.5),
            ..Instrument::new("XBTUSD").with_assets("XBT", "USD")
        };
        assert_eq!(
            inst.to_string(),
            "Instrument(id=XBTUSD, symbol=XBT/USD, base=XBT, quote=USD, kind=spot, tick=0.5)"
        );
    }

    #[test]
    fn test_serde_round_trip_keeps_unset() {
        let inst = Instrument::new("BTC-PERPETUAL");
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instrument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
        assert!(back.tick_size.is_none());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time in epoch milliseconds
    pub timestamp: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: u64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Whether the bar opened inside `[from, to]`; open bounds are unlimited
    pub fn within(&self, from: Option<u64>, to: Option<u64>) -> bool {
        from.is_none_or(|from| self.timestamp >= from) && to.is_none_or(|to| self.timestamp <= to)
    }
}

impl fmt::Display for Candle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Candle(ts={}, O={:.8}, H={:.8}, L={:.8}, C={:.8}, V={:.8})",
            self.timestamp, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

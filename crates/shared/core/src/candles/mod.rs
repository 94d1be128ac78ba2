//! Historical OHLCV data
//!
//! - `Candle`: one bar, timestamped at its open in epoch milliseconds
//! - `Timeframe`: bar width, in the short spellings exchanges use (`1m`, `4h`, `1d`)

mod candle;
mod timeframe;

pub use candle::Candle;
pub use timeframe::{ParseTimeframeError, Timeframe};

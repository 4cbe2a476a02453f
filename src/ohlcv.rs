use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Traded volume of a bar.
pub type Volume = f64;

/// Calendar day of a bar. Series are ordered by this key, oldest first.
pub type Date = NaiveDate;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid conversion.
/// Indicators accept `&[impl Ohlcv]` and extract the configured
/// [`PriceSource`](crate::PriceSource) internally. The position of a bar in
/// the slice is the join key between the input and every indicator series.
///
/// # Example
///
/// ```
/// use signal_engine::{Date, Ohlcv, Price, Volume};
///
/// struct MyKline {
///     h: f64, l: f64, c: f64, v: f64,
///     day: Date,
/// }
///
/// impl Ohlcv for MyKline {
///     fn date(&self) -> Date { self.day }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> Volume { self.v }
/// }
/// ```
pub trait Ohlcv {
    /// Trading day of the bar.
    fn date(&self) -> Date;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Traded volume during the bar.
    fn volume(&self) -> Volume;
}

/// Plain daily bar, as delivered by a market data backend.
///
/// `open` is carried through for completeness; no indicator reads it.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Bar {
    pub date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Price>,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

impl Ohlcv for Bar {
    fn date(&self) -> Date {
        self.date
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn volume(&self) -> Volume {
        self.volume
    }
}

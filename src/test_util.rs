// src/test_util.rs

use crate::{Bar, Date, Price, Series};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Day `n` counted from 2024-01-01.
pub fn day(n: u64) -> Date {
    Date::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(chrono::Days::new(n))
        .unwrap()
}

/// Bar with explicit high/low/close and unit volume, dated `day(n)`.
pub fn ohlc(high: Price, low: Price, close: Price, n: u64) -> Bar {
    Bar {
        date: day(n),
        open: None,
        high,
        low,
        close,
        volume: 1.0,
    }
}

/// Convenience: bar with just a close price (high and low equal to close).
pub fn bar(close: Price, n: u64) -> Bar {
    ohlc(close, close, close, n)
}

/// Consecutive flat bars for a list of closes.
pub fn bars(closes: &[Price]) -> Vec<Bar> {
    closes
        .iter()
        .zip(0..)
        .map(|(&close, n)| bar(close, n))
        .collect()
}

/// Wraps every value as present.
pub fn present(values: &[Price]) -> Series {
    values.iter().copied().map(Some).collect()
}

/// Number of leading missing values.
pub fn leading_missing(series: &[Option<Price>]) -> usize {
    series.iter().take_while(|v| v.is_none()).count()
}

#![allow(dead_code)]

use serde::de::DeserializeOwned;
use signal_engine::Bar;

/// Forty daily bars: a slow rise from 100 to 106.2, a blow-off bar at
/// index 32 (high 113, close 112, volume 5000) and a sharp fall to 92.
/// Volume is 1000 on every other bar.
pub const BLOWOFF_PATH: &str = "tests/fixtures/data/blowoff-40d.csv";

/// Index of the blow-off bar in [`BLOWOFF_PATH`].
pub const BLOWOFF_INDEX: usize = 32;

/// Load the blow-off scenario.
pub fn load_blowoff() -> Vec<Bar> {
    load_records(BLOWOFF_PATH, "invalid OHLCV record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Number of leading `None` entries.
pub fn leading_missing<T>(series: &[Option<T>]) -> usize {
    series.iter().take_while(|v| v.is_none()).count()
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}

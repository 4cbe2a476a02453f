use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, series::window,
};

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps a positive, non-NaN `f64`. The constructor panics if the value is
/// zero, negative, or NaN.
///
/// Defaults to `2.0` (the standard Bollinger Bands setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a new standard deviation multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "std_dev must not be NaN");
        assert!(value > 0.0, "std_dev must be positive");
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for StdDev {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StdDev {}

impl Hash for StdDev {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(2.0)
    }
}

/// Configuration for the Bollinger Bands ([`Bb`]) indicator.
///
/// # Example
///
/// ```
/// use signal_engine::{BbConfig, IndicatorConfig, IndicatorConfigBuilder};
/// use std::num::NonZero;
///
/// // Default: close, 2.0 std devs
/// let config = BbConfig::builder()
///     .length(NonZero::new(20).unwrap())
///     .build();
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config, BbConfig::default());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BbConfig {
    length: usize,
    source: PriceSource,
    std_dev: StdDev,
}

impl IndicatorConfig for BbConfig {
    type Builder = BbConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        BbConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl BbConfig {
    /// Standard deviation multiplier for the upper and lower bands.
    #[inline]
    #[must_use]
    pub fn std_dev(&self) -> StdDev {
        self.std_dev
    }

    /// Price source the bands are computed on.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// BB with custom length, close price, 2σ.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for BbConfig {
    /// BB(20, Close, 2σ), the standard Bollinger Bands setting.
    fn default() -> Self {
        Self {
            length: 20,
            source: PriceSource::Close,
            std_dev: StdDev::default(),
        }
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BbConfig({}, {}, {})",
            self.length,
            self.source,
            self.std_dev.value()
        )
    }
}

/// Builder for [`BbConfig`].
///
/// Defaults: source = [`PriceSource::Close`],
/// `std_dev` = `2.0`.
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct BbConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
    std_dev: StdDev,
}

impl BbConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
            std_dev: StdDev::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn std_dev(mut self, std_dev: StdDev) -> Self {
        self.std_dev = std_dev;
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<BbConfig> for BbConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> BbConfig {
        BbConfig {
            length: self.length.expect("length is required"),
            source: self.source,
            std_dev: self.std_dev,
        }
    }
}

/// Bollinger Bands output: upper, middle, and lower bands.
///
/// The middle band is the SMA. Upper and lower bands are offset by
/// `std_dev × σ`, where `σ` is the population standard deviation of the window.
///
/// ```text
/// upper  = SMA + k × σ
/// middle = SMA
/// lower  = SMA − k × σ
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BbValue {
    upper: Price,
    middle: Price,
    lower: Price,
}

impl BbValue {
    /// Upper band: `SMA + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: SMA of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `SMA − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands (BB).
///
/// A volatility indicator consisting of three bands: a simple moving average
/// (middle) with upper and lower bands offset by a configurable number of
/// standard deviations.
///
/// Each window is evaluated in two passes (mean, then squared deviations
/// from it) and the variance is divided by `length`, not `length − 1`.
///
/// # Example
///
/// ```
/// use signal_engine::{Bb, BbConfig};
/// use std::num::NonZero;
///
/// let bb = Bb::new(BbConfig::close(NonZero::new(2).unwrap()));
/// let out = bb.apply(&[Some(10.0), Some(20.0)]);
///
/// // mean 15, σ = 5
/// let value = out[1].unwrap();
/// assert_eq!((value.lower(), value.middle(), value.upper()), (5.0, 15.0, 25.0));
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    config: BbConfig,
}

impl Bb {
    /// Runs the bands over an already extracted series.
    #[must_use]
    pub fn apply(&self, values: &[Option<Price>]) -> Vec<Option<BbValue>> {
        #[allow(clippy::cast_precision_loss)]
        let length_f = self.config.length as f64;
        let multiplier = self.config.std_dev.value();

        (0..values.len())
            .map(|i| {
                let samples = window(values, i, self.config.length)?;

                let mean = samples.iter().sum::<f64>() / length_f;
                let variance = samples
                    .iter()
                    .map(|value| (value - mean).powi(2))
                    .sum::<f64>()
                    / length_f;
                let offset = multiplier * variance.sqrt();

                Some(BbValue {
                    upper: mean + offset,
                    middle: mean,
                    lower: mean - offset,
                })
            })
            .collect()
    }
}

impl Indicator for Bb {
    type Config = BbConfig;
    type Output = BbValue;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &BbConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Vec<Option<BbValue>> {
        self.apply(&self.config.source.series(bars))
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB({}, {}, {})",
            self.config.length,
            self.config.source,
            self.config.std_dev.value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{bars, present};
    use std::num::NonZero;

    fn bb(length: usize) -> Bb {
        Bb::new(BbConfig::close(NonZero::new(length).unwrap()))
    }

    fn bb_with_std_dev(length: usize, std_dev: f64) -> Bb {
        Bb::new(
            BbConfig::builder()
                .length(NonZero::new(length).unwrap())
                .std_dev(StdDev::new(std_dev))
                .build(),
        )
    }

    fn assert_bb(value: Option<BbValue>, upper: f64, middle: f64, lower: f64) {
        let v = value.expect("expected Some(BbValue)");
        assert!(
            (v.upper() - upper).abs() < 1e-10,
            "upper: expected {upper}, got {}",
            v.upper()
        );
        assert!(
            (v.middle() - middle).abs() < 1e-10,
            "middle: expected {middle}, got {}",
            v.middle()
        );
        assert!(
            (v.lower() - lower).abs() < 1e-10,
            "lower: expected {lower}, got {}",
            v.lower()
        );
    }

    mod filling {
        use super::*;

        #[test]
        fn none_until_window_full() {
            let out = bb(3).compute(&bars(&[10.0, 20.0]));
            assert_eq!(out, vec![None, None]);
        }

        #[test]
        fn default_leaves_nineteen_missing() {
            let out = Bb::new(BbConfig::default()).apply(&present(&[1.0; 25]));
            assert_eq!(out.iter().take_while(|v| v.is_none()).count(), 19);
            assert_eq!(out.len(), 25);
        }
    }

    mod bands {
        use super::*;

        #[test]
        fn population_std_dev() {
            // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population σ = 2
            let out = bb(8).apply(&present(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
            assert_bb(out[7], 9.0, 5.0, 1.0);
        }

        #[test]
        fn custom_multiplier() {
            let out = bb_with_std_dev(2, 1.5).apply(&present(&[10.0, 20.0]));
            // mean 15, σ = 5, offset 7.5
            assert_bb(out[1], 22.5, 15.0, 7.5);
        }

        #[test]
        fn flat_window_collapses_bands() {
            let out = bb(3).apply(&present(&[7.0, 7.0, 7.0]));
            assert_bb(out[2], 7.0, 7.0, 7.0);
        }

        #[test]
        fn sliding_window() {
            let out = bb(2).apply(&present(&[10.0, 20.0, 40.0]));
            // mean 30, σ = 10
            assert_bb(out[2], 50.0, 30.0, 10.0);
        }

        #[test]
        fn missing_input_blanks_window() {
            let out = bb(2).apply(&[Some(1.0), None, Some(3.0)]);
            assert_eq!(out, vec![None, None, None]);
        }
    }

    mod std_dev {
        use super::*;

        #[test]
        #[should_panic(expected = "std_dev must be positive")]
        fn rejects_zero() {
            let _ = StdDev::new(0.0);
        }

        #[test]
        #[should_panic(expected = "std_dev must not be NaN")]
        fn rejects_nan() {
            let _ = StdDev::new(f64::NAN);
        }

        #[test]
        fn default_is_two() {
            assert!((StdDev::default().value() - 2.0).abs() < f64::EPSILON);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_indicator() {
            assert_eq!(bb(20).to_string(), "BB(20, Close, 2)");
        }

        #[test]
        fn formats_config() {
            assert_eq!(BbConfig::default().to_string(), "BbConfig(20, Close, 2)");
        }

        #[test]
        fn formats_value() {
            let value = bb(2).apply(&present(&[10.0, 20.0]))[1].unwrap();
            assert_eq!(value.to_string(), "BB(u: 25, m: 15, l: 5)");
        }
    }
}

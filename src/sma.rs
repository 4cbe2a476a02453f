use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Series,
    series::window_mean,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use signal_engine::{IndicatorConfig, SmaConfig};
/// use std::num::NonZero;
///
/// let config = SmaConfig::close(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl SmaConfig {
    /// SMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// SMA on traded volume.
    #[must_use]
    pub fn volume(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::Volume)
            .build()
    }

    /// SMA on true range, i.e. the average true range.
    #[must_use]
    pub fn true_range(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::TrueRange)
            .build()
    }

    /// Price source the SMA reads from each bar.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`SmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> SmaConfig {
        SmaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* values, where *n* is the
/// configured window length. The first `n - 1` entries are `None`, as is
/// any entry whose window holds a missing value.
///
/// # Example
///
/// ```rust
/// use signal_engine::{Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0].map(Some);
///
/// assert_eq!(sma.apply(&values), vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
}

impl Sma {
    /// Runs the SMA over an already extracted series.
    #[must_use]
    pub fn apply(&self, values: &[Option<Price>]) -> Series {
        (0..values.len())
            .map(|i| window_mean(values, i, self.config.length))
            .collect()
    }
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &SmaConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        self.apply(&self.config.source.series(bars))
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, bars, ohlc, present};
    use std::num::NonZero;

    fn sma(length: usize) -> Sma {
        Sma::new(SmaConfig::close(NonZero::new(length).unwrap()))
    }

    mod filling {
        use super::*;

        #[test]
        fn none_until_window_full() {
            let out = sma(3).compute(&bars(&[10.0, 20.0]));
            assert_eq!(out, vec![None, None]);
        }

        #[test]
        fn returns_average_when_full() {
            let out = sma(3).compute(&bars(&[10.0, 20.0, 30.0]));
            assert_eq!(out, vec![None, None, Some(20.0)]);
        }

        #[test]
        fn small_fixture() {
            let out = sma(3).apply(&present(&[1.0, 2.0, 3.0, 4.0, 5.0]));
            assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
        }

        #[test]
        fn length_one_is_identity() {
            let out = sma(1).apply(&present(&[7.0, 8.0]));
            assert_eq!(out, vec![Some(7.0), Some(8.0)]);
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn drops_oldest_on_advance() {
            let out = sma(2).compute(&bars(&[10.0, 20.0, 30.0]));
            // (20 + 30) / 2 = 25
            assert_eq!(out[2], Some(25.0));
        }

        #[test]
        fn non_integral_mean() {
            let out = sma(3).compute(&bars(&[15.0, 20.0, 30.0]));
            // (15 + 20 + 30) / 3 = 21.666...
            assert_approx!(out[2].unwrap(), 65.0 / 3.0);
        }
    }

    mod missing_values {
        use super::*;

        #[test]
        fn missing_input_poisons_window() {
            let out = sma(2).apply(&[Some(1.0), None, Some(3.0), Some(5.0)]);
            assert_eq!(out, vec![None, None, None, Some(4.0)]);
        }

        #[test]
        fn empty_input() {
            assert!(sma(3).apply(&[]).is_empty());
        }

        #[test]
        fn shorter_than_window() {
            assert_eq!(sma(5).apply(&present(&[1.0, 2.0])), vec![None, None]);
        }
    }

    mod price_source {
        use super::*;
        use crate::Bar;

        #[test]
        fn volume_source() {
            let bars = [
                Bar {
                    volume: 100.0,
                    ..ohlc(1.0, 1.0, 1.0, 0)
                },
                Bar {
                    volume: 300.0,
                    ..ohlc(1.0, 1.0, 1.0, 1)
                },
            ];
            let sma = Sma::new(SmaConfig::volume(NonZero::new(2).unwrap()));
            assert_eq!(sma.compute(&bars), vec![None, Some(200.0)]);
        }

        #[test]
        fn true_range_source() {
            let sma = Sma::new(SmaConfig::true_range(NonZero::new(2).unwrap()));
            // TR1 = 20 - 5 = 15
            // TR2: hl=10, |22-15|=7, |12-15|=3 → 10
            // SMA = (15 + 10) / 2 = 12.5
            let bars = [ohlc(20.0, 5.0, 15.0, 0), ohlc(22.0, 12.0, 18.0, 1)];
            assert_eq!(sma.compute(&bars), vec![None, Some(12.5)]);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(sma(20).to_string(), "SMA(20, Close)");
        }
    }

    mod config {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn close_helper_uses_close_source() {
            let config = SmaConfig::close(NonZero::new(10).unwrap());
            assert_eq!(config.source(), PriceSource::Close);
        }

        #[test]
        fn volume_helper_uses_volume_source() {
            let config = SmaConfig::volume(NonZero::new(30).unwrap());
            assert_eq!(config.source(), PriceSource::Volume);
        }

        #[test]
        #[should_panic(expected = "length is required")]
        fn panics_without_length() {
            let _ = SmaConfig::builder().build();
        }

        #[test]
        fn display_config() {
            let config = SmaConfig::close(NonZero::new(20).unwrap());
            assert_eq!(config.to_string(), "SmaConfig(20, Close)");
        }

        #[test]
        fn eq_and_hash() {
            let a = SmaConfig::close(NonZero::new(20).unwrap());
            let b = SmaConfig::close(NonZero::new(20).unwrap());
            let c = SmaConfig::close(NonZero::new(10).unwrap());

            let mut set = HashSet::new();
            set.insert(a);

            assert!(set.contains(&b));
            assert!(!set.contains(&c));
        }
    }
}

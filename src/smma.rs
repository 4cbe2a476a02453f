use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Series,
    series::window_mean,
};

/// Configuration for the Smoothed Moving Average ([`Smma`]) indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmmaConfig {
    type Builder = SmmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmmaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl SmmaConfig {
    /// SMMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Price source the SMMA reads from each bar.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for SmmaConfig {
    /// SMMA(7) on close.
    fn default() -> Self {
        Self {
            length: 7,
            source: PriceSource::Close,
        }
    }
}

impl Display for SmmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`SmmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
pub struct SmmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl SmmaConfigBuilder {
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

impl IndicatorConfigBuilder<SmmaConfig> for SmmaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> SmmaConfig {
        SmmaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Smoothed Moving Average (SMMA), a.k.a. Wilder's moving average.
///
/// Seeded with the SMA of the first `length` values, then:
///
/// ```text
/// SMMA = (prev_SMMA × (length − 1) + price) / length
/// ```
///
/// A missing input breaks the chain; the next full window reseeds from
/// its SMA.
///
/// # Example
///
/// ```
/// use signal_engine::{Smma, SmmaConfig};
/// use std::num::NonZero;
///
/// let smma = Smma::new(SmmaConfig::close(NonZero::new(2).unwrap()));
///
/// // Seed = (2 + 4) / 2 = 3, then (3 × 1 + 7) / 2 = 5
/// let out = smma.apply(&[Some(2.0), Some(4.0), Some(7.0)]);
/// assert_eq!(out, vec![None, Some(3.0), Some(5.0)]);
/// ```
#[derive(Clone, Debug)]
pub struct Smma {
    config: SmmaConfig,
}

impl Smma {
    /// Runs the SMMA over an already extracted series.
    #[must_use]
    pub fn apply(&self, values: &[Option<Price>]) -> Series {
        let length = self.config.length;
        #[allow(clippy::cast_precision_loss)]
        let length_f = length as f64;

        let mut out: Series = Vec::with_capacity(values.len());

        for (i, value) in values.iter().enumerate() {
            let prev = i.checked_sub(1).and_then(|p| out[p]);

            let next = match (prev, value) {
                (_, None) => None,
                (Some(prev), Some(value)) => Some((prev * (length_f - 1.0) + value) / length_f),
                (None, Some(_)) => window_mean(values, i, length),
            };

            out.push(next);
        }

        out
    }
}

impl Indicator for Smma {
    type Config = SmmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &SmmaConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        self.apply(&self.config.source.series(bars))
    }
}

impl Display for Smma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMMA({}, {})", self.config.length, self.config.source)
    }
}

use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Series};

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// # Example
///
/// ```
/// use signal_engine::{EmaConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = EmaConfig::close(NonZero::new(10).unwrap());
/// assert_eq!(config.length(), 10);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl EmaConfig {
    /// EMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Price source the EMA reads from each bar.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct EmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl EmaConfigBuilder {
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

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> EmaConfig {
        EmaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Exponential Moving Average (EMA).
///
/// Uses the standard smoothing factor `α = 2 / (length + 1)`:
///
/// ```text
/// EMA = (price − prev_EMA) × α + prev_EMA
/// ```
///
/// The recurrence is seeded with the first present input itself, not
/// with an SMA, and the seed is emitted: the first present output equals
/// the first present input. Missing inputs produce missing outputs and
/// leave the running value untouched.
///
/// # Example
///
/// ```
/// use signal_engine::{Ema, EmaConfig};
/// use std::num::NonZero;
///
/// let ema = Ema::new(EmaConfig::close(NonZero::new(3).unwrap()));
///
/// // Seed = 2, then α = 0.5: 3, then 4.5
/// let out = ema.apply(&[Some(2.0), Some(4.0), Some(6.0)]);
/// assert_eq!(out, vec![Some(2.0), Some(3.0), Some(4.5)]);
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    alpha: f64,
}

impl Ema {
    /// Runs the EMA over an already extracted series.
    #[must_use]
    pub fn apply(&self, values: &[Option<Price>]) -> Series {
        let mut current: Option<Price> = None;

        values
            .iter()
            .map(|value| {
                let value = (*value)?;

                let next = match current {
                    Some(prev) => (value - prev) * self.alpha + prev,
                    None => value,
                };
                current = Some(next);

                Some(next)
            })
            .collect()
    }
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (config.length + 1) as f64,
        }
    }

    #[inline]
    fn config(&self) -> &EmaConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        self.apply(&self.config.source.series(bars))
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}

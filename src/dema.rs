use std::{fmt::Display, num::NonZero};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    Series, series::compact,
};

/// Configuration for the Double Exponential Moving Average ([`Dema`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct DemaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for DemaConfig {
    type Builder = DemaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        DemaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl DemaConfig {
    /// DEMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Price source the DEMA reads from each bar.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    fn ema(self) -> EmaConfig {
        // length is NonZero by construction
        EmaConfig::builder()
            .length(NonZero::new(self.length).unwrap_or(NonZero::<usize>::MIN))
            .source(self.source)
            .build()
    }
}

impl Default for DemaConfig {
    /// DEMA(10) on close.
    fn default() -> Self {
        Self {
            length: 10,
            source: PriceSource::Close,
        }
    }
}

impl Display for DemaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DemaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`DemaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
pub struct DemaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl DemaConfigBuilder {
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

impl IndicatorConfigBuilder<DemaConfig> for DemaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> DemaConfig {
        DemaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Double Exponential Moving Average (DEMA).
///
/// ```text
/// DEMA = 2 × EMA1 − EMA2
/// ```
///
/// `EMA1` is the [`Ema`] of the input. `EMA2` is the [`Ema`] of the present
/// `EMA1` values only, compacted into a shorter sequence. The k-th present
/// `EMA1` entry pairs with the k-th `EMA2` entry, so a gap in the input
/// shifts `EMA2` against the bar index. Both EMAs emit their seed, which
/// makes the first DEMA equal to the first present input.
///
/// # Example
///
/// ```
/// use signal_engine::{Dema, DemaConfig};
/// use std::num::NonZero;
///
/// let dema = Dema::new(DemaConfig::close(NonZero::new(3).unwrap()));
/// let out = dema.apply(&[Some(10.0), None, Some(20.0), Some(30.0)]);
///
/// // EMA1 10, _, 15, 22.5 and EMA2 over [10, 15, 22.5]: 10, 12.5, 17.5
/// assert_eq!(out, vec![Some(10.0), None, Some(17.5), Some(27.5)]);
/// ```
#[derive(Clone, Debug)]
pub struct Dema {
    config: DemaConfig,
    ema: Ema,
}

impl Dema {
    /// Runs the DEMA over an already extracted series.
    #[must_use]
    pub fn apply(&self, values: &[Option<Price>]) -> Series {
        let ema1 = self.ema.apply(values);

        let compacted: Series = compact(&ema1).into_iter().map(Some).collect();
        let mut ema2 = self.ema.apply(&compacted).into_iter();

        ema1.iter()
            .map(|e1| {
                let e1 = (*e1)?;
                let e2 = ema2.next().flatten()?;
                Some(2.0 * e1 - e2)
            })
            .collect()
    }
}

impl Indicator for Dema {
    type Config = DemaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            ema: Ema::new(config.ema()),
        }
    }

    #[inline]
    fn config(&self) -> &DemaConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        self.apply(&self.config.source.series(bars))
    }
}

impl Display for Dema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DEMA({}, {})", self.config.length, self.config.source)
    }
}

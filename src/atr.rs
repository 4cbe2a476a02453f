use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Series, Sma,
    SmaConfig,
};

/// Configuration for the Average True Range ([`Atr`]) indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AtrConfig {
    length: usize,
}

impl IndicatorConfig for AtrConfig {
    type Builder = AtrConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        AtrConfigBuilder { length: None }
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl AtrConfig {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self { length: 14 }
    }
}

impl Display for AtrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AtrConfig({})", self.length)
    }
}

/// Builder for [`AtrConfig`].
pub struct AtrConfigBuilder {
    length: Option<usize>,
}

impl IndicatorConfigBuilder<AtrConfig> for AtrConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> AtrConfig {
        AtrConfig {
            length: self.length.expect("length is required"),
        }
    }
}

/// Average True Range (ATR).
///
/// The simple average of [`PriceSource::TrueRange`] over `length` bars.
/// True range on the first bar is `high − low`.
#[derive(Clone, Debug)]
pub struct Atr {
    config: AtrConfig,
    sma: Sma,
}

impl Indicator for Atr {
    type Config = AtrConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let length = NonZero::new(config.length).unwrap_or(NonZero::<usize>::MIN);

        Self {
            config,
            sma: Sma::new(SmaConfig::true_range(length)),
        }
    }

    #[inline]
    fn config(&self) -> &AtrConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        self.sma.apply(&PriceSource::TrueRange.series(bars))
    }
}

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({})", self.config.length)
    }
}

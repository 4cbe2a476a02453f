use std::fmt::Display;

use crate::{Indicator, Ohlcv, Price, PriceSource, Series};

/// Configuration for the Volume-Weighted Average Price ([`Vwap`]).
///
/// VWAP is cumulative from the first bar, so there is no window length;
/// only the per-bar price is configurable.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct VwapConfig {
    source: PriceSource,
}

impl VwapConfig {
    /// VWAP weighting the given per-bar price.
    #[must_use]
    pub fn new(source: PriceSource) -> Self {
        Self { source }
    }

    /// Price source weighted by volume.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for VwapConfig {
    /// Typical price, `(high + low + close) / 3`.
    fn default() -> Self {
        Self::new(PriceSource::HLC3)
    }
}

impl Display for VwapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VwapConfig({})", self.source)
    }
}

/// Volume-Weighted Average Price (VWAP).
///
/// Running from the first bar of the series (no session reset):
///
/// ```text
/// VWAP = Σ(price × volume) / Σ volume
/// ```
///
/// While cumulative volume is zero the bar's close is returned instead.
/// Every entry is present.
#[derive(Clone, Debug)]
pub struct Vwap {
    config: VwapConfig,
}

impl Indicator for Vwap {
    type Config = VwapConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &VwapConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        let mut cum_price_volume = 0.0;
        let mut cum_volume = 0.0;

        bars.iter()
            .map(|bar| {
                let price = self.config.source.extract(bar, None);
                cum_price_volume += price * bar.volume();
                cum_volume += bar.volume();

                if cum_volume == 0.0 {
                    Some(bar.close())
                } else {
                    Some(cum_price_volume / cum_volume)
                }
            })
            .collect()
    }
}

impl Display for Vwap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VWAP({})", self.config.source)
    }
}

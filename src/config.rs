use std::{fmt::Display, num::NonZero};

use crate::{BbConfig, DemaConfig, RsiConfig, SmaConfig, SmmaConfig, SuperTrendConfig, VwapConfig};

/// Indicator windows used by the [`Detector`](crate::Detector).
///
/// # Example
///
/// ```
/// use signal_engine::{AnalysisConfig, IndicatorConfig, SmmaConfig};
/// use std::num::NonZero;
///
/// let config = AnalysisConfig::builder()
///     .smma(SmmaConfig::close(NonZero::new(5).unwrap()))
///     .build();
///
/// assert_eq!(config.smma().length(), 5);
/// assert_eq!(config.volume_average().length(), 30);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct AnalysisConfig {
    vwap: VwapConfig,
    smma: SmmaConfig,
    dema: DemaConfig,
    rsi: RsiConfig,
    supertrend: SuperTrendConfig,
    bb: BbConfig,
    volume_average: SmaConfig,
}

impl AnalysisConfig {
    /// Returns a builder seeded with the defaults.
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }

    #[must_use]
    pub fn vwap(&self) -> VwapConfig {
        self.vwap
    }

    #[must_use]
    pub fn smma(&self) -> SmmaConfig {
        self.smma
    }

    #[must_use]
    pub fn dema(&self) -> DemaConfig {
        self.dema
    }

    #[must_use]
    pub fn rsi(&self) -> RsiConfig {
        self.rsi
    }

    #[must_use]
    pub fn supertrend(&self) -> SuperTrendConfig {
        self.supertrend
    }

    /// Only the middle band feeds the detector.
    #[must_use]
    pub fn bb(&self) -> BbConfig {
        self.bb
    }

    /// Average the volume change is measured against.
    #[must_use]
    pub fn volume_average(&self) -> SmaConfig {
        self.volume_average
    }
}

impl Default for AnalysisConfig {
    /// SMMA(7), DEMA(10), RSI(14), SuperTrend(10, 3), BB(20, 2) and a
    /// 30-bar volume average.
    fn default() -> Self {
        Self {
            vwap: VwapConfig::default(),
            smma: SmmaConfig::default(),
            dema: DemaConfig::default(),
            rsi: RsiConfig::default(),
            supertrend: SuperTrendConfig::default(),
            bb: BbConfig::default(),
            volume_average: SmaConfig::volume(
                NonZero::new(30).unwrap_or(NonZero::<usize>::MIN),
            ),
        }
    }
}

impl Display for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AnalysisConfig({}, {}, {}, {}, {}, {}, {})",
            self.vwap,
            self.smma,
            self.dema,
            self.rsi,
            self.supertrend,
            self.bb,
            self.volume_average
        )
    }
}

/// Builder for [`AnalysisConfig`]. Every field starts at its default.
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    #[inline]
    #[must_use]
    pub fn vwap(mut self, vwap: VwapConfig) -> Self {
        self.config.vwap = vwap;
        self
    }

    #[inline]
    #[must_use]
    pub fn smma(mut self, smma: SmmaConfig) -> Self {
        self.config.smma = smma;
        self
    }

    #[inline]
    #[must_use]
    pub fn dema(mut self, dema: DemaConfig) -> Self {
        self.config.dema = dema;
        self
    }

    #[inline]
    #[must_use]
    pub fn rsi(mut self, rsi: RsiConfig) -> Self {
        self.config.rsi = rsi;
        self
    }

    #[inline]
    #[must_use]
    pub fn supertrend(mut self, supertrend: SuperTrendConfig) -> Self {
        self.config.supertrend = supertrend;
        self
    }

    #[inline]
    #[must_use]
    pub fn bb(mut self, bb: BbConfig) -> Self {
        self.config.bb = bb;
        self
    }

    #[inline]
    #[must_use]
    pub fn volume_average(mut self, volume_average: SmaConfig) -> Self {
        self.config.volume_average = volume_average;
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> AnalysisConfig {
        self.config
    }
}

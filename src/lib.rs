//! Technical analysis indicators and breakout detection for daily bars.
//!
//! Indicators accept any type implementing [`Ohlcv`] and return one entry
//! per bar. Entries are `None` until enough history has been seen, so every
//! output lines up with its input by index.
//!
//! Each indicator type ([`Sma`], [`Ema`], [`Smma`], [`Dema`], [`Rsi`],
//! [`Atr`], [`Vwap`], [`Bb`], [`SuperTrend`]) exposes [`new`](Sma::new)
//! and [`compute`](Sma::compute) as inherent methods, so no trait import
//! is needed. Import [`Indicator`] only for generic code.
//!
//! The [`Detector`] joins the indicators per bar and classifies SuperTrend
//! flips into [`SignalKind`]s; [`analyze_stock`] renders them for display.
//!
//! ```
//! use signal_engine::{Bar, Date, analyze_stock};
//!
//! let bars: Vec<Bar> = (0..60_u32)
//!     .map(|i| {
//!         let close = 100.0 + f64::from(i % 7);
//!         Bar {
//!             date: Date::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(i)),
//!             open: None,
//!             high: close + 1.0,
//!             low: close - 1.0,
//!             close,
//!             volume: 1000.0,
//!         }
//!     })
//!     .collect();
//!
//! let report = analyze_stock(&bars, "ACME.NS");
//! assert!(report.success);
//! assert_eq!(report.total_signals, report.signals.len());
//! assert!(report.signals.iter().all(|s| s.symbol == "ACME"));
//! ```

mod analysis;
mod atr;
mod bb;
mod config;
mod dema;
mod detector;
mod ema;
mod error;
mod indicator;
mod ohlcv;
mod price_source;
mod report;
mod rsi;
mod series;
mod signal;
mod sma;
mod smma;
mod supertrend;
mod targets;
mod vwap;

pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Bar, Date, Ohlcv, Price, Volume};
pub use crate::price_source::PriceSource;
pub use crate::series::Series;

pub use crate::atr::{Atr, AtrConfig, AtrConfigBuilder};
pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbValue, StdDev};
pub use crate::dema::{Dema, DemaConfig, DemaConfigBuilder};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};
pub use crate::smma::{Smma, SmmaConfig, SmmaConfigBuilder};
pub use crate::supertrend::{
    BandMultiplier, SuperTrend, SuperTrendConfig, SuperTrendConfigBuilder, SuperTrendValue,
    TrendDirection,
};
pub use crate::vwap::{Vwap, VwapConfig};

pub use crate::analysis::{Analyzer, analyze_stock};
pub use crate::config::{AnalysisConfig, AnalysisConfigBuilder};
pub use crate::detector::{Detector, validate};
pub use crate::error::{AnalysisError, BarField};
pub use crate::report::{AnalysisReport, SignalRecord, format_percent, format_price, format_volume};
pub use crate::signal::{Alignment, IndicatorSnapshot, Signal, SignalKind, TrendChange};
pub use crate::targets::{PivotLevels, next_targets};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[must_use]
            pub fn compute(&self, bars: &[impl Ohlcv]) -> Vec<Option<$output>> {
                <Self as Indicator>::compute(self, bars)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Smma, SmmaConfig, Price);
impl_indicator_methods!(Dema, DemaConfig, Price);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Atr, AtrConfig, Price);
impl_indicator_methods!(Vwap, VwapConfig, Price);
impl_indicator_methods!(Bb, BbConfig, BbValue);
impl_indicator_methods!(SuperTrend, SuperTrendConfig, SuperTrendValue);

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod inherent_methods {
    use super::{
        Atr, AtrConfig, Bb, BbConfig, Ema, EmaConfig, Rsi, RsiConfig, Sma, SmaConfig, SuperTrend,
        SuperTrendConfig, Vwap, VwapConfig,
    };
    use crate::test_util::bars;
    use std::num::NonZero;

    #[test]
    fn sma_without_indicator_import() {
        let sma = Sma::new(SmaConfig::close(NonZero::new(2).unwrap()));
        assert_eq!(sma.compute(&bars(&[10.0, 20.0])), vec![None, Some(15.0)]);
    }

    #[test]
    fn ema_without_indicator_import() {
        let ema = Ema::new(EmaConfig::close(NonZero::new(2).unwrap()));
        let out = ema.compute(&bars(&[10.0, 20.0]));
        assert_eq!(out[0], Some(10.0));
        assert!(out[1].is_some());
    }

    #[test]
    fn rsi_without_indicator_import() {
        let rsi = Rsi::new(RsiConfig::default());
        assert_eq!(rsi.compute(&bars(&[10.0; 20])).len(), 20);
    }

    #[test]
    fn bb_without_indicator_import() {
        let bb = Bb::new(BbConfig::close(NonZero::new(2).unwrap()));
        assert!(bb.compute(&bars(&[10.0, 20.0]))[1].is_some());
    }

    #[test]
    fn band_indicators_without_indicator_import() {
        let input = bars(&[10.0; 12]);
        assert!(Atr::new(AtrConfig::default()).compute(&input)[11].is_none());
        assert!(SuperTrend::new(SuperTrendConfig::default()).compute(&input)[11].is_some());
        assert_eq!(Vwap::new(VwapConfig::default()).compute(&input)[0], Some(10.0));
    }
}

use tracing::{debug, trace};

use crate::{
    AnalysisConfig, AnalysisError, BarField, Bb, Dema, IndicatorSnapshot, Ohlcv, Rsi, Signal,
    SignalKind, Sma, Smma, SuperTrend, TrendChange, Vwap,
};

/// Turns a bar series into breakout and breakdown signals.
///
/// Every indicator runs over the whole series; the results are joined per
/// bar into an [`IndicatorSnapshot`]. A bar from index 1 on fires a signal
/// when the SuperTrend direction flips there and the Bollinger middle band,
/// SMMA and DEMA are all available:
///
/// | flip           | alignment  | signal         |
/// |----------------|------------|----------------|
/// | `red_to_green` | bullish    | `Breakout`     |
/// | `green_to_red` | bearish    | `Breakdown`    |
/// | `red_to_green` | other      | `ST Breakout`  |
/// | `green_to_red` | other      | `ST Breakdown` |
#[derive(Clone, Copy, Debug, Default)]
pub struct Detector {
    config: AnalysisConfig,
}

impl Detector {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// One snapshot per bar, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the bars fail [`validate`].
    pub fn snapshots(&self, bars: &[impl Ohlcv]) -> Result<Vec<IndicatorSnapshot>, AnalysisError> {
        validate(bars)?;

        let vwap = Vwap::new(self.config.vwap()).compute(bars);
        let smma = Smma::new(self.config.smma()).compute(bars);
        let dema = Dema::new(self.config.dema()).compute(bars);
        let rsi = Rsi::new(self.config.rsi()).compute(bars);
        let supertrend = SuperTrend::new(self.config.supertrend()).compute(bars);
        let bb = Bb::new(self.config.bb()).compute(bars);
        let average_volume = Sma::new(self.config.volume_average()).compute(bars);

        let snapshots = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let prev = i.checked_sub(1);

                let price_change_pct = prev.map_or(0.0, |p| {
                    let prev_close = bars[p].close();
                    (bar.close() - prev_close) / prev_close * 100.0
                });

                let volume_change_pct = match average_volume[i] {
                    Some(avg) if avg != 0.0 => (bar.volume() - avg) / avg * 100.0,
                    _ => 0.0,
                };

                let trend_change = prev.map_or(TrendChange::NoChange, |p| {
                    TrendChange::between(
                        supertrend[p].map(|st| st.direction()),
                        supertrend[i].map(|st| st.direction()),
                    )
                });

                IndicatorSnapshot {
                    index: i,
                    date: bar.date(),
                    close: bar.close(),
                    volume: bar.volume(),
                    vwap: vwap[i],
                    smma: smma[i],
                    dema: dema[i],
                    rsi: rsi[i],
                    supertrend: supertrend[i],
                    bb_middle: bb[i].map(|v| v.middle()),
                    average_volume: average_volume[i],
                    price_change_pct,
                    volume_change_pct,
                    trend_change,
                }
            })
            .collect();

        Ok(snapshots)
    }

    /// Signals in bar order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the bars fail [`validate`].
    pub fn detect(&self, bars: &[impl Ohlcv]) -> Result<Vec<Signal>, AnalysisError> {
        let signals: Vec<Signal> = self
            .snapshots(bars)?
            .into_iter()
            .skip(1)
            .filter_map(|snapshot| {
                let alignment = snapshot.alignment()?;
                let kind = SignalKind::classify(snapshot.trend_change, alignment)?;
                trace!(
                    index = snapshot.index,
                    date = %snapshot.date,
                    %kind,
                    ?alignment,
                    "signal"
                );
                Some(Signal { kind, snapshot })
            })
            .collect();

        debug!(bars = bars.len(), signals = signals.len(), "detection finished");

        Ok(signals)
    }
}

/// Checks that every price and volume is a finite number, every close is
/// positive, no volume is negative and dates never go backwards.
///
/// Equal consecutive dates and `high < low` are accepted.
///
/// # Errors
///
/// The first offending bar, as an [`AnalysisError`].
pub fn validate(bars: &[impl Ohlcv]) -> Result<(), AnalysisError> {
    let mut previous = None;

    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in [
            (BarField::High, bar.high()),
            (BarField::Low, bar.low()),
            (BarField::Close, bar.close()),
            (BarField::Volume, bar.volume()),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::NonFinite {
                    index,
                    field,
                    value,
                });
            }
        }

        if bar.close() <= 0.0 {
            return Err(AnalysisError::NonPositiveClose {
                index,
                value: bar.close(),
            });
        }

        if bar.volume() < 0.0 {
            return Err(AnalysisError::NegativeVolume {
                index,
                value: bar.volume(),
            });
        }

        let date = bar.date();
        if let Some(previous) = previous
            && date < previous
        {
            return Err(AnalysisError::OutOfOrder {
                index,
                date,
                previous,
            });
        }
        previous = Some(date);
    }

    Ok(())
}

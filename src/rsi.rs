use std::{fmt::Display, num::NonZero};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Series};

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// Output begins at bar `length` (the first `length` price changes
/// need `length + 1` bars).
///
/// # Example
///
/// ```
/// use signal_engine::{IndicatorConfig, RsiConfig};
/// use std::num::NonZero;
///
/// let config = RsiConfig::close(NonZero::new(14).unwrap());
/// assert_eq!(config.length(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl RsiConfig {
    /// RSI on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Price source the RSI reads from each bar.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            length: 14,
            source: PriceSource::Close,
        }
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct RsiConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl RsiConfigBuilder {
    #[must_use]
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

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = Some(length.get());
        self
    }

    #[inline]
    fn build(self) -> RsiConfig {
        let length = self.length.expect("length is required");

        RsiConfig {
            length,
            source: self.source,
        }
    }
}

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale.
///
/// Gains and losses come from consecutive differences. The first value
/// averages the first `length` gains and losses. Each later value smooths
/// the *plain mean of the preceding `length` changes* with the current one:
///
/// ```text
/// avg_gain = (mean(gains[j − length .. j]) × (length − 1) + gain[j]) / length
/// avg_loss = (mean(losses[j − length .. j]) × (length − 1) + loss[j]) / length
/// RS       = avg_loss == 0 ? 100 : avg_gain / avg_loss
/// RSI      = 100 − 100 / (1 + RS)
/// ```
///
/// The prior averages are recomputed from the raw slice at every step
/// rather than carried forward. This differs numerically from a running
/// Wilder accumulator.
///
/// # Example
///
/// ```
/// use signal_engine::{Rsi, RsiConfig};
/// use std::num::NonZero;
///
/// let rsi = Rsi::new(RsiConfig::close(NonZero::new(3).unwrap()));
///
/// // changes = +2, −1, +2 → avg_gain=4/3, avg_loss=1/3 → RS=4 → RSI=80
/// let out = rsi.apply(&[Some(10.0), Some(12.0), Some(11.0), Some(13.0)]);
/// assert_eq!(out, vec![None, None, None, Some(80.0)]);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
}

/// Returned in place of `RS` when the average loss is zero.
const RS_WITHOUT_LOSSES: f64 = 100.0;

impl Rsi {
    /// Runs the RSI over an already extracted series.
    #[must_use]
    pub fn apply(&self, values: &[Option<Price>]) -> Series {
        let changes: Vec<Option<(f64, f64)>> = values
            .windows(2)
            .map(|pair| match pair {
                [Some(prev), Some(cur)] => Some(Self::gain_and_loss(*prev, *cur)),
                _ => None,
            })
            .collect();

        // One leading pad re-aligns the change series with the input.
        let mut out: Series = Vec::with_capacity(values.len());
        if !values.is_empty() {
            out.push(None);
        }
        out.extend((0..changes.len()).map(|j| self.at_change(&changes, j)));

        out
    }

    /// RSI after change `j` (input index `j + 1`).
    fn at_change(&self, changes: &[Option<(f64, f64)>], j: usize) -> Option<Price> {
        let length = self.config.length;
        #[allow(clippy::cast_precision_loss)]
        let length_f = length as f64;

        let (avg_gain, avg_loss) = if j + 1 == length {
            let (gain_sum, loss_sum) = Self::sums(&changes[..length])?;
            (gain_sum / length_f, loss_sum / length_f)
        } else if j >= length {
            let (gain_sum, loss_sum) = Self::sums(&changes[j - length..j])?;
            let (gain, loss) = changes[j]?;

            let prev_avg_gain = gain_sum / length_f;
            let prev_avg_loss = loss_sum / length_f;

            (
                (prev_avg_gain * (length_f - 1.0) + gain) / length_f,
                (prev_avg_loss * (length_f - 1.0) + loss) / length_f,
            )
        } else {
            return None;
        };

        Some(Self::rsi_from_averages(avg_gain, avg_loss))
    }

    /// Sums of gains and losses, `None` if any change in the slice is missing.
    fn sums(changes: &[Option<(f64, f64)>]) -> Option<(f64, f64)> {
        changes
            .iter()
            .try_fold((0.0, 0.0), |(gains, losses), change| {
                let (gain, loss) = (*change)?;
                Some((gains + gain, losses + loss))
            })
    }

    #[inline]
    fn gain_and_loss(prev: Price, cur: Price) -> (f64, f64) {
        let change = cur - prev;
        if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        }
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Price {
        let rs = if avg_loss == 0.0 {
            RS_WITHOUT_LOSSES
        } else {
            avg_gain / avg_loss
        };

        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &RsiConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Series {
        self.apply(&self.config.source.series(bars))
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}

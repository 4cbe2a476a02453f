use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use crate::{
    Atr, AtrConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
};

/// ATR multiplier for the SuperTrend bands.
///
/// Wraps a positive, non-NaN `f64`; `Eq` and `Hash` compare bits.
/// Defaults to `3.0`.
#[derive(Clone, Copy, Debug)]
pub struct BandMultiplier(f64);

impl BandMultiplier {
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "multiplier must not be NaN");
        assert!(value > 0.0, "multiplier must be positive");
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for BandMultiplier {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for BandMultiplier {}

impl Hash for BandMultiplier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for BandMultiplier {
    fn default() -> Self {
        Self(3.0)
    }
}

/// Configuration for the [`SuperTrend`] indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SuperTrendConfig {
    length: usize,
    multiplier: BandMultiplier,
}

impl IndicatorConfig for SuperTrendConfig {
    type Builder = SuperTrendConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SuperTrendConfigBuilder {
            length: None,
            multiplier: BandMultiplier::default(),
        }
    }

    /// ATR length.
    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl SuperTrendConfig {
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> BandMultiplier {
        self.multiplier
    }
}

impl Default for SuperTrendConfig {
    /// ATR(10) with a 3× band offset.
    fn default() -> Self {
        Self {
            length: 10,
            multiplier: BandMultiplier::default(),
        }
    }
}

impl Display for SuperTrendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SuperTrendConfig({}, {})",
            self.length,
            self.multiplier.value()
        )
    }
}

/// Builder for [`SuperTrendConfig`].
///
/// Defaults: multiplier = `3.0`.
pub struct SuperTrendConfigBuilder {
    length: Option<usize>,
    multiplier: BandMultiplier,
}

impl SuperTrendConfigBuilder {
    #[inline]
    #[must_use]
    pub fn multiplier(mut self, multiplier: BandMultiplier) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl IndicatorConfigBuilder<SuperTrendConfig> for SuperTrendConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> SuperTrendConfig {
        SuperTrendConfig {
            length: self.length.expect("length is required"),
            multiplier: self.multiplier,
        }
    }
}

/// Which band the SuperTrend line is riding.
///
/// `Up` goes with the upper band and `Down` with the lower band. A flip
/// from `Up` to `Down` happens when the close pierces the upper band.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TrendDirection {
    Up,
    Down,
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// SuperTrend output for one bar.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SuperTrendValue {
    level: Price,
    direction: TrendDirection,
    upper_band: Price,
    lower_band: Price,
}

impl SuperTrendValue {
    /// The trend line: one of the two final bands.
    #[inline]
    #[must_use]
    pub fn level(&self) -> Price {
        self.level
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> TrendDirection {
        self.direction
    }

    /// Final (ratcheted) upper band.
    #[inline]
    #[must_use]
    pub fn upper_band(&self) -> Price {
        self.upper_band
    }

    /// Final (ratcheted) lower band.
    #[inline]
    #[must_use]
    pub fn lower_band(&self) -> Price {
        self.lower_band
    }
}

impl Display for SuperTrendValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ST({}, {})", self.level, self.direction)
    }
}

/// SuperTrend.
///
/// Basic bands sit `multiplier × ATR` above and below `(high + low) / 2`.
/// The final upper band only moves down, unless the previous close broke
/// above it; the final lower band only moves up, unless the previous close
/// broke below it.
///
/// The line starts on the upper band with direction [`TrendDirection::Up`]
/// at the first bar with an ATR, then follows:
///
/// | previous line on | close                  | line        | direction |
/// |------------------|------------------------|-------------|-----------|
/// | upper band       | `<=` final upper band  | upper band  | `Up`      |
/// | upper band       | `>` final upper band   | lower band  | `Down`    |
/// | lower band       | `>=` final lower band  | lower band  | `Down`    |
/// | lower band       | `<` final lower band   | upper band  | `Up`      |
///
/// Entries are `None` until the ATR is available (the first `length − 1`
/// bars).
#[derive(Clone, Debug)]
pub struct SuperTrend {
    config: SuperTrendConfig,
    atr: Atr,
}

impl SuperTrend {
    /// Advances the state machine by one bar.
    ///
    /// The previous line is matched against the previous bands with exact
    /// equality: it is always a copy of one of them. The upper band is
    /// checked first.
    #[allow(clippy::float_cmp)]
    fn step(
        prev: &SuperTrendValue,
        upper_band: Price,
        lower_band: Price,
        close: Price,
    ) -> SuperTrendValue {
        use TrendDirection::{Down, Up};

        let (level, direction) = if prev.level == prev.upper_band {
            if close <= upper_band {
                (upper_band, Up)
            } else {
                (lower_band, Down)
            }
        } else if prev.level == prev.lower_band {
            if close >= lower_band {
                (lower_band, Down)
            } else {
                (upper_band, Up)
            }
        } else {
            (prev.level, prev.direction)
        };

        SuperTrendValue {
            level,
            direction,
            upper_band,
            lower_band,
        }
    }
}

impl Indicator for SuperTrend {
    type Config = SuperTrendConfig;
    type Output = SuperTrendValue;

    fn new(config: Self::Config) -> Self {
        let length = NonZero::new(config.length).unwrap_or(NonZero::<usize>::MIN);

        Self {
            config,
            atr: Atr::new(AtrConfig::new(length)),
        }
    }

    #[inline]
    fn config(&self) -> &SuperTrendConfig {
        &self.config
    }

    fn compute(&self, bars: &[impl Ohlcv]) -> Vec<Option<SuperTrendValue>> {
        let atr = self.atr.compute(bars);
        let multiplier = self.config.multiplier.value();

        let mut out = Vec::with_capacity(bars.len());
        let mut prev: Option<(SuperTrendValue, Price)> = None;

        for (bar, atr) in bars.iter().zip(atr) {
            let Some(atr) = atr else {
                prev = None;
                out.push(None);
                continue;
            };

            let hl2 = PriceSource::HL2.extract(bar, None);
            let basic_upper = hl2 + multiplier * atr;
            let basic_lower = hl2 - multiplier * atr;

            let value = match prev {
                None => SuperTrendValue {
                    level: basic_upper,
                    direction: TrendDirection::Up,
                    upper_band: basic_upper,
                    lower_band: basic_lower,
                },
                Some((prev, prev_close)) => {
                    let upper_band =
                        if basic_upper < prev.upper_band || prev_close > prev.upper_band {
                            basic_upper
                        } else {
                            prev.upper_band
                        };
                    let lower_band =
                        if basic_lower > prev.lower_band || prev_close < prev.lower_band {
                            basic_lower
                        } else {
                            prev.lower_band
                        };

                    Self::step(&prev, upper_band, lower_band, bar.close())
                }
            };

            prev = Some((value, bar.close()));
            out.push(Some(value));
        }

        out
    }
}

impl Display for SuperTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SuperTrend({}, {})",
            self.config.length,
            self.config.multiplier.value()
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use super::TrendDirection::{Down, Up};
    use crate::test_util::ohlc;

    fn supertrend(length: usize, multiplier: f64) -> SuperTrend {
        SuperTrend::new(
            SuperTrendConfig::builder()
                .length(NonZero::new(length).unwrap())
                .multiplier(BandMultiplier::new(multiplier))
                .build(),
        )
    }

    fn directions(values: &[Option<SuperTrendValue>]) -> Vec<Option<TrendDirection>> {
        values.iter().map(|v| v.map(|v| v.direction())).collect()
    }

    mod seeding {
        use super::*;

        #[test]
        fn missing_until_atr_is_ready() {
            let bars: Vec<_> = (0..5).map(|n| ohlc(11.0, 9.0, 10.0, n)).collect();
            let out = supertrend(3, 1.0).compute(&bars);
            assert_eq!(out[0], None);
            assert_eq!(out[1], None);
            assert!(out[2].is_some());
        }

        #[test]
        fn seeds_on_upper_band_going_up() {
            // ATR(1) of the first bar = 2, hl2 = 10
            let out = supertrend(1, 1.0).compute(&[ohlc(11.0, 9.0, 10.0, 0)]);
            let value = out[0].unwrap();
            assert_eq!(value.level(), 12.0);
            assert_eq!(value.upper_band(), 12.0);
            assert_eq!(value.lower_band(), 8.0);
            assert_eq!(value.direction(), Up);
        }
    }

    mod bands {
        use super::*;

        #[test]
        fn upper_band_holds_while_basic_band_rises() {
            // ATR(1) = 2 on both bars
            let bars = [ohlc(11.0, 9.0, 10.0, 0), ohlc(12.0, 10.0, 11.0, 1)];
            let out = supertrend(1, 1.0).compute(&bars);
            // basic upper 13 is not below 12 and close 10 did not break 12
            assert_eq!(out[1].unwrap().upper_band(), 12.0);
            // basic lower 9 is above 8, so the lower band ratchets up
            assert_eq!(out[1].unwrap().lower_band(), 9.0);
        }

        #[test]
        fn upper_band_follows_falling_basic_band() {
            let bars = [ohlc(11.0, 9.0, 10.0, 0), ohlc(10.0, 8.0, 9.0, 1)];
            let out = supertrend(1, 1.0).compute(&bars);
            assert_eq!(out[1].unwrap().upper_band(), 11.0);
            assert_eq!(out[1].unwrap().lower_band(), 8.0);
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn close_above_upper_band_flips_to_lower_band_down() {
            // bar 1: TR = max(2, |15 − 10|, |13 − 10|) = 5
            // basic upper = 14 + 5 = 19 ≥ 12, prev close 10 ≤ 12 → upper stays 12
            // close 14.5 > 12 → line moves to lower band, direction Down
            let bars = [ohlc(11.0, 9.0, 10.0, 0), ohlc(15.0, 13.0, 14.5, 1)];
            let out = supertrend(1, 1.0).compute(&bars);
            let value = out[1].unwrap();
            assert_eq!(value.direction(), Down);
            assert_eq!(value.level(), value.lower_band());
            // basic lower 9 > 8 → 9
            assert_eq!(value.level(), 9.0);
        }

        #[test]
        fn close_below_lower_band_flips_back_up() {
            let bars = [
                ohlc(11.0, 9.0, 10.0, 0),
                ohlc(15.0, 13.0, 14.5, 1),
                // TR = max(2, |7 − 14.5|, |5 − 14.5|) = 9.5; hl2 = 6
                // lower: basic −3.5 ≤ 9, prev close 14.5 ≥ 9 → stays 9
                // close 6 < 9 → back to the upper band, direction Up
                ohlc(7.0, 5.0, 6.0, 2),
            ];
            let out = supertrend(1, 1.0).compute(&bars);
            assert_eq!(
                directions(&out),
                vec![Some(Up), Some(Down), Some(Up)]
            );
            let value = out[2].unwrap();
            assert_eq!(value.level(), value.upper_band());
        }

        #[test]
        fn stays_on_lower_band_while_close_holds() {
            let bars = [
                ohlc(11.0, 9.0, 10.0, 0),
                ohlc(15.0, 13.0, 14.5, 1),
                ohlc(15.0, 14.0, 14.8, 2),
            ];
            let out = supertrend(1, 1.0).compute(&bars);
            assert_eq!(out[2].unwrap().direction(), Down);
        }

        #[test]
        fn direction_present_from_length_minus_one() {
            let bars: Vec<_> = (0..30)
                .map(|n| {
                    let close = 100.0 + f64::from(u32::try_from(n % 7).unwrap());
                    ohlc(close + 1.5, close - 1.5, close, n)
                })
                .collect();
            let out = SuperTrend::new(SuperTrendConfig::default()).compute(&bars);
            assert_eq!(out.len(), 30);
            assert!(out[..9].iter().all(Option::is_none));
            assert!(out[9..].iter().all(Option::is_some));
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(
                SuperTrend::new(SuperTrendConfig::default()).to_string(),
                "SuperTrend(10, 3)"
            );
        }
    }
}

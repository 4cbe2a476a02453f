use crate::Ohlcv;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
    num::NonZero,
};

/// Configuration for a windowed [`Indicator`].
///
/// Every windowed indicator has a corresponding config type that holds its
/// parameters (length, price source, multipliers). Configs are value types:
/// cheap to copy, compare, and hash.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Window length (number of bars).
    fn length(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the indicator window length.
    #[must_use]
    fn length(self, length: NonZero<usize>) -> Self;

    /// Builds the config. Panics if required fields are missing.
    #[must_use]
    fn build(self) -> Config;
}

/// A batch technical indicator.
///
/// Indicators are stateless between calls: [`compute`](Indicator::compute)
/// walks the whole bar slice and returns one entry per bar. Entries are
/// `None` until enough history has been seen, so output length always
/// equals input length.
///
/// # Example
///
/// ```
/// use signal_engine::{Bar, Date, Indicator, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let bars: Vec<Bar> = [10.0, 20.0, 30.0]
///     .into_iter()
///     .map(|close| Bar {
///         date: Date::from_ymd_opt(2024, 1, 1).unwrap(),
///         open: None,
///         high: close,
///         low: close,
///         close,
///         volume: 0.0,
///     })
///     .collect();
///
/// let sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(&bars), vec![None, None, Some(20.0)]);
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: Copy + Eq + Hash + Display + Debug;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Returns the indicator's configuration.
    fn config(&self) -> &Self::Config;

    /// Computes the indicator over `bars` (oldest first).
    fn compute(&self, bars: &[impl Ohlcv]) -> Vec<Option<Self::Output>>;
}

use tracing::{debug, warn};

use crate::{AnalysisConfig, AnalysisReport, Detector, Ohlcv, PivotLevels, SignalRecord};

/// Runs the [`Detector`] and renders its signals as an [`AnalysisReport`].
///
/// Analysis never fails outright: invalid input yields a report with
/// `success == false` and the error message.
#[derive(Clone, Copy, Debug, Default)]
pub struct Analyzer {
    detector: Detector,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            detector: Detector::new(config),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        self.detector.config()
    }

    /// Analyzes `bars` (oldest first) with percentage targets.
    #[must_use]
    pub fn analyze(&self, bars: &[impl Ohlcv], symbol: &str) -> AnalysisReport {
        self.analyze_with_pivots(bars, symbol, None)
    }

    /// Analyzes `bars` (oldest first), taking targets from `pivots` when
    /// given.
    #[must_use]
    pub fn analyze_with_pivots(
        &self,
        bars: &[impl Ohlcv],
        symbol: &str,
        pivots: Option<&PivotLevels>,
    ) -> AnalysisReport {
        let symbol = display_symbol(symbol);

        match self.detector.detect(bars) {
            Ok(signals) => {
                let records: Vec<SignalRecord> = signals
                    .iter()
                    .map(|signal| SignalRecord::new(symbol, signal, pivots))
                    .collect();

                debug!(
                    symbol,
                    bars = bars.len(),
                    signals = records.len(),
                    pivots = pivots.is_some(),
                    "analysis finished"
                );
                AnalysisReport::success(records)
            }
            Err(e) => {
                warn!(symbol, error = %e, "analysis failed");
                AnalysisReport::failure(&e)
            }
        }
    }
}

/// Analyzes `bars` for `symbol` with the default windows and percentage
/// targets.
///
/// # Example
///
/// ```
/// use signal_engine::{Bar, analyze_stock};
///
/// let report = analyze_stock(&[] as &[Bar], "RELIANCE.NS");
/// assert!(report.success);
/// assert_eq!(report.total_signals, 0);
/// ```
#[must_use]
pub fn analyze_stock(bars: &[impl Ohlcv], symbol: &str) -> AnalysisReport {
    Analyzer::default().analyze(bars, symbol)
}

/// Ticker up to the first `.`, dropping an exchange suffix such as `.NS`.
fn display_symbol(symbol: &str) -> &str {
    symbol.split_once('.').map_or(symbol, |(ticker, _)| ticker)
}

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Date, PivotLevels, Price, Signal, SignalKind, Volume, next_targets};

const NOT_AVAILABLE: &str = "N/A";

/// Two-decimal percentage such as `"12.30%"` or `"-0.45%"`; `"N/A"` when
/// the value is missing or not finite.
///
/// Negative values carry a `-`. Positive values carry no `+`.
///
/// ```
/// use signal_engine::format_percent;
///
/// assert_eq!(format_percent(Some(12.3)), "12.30%");
/// assert_eq!(format_percent(Some(-0.456)), "-0.46%");
/// assert_eq!(format_percent(None), "N/A");
/// assert_eq!(format_percent(Some(f64::NAN)), "N/A");
/// ```
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}%"),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Two decimals, or `"N/A"`.
#[must_use]
pub fn format_price(value: Option<Price>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Rounded to a whole number, or `"N/A"`.
#[must_use]
pub fn format_volume(value: Option<Volume>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.0}", v.round()),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// A [`Signal`] rendered for display.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    /// Ticker without its exchange suffix.
    pub symbol: String,
    pub date: Date,
    pub close: String,
    pub vwap: String,
    pub pct_change: String,
    pub volume: Volume,
    pub vol_change: String,
    pub average_volume: String,
    pub next_targets: Vec<Price>,
    pub signal: SignalKind,
    pub rsi: String,
}

impl SignalRecord {
    #[must_use]
    pub fn new(symbol: &str, signal: &Signal, pivots: Option<&PivotLevels>) -> Self {
        let snapshot = &signal.snapshot;

        Self {
            symbol: symbol.to_owned(),
            date: snapshot.date,
            close: format_price(Some(snapshot.close)),
            vwap: format_price(snapshot.vwap),
            pct_change: format_percent(Some(snapshot.price_change_pct)),
            volume: snapshot.volume,
            vol_change: format_percent(Some(snapshot.volume_change_pct)),
            average_volume: format_volume(snapshot.average_volume),
            next_targets: next_targets(signal.kind, snapshot.close, pivots),
            signal: signal.kind,
            rsi: format_price(snapshot.rsi),
        }
    }
}

/// Outcome of one analysis call.
///
/// A failed call carries the error message and no signals.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub success: bool,
    pub signals: Vec<SignalRecord>,
    pub total_signals: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    #[must_use]
    pub fn success(signals: Vec<SignalRecord>) -> Self {
        Self {
            success: true,
            total_signals: signals.len(),
            signals,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: &AnalysisError) -> Self {
        Self {
            success: false,
            signals: Vec::new(),
            total_signals: 0,
            error: Some(error.to_string()),
        }
    }
}

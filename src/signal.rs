use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Date, Price, SuperTrendValue, TrendDirection, Volume};

/// SuperTrend direction change between two consecutive bars.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TrendChange {
    /// `Up` → `Down`.
    GreenToRed,
    /// `Down` → `Up`.
    RedToGreen,
    NoChange,
}

impl TrendChange {
    /// Classifies the move from `prev` to `cur`. Any missing side is
    /// [`NoChange`](Self::NoChange).
    #[must_use]
    pub fn between(prev: Option<TrendDirection>, cur: Option<TrendDirection>) -> Self {
        match (prev, cur) {
            (Some(TrendDirection::Up), Some(TrendDirection::Down)) => Self::GreenToRed,
            (Some(TrendDirection::Down), Some(TrendDirection::Up)) => Self::RedToGreen,
            _ => Self::NoChange,
        }
    }
}

impl Display for TrendChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::GreenToRed => "green_to_red",
            Self::RedToGreen => "red_to_green",
            Self::NoChange => "no_change",
        })
    }
}

/// Ordering of the Bollinger middle band, SMMA and DEMA at one bar.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Alignment {
    /// `middle > smma > dema`.
    Bullish,
    /// `middle < smma < dema`.
    Bearish,
    /// Anything else, including ties.
    Neutral,
}

impl Alignment {
    #[must_use]
    pub fn classify(middle: Price, smma: Price, dema: Price) -> Self {
        if middle < smma && smma < dema {
            Self::Bearish
        } else if middle > smma && smma > dema {
            Self::Bullish
        } else {
            Self::Neutral
        }
    }
}

/// Kind of a detected signal.
///
/// Serializes as its display string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SignalKind {
    /// Down → Up flip confirmed by a bullish alignment.
    Breakout,
    /// Up → Down flip confirmed by a bearish alignment.
    Breakdown,
    /// Down → Up flip without confirmation.
    #[serde(rename = "ST Breakout")]
    StBreakout,
    /// Up → Down flip without confirmation.
    #[serde(rename = "ST Breakdown")]
    StBreakdown,
}

impl SignalKind {
    /// Combines a trend change with the alignment at the same bar.
    #[must_use]
    pub fn classify(change: TrendChange, alignment: Alignment) -> Option<Self> {
        match (change, alignment) {
            (TrendChange::RedToGreen, Alignment::Bullish) => Some(Self::Breakout),
            (TrendChange::GreenToRed, Alignment::Bearish) => Some(Self::Breakdown),
            (TrendChange::RedToGreen, _) => Some(Self::StBreakout),
            (TrendChange::GreenToRed, _) => Some(Self::StBreakdown),
            (TrendChange::NoChange, _) => None,
        }
    }

    /// `Breakout` and `ST Breakout`.
    #[must_use]
    pub fn is_breakout(self) -> bool {
        matches!(self, Self::Breakout | Self::StBreakout)
    }

    /// `Breakdown` and `ST Breakdown`.
    #[must_use]
    pub fn is_breakdown(self) -> bool {
        matches!(self, Self::Breakdown | Self::StBreakdown)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakout => "Breakout",
            Self::Breakdown => "Breakdown",
            Self::StBreakout => "ST Breakout",
            Self::StBreakdown => "ST Breakdown",
        }
    }
}

impl Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every indicator value at one bar, bound to that bar's date and index.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct IndicatorSnapshot {
    pub index: usize,
    pub date: Date,
    pub close: Price,
    pub volume: Volume,
    pub vwap: Option<Price>,
    pub smma: Option<Price>,
    pub dema: Option<Price>,
    pub rsi: Option<Price>,
    pub supertrend: Option<SuperTrendValue>,
    pub bb_middle: Option<Price>,
    /// Volume SMA.
    pub average_volume: Option<Volume>,
    /// Close-to-close change in percent; `0` on the first bar.
    pub price_change_pct: f64,
    /// Deviation of volume from its average in percent; `0` without an
    /// average.
    pub volume_change_pct: f64,
    pub trend_change: TrendChange,
}

impl IndicatorSnapshot {
    /// Alignment of the three averages, if all are present.
    #[must_use]
    pub fn alignment(&self) -> Option<Alignment> {
        Some(Alignment::classify(self.bb_middle?, self.smma?, self.dema?))
    }
}

/// A detected signal: the kind plus the snapshot of the bar it fired on.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Signal {
    pub kind: SignalKind,
    pub snapshot: IndicatorSnapshot,
}

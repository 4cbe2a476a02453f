use serde::{Deserialize, Serialize};

use crate::{Price, SignalKind};

/// Floor-trader pivot levels derived from one period's high, low and close.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct PivotLevels {
    pub pivot: Price,
    pub r1: Price,
    pub r2: Price,
    pub r3: Price,
    pub s1: Price,
    pub s2: Price,
    pub s3: Price,
}

impl PivotLevels {
    /// Classic pivots:
    ///
    /// ```text
    /// P  = (H + L + C) / 3
    /// R1 = 2P − L            S1 = 2P − H
    /// R2 = P + (H − L)       S2 = P − (H − L)
    /// R3 = H + 2(P − L)      S3 = L − 2(H − P)
    /// ```
    #[must_use]
    pub fn classic(high: Price, low: Price, close: Price) -> Self {
        let pivot = (high + low + close) / 3.0;
        let range = high - low;

        Self {
            pivot,
            r1: 2.0 * pivot - low,
            r2: pivot + range,
            r3: high + 2.0 * (pivot - low),
            s1: 2.0 * pivot - high,
            s2: pivot - range,
            s3: low - 2.0 * (high - pivot),
        }
    }

    fn resistances(&self) -> [Price; 3] {
        [self.r1, self.r2, self.r3]
    }

    fn supports(&self) -> [Price; 3] {
        [self.s1, self.s2, self.s3]
    }
}

const UPSIDE: [f64; 3] = [1.02, 1.05, 1.10];
const DOWNSIDE: [f64; 3] = [0.98, 0.95, 0.90];

/// Price targets for a signal fired at `price`.
///
/// Without pivots, breakout signals aim 2%, 5% and 10% above the price and
/// breakdown signals the same distances below. With pivots, breakouts keep
/// the resistances strictly above the price and breakdowns the supports
/// strictly below, in `r1, r2, r3` / `s1, s2, s3` order.
///
/// # Example
///
/// ```
/// use signal_engine::{PivotLevels, SignalKind, next_targets};
///
/// let pivots = PivotLevels::classic(110.0, 90.0, 100.0);
/// assert_eq!(
///     next_targets(SignalKind::Breakout, 105.0, Some(&pivots)),
///     vec![110.0, 120.0, 130.0],
/// );
/// assert_eq!(next_targets(SignalKind::Breakout, 115.0, Some(&pivots)), vec![120.0, 130.0]);
/// ```
#[must_use]
pub fn next_targets(kind: SignalKind, price: Price, pivots: Option<&PivotLevels>) -> Vec<Price> {
    match (pivots, kind.is_breakout()) {
        (None, true) => UPSIDE.iter().map(|m| price * m).collect(),
        (None, false) => DOWNSIDE.iter().map(|m| price * m).collect(),
        (Some(pivots), true) => pivots
            .resistances()
            .into_iter()
            .filter(|&r| r > price)
            .collect(),
        (Some(pivots), false) => pivots
            .supports()
            .into_iter()
            .filter(|&s| s < price)
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::assert_approx;

    fn pivots() -> PivotLevels {
        // P = 100, range 20
        PivotLevels::classic(110.0, 90.0, 100.0)
    }

    mod classic {
        use super::*;

        #[test]
        fn levels() {
            let p = pivots();
            assert_eq!(p.pivot, 100.0);
            assert_eq!(p.r1, 110.0);
            assert_eq!(p.s1, 90.0);
            assert_eq!(p.r2, 120.0);
            assert_eq!(p.s2, 80.0);
            assert_eq!(p.r3, 130.0);
            assert_eq!(p.s3, 70.0);
        }

        #[test]
        fn pivot_is_typical_price() {
            let p = PivotLevels::classic(12.0, 6.0, 9.0);
            assert_eq!(p.pivot, 9.0);
            assert_eq!(p.r1, 12.0);
            assert_eq!(p.s1, 6.0);
        }
    }

    mod naive {
        use super::*;

        #[test]
        fn breakouts_aim_above() {
            for kind in [SignalKind::Breakout, SignalKind::StBreakout] {
                let targets = next_targets(kind, 200.0, None);
                assert_eq!(targets.len(), 3);
                assert_approx!(targets[0], 204.0);
                assert_approx!(targets[1], 210.0);
                assert_approx!(targets[2], 220.0);
            }
        }

        #[test]
        fn breakdowns_aim_below() {
            for kind in [SignalKind::Breakdown, SignalKind::StBreakdown] {
                let targets = next_targets(kind, 200.0, None);
                assert_eq!(targets.len(), 3);
                assert_approx!(targets[0], 196.0);
                assert_approx!(targets[1], 190.0);
                assert_approx!(targets[2], 180.0);
            }
        }
    }

    mod with_pivots {
        use super::*;

        #[test]
        fn breakout_keeps_resistances_above_price() {
            let p = pivots();
            assert_eq!(
                next_targets(SignalKind::StBreakout, 112.0, Some(&p)),
                vec![120.0, 130.0]
            );
        }

        #[test]
        fn resistance_at_price_is_dropped() {
            let p = pivots();
            assert_eq!(
                next_targets(SignalKind::Breakout, 110.0, Some(&p)),
                vec![120.0, 130.0]
            );
        }

        #[test]
        fn breakdown_keeps_supports_below_price() {
            let p = pivots();
            assert_eq!(
                next_targets(SignalKind::Breakdown, 85.0, Some(&p)),
                vec![80.0, 70.0]
            );
        }

        #[test]
        fn price_beyond_every_level_has_no_targets() {
            let p = pivots();
            assert!(next_targets(SignalKind::Breakout, 150.0, Some(&p)).is_empty());
            assert!(next_targets(SignalKind::StBreakdown, 60.0, Some(&p)).is_empty());
        }
    }
}

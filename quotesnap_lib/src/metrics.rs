//! Day-over-day change metrics.

use serde::{Deserialize, Serialize};

/// Absolute and relative move of a price against the previous close.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    /// Baseline the change was measured against; 0 when none was usable.
    pub previous_close: f64,
    pub change: f64,
    /// Percent, not a fraction: `0.47` means +0.47%.
    pub change_percent: f64,
}

/// Compute the change of `price` relative to `previous_close`.
///
/// Without a usable baseline (missing, zero, negative or non-finite previous
/// close) the baseline and both values are 0 rather than a division by zero,
/// so `change == price - previous_close` only holds when a baseline was used.
pub fn compute_change(price: f64, previous_close: Option<f64>) -> PriceChange {
    match previous_close {
        Some(prev) if prev.is_finite() && prev > 0.0 => {
            let change = price - prev;
            PriceChange {
                previous_close: prev,
                change,
                change_percent: change / prev * 100.0,
            }
        }
        _ => PriceChange::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn dow_jones_example() {
        let c = compute_change(43000.12, Some(42800.50));
        assert!(approx(c.change, 199.62, 1e-6), "change was {}", c.change);
        assert!(approx(c.change_percent, 0.4664, 1e-4), "pct was {}", c.change_percent);
    }

    #[test]
    fn negative_move() {
        let c = compute_change(1.1935, Some(1.1972));
        assert!(c.change < 0.0);
        assert!(c.change_percent < 0.0);
        assert!(approx(c.change, -0.0037, 1e-9));
    }

    #[test]
    fn zero_previous_close_guards() {
        assert_eq!(compute_change(100.0, Some(0.0)), PriceChange::default());
    }

    #[test]
    fn missing_previous_close_guards() {
        assert_eq!(compute_change(100.0, None), PriceChange::default());
    }

    #[test]
    fn unusable_previous_close_guards() {
        assert_eq!(compute_change(100.0, Some(-5.0)), PriceChange::default());
        assert_eq!(compute_change(100.0, Some(f64::NAN)), PriceChange::default());
        assert_eq!(compute_change(100.0, Some(f64::INFINITY)), PriceChange::default());
    }

    #[test]
    fn unusable_previous_close_is_not_kept_as_baseline() {
        let c = compute_change(10.01, Some(-37.63));
        assert_eq!(c.previous_close, 0.0);
        assert_eq!(c.change, 0.0);
    }

    #[test]
    fn usable_previous_close_is_the_baseline() {
        assert_eq!(compute_change(43000.12, Some(42800.5)).previous_close, 42800.5);
    }

    #[test]
    fn unchanged_price() {
        let c = compute_change(6969.01, Some(6969.01));
        assert_eq!(c.change, 0.0);
        assert_eq!(c.change_percent, 0.0);
    }

    #[test]
    fn change_identity_holds_over_range() {
        let cases = [(0.0, 12.5), (5375.5, 5354.8), (153.55, 153.01), (27325.89, 26863.15)];
        for (price, prev) in cases {
            let c = compute_change(price, Some(prev));
            assert!(approx(c.change, price - prev, 1e-9));
            assert!(approx(c.change_percent, (price - prev) / prev * 100.0, 1e-9));
        }
    }
}

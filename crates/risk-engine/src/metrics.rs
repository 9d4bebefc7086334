use core_types::PositionRecord;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Placeholder analytics pending a historical return series, which this
// engine does not receive. Each is reported as-is, never blended with a
// partially computed estimate.
pub const PLACEHOLDER_BETA: Decimal = dec!(1.0);
pub const PLACEHOLDER_SHARPE_RATIO: Decimal = dec!(1.5);
pub const PLACEHOLDER_SORTINO_RATIO: Decimal = dec!(2.0);
pub const PLACEHOLDER_MAX_DRAWDOWN: Decimal = dec!(0.05);
pub const PLACEHOLDER_VOLATILITY: Decimal = dec!(0.15);

/// Expected shortfall is approximated as a fixed multiple of VaR(99), not a
/// tail-conditional expectation.
pub const EXPECTED_SHORTFALL_MULTIPLIER: Decimal = dec!(1.2);

/// Value-at-Risk at the given confidence level, from the cross-sectional
/// distribution of per-position unrealized P/L fractions.
///
/// This is a dispersion proxy, not statistical VaR: it substitutes the
/// spread of current position P/L percentages for a time-series return
/// distribution. VaR(c) is the absolute value of the (1 - c) percentile of
/// those fractions, scaled to a percentage. Zero for an empty book.
///
/// Because the input is a cross-section rather than a loss distribution,
/// VaR(99) >= VaR(95) does NOT hold for all inputs.
pub fn value_at_risk(positions: &[PositionRecord], confidence: Decimal) -> Decimal {
    if positions.is_empty() {
        return Decimal::ZERO;
    }

    let returns: Vec<Decimal> = positions.iter().map(|p| p.unrealized_pl_pct).collect();
    let q = (Decimal::ONE - confidence) * dec!(100);

    percentile(&returns, q).abs() * dec!(100)
}

/// Percentage of total position value held in the single largest position.
/// Zero when there are no positions or the total value is zero.
pub fn concentration_risk(positions: &[PositionRecord]) -> Decimal {
    if positions.is_empty() {
        return Decimal::ZERO;
    }

    let total_value: Decimal = positions.iter().map(|p| p.market_value).sum();
    if total_value == Decimal::ZERO {
        return Decimal::ZERO;
    }

    let max_position = positions
        .iter()
        .map(|p| p.market_value)
        .max()
        .unwrap_or(Decimal::ZERO);

    (max_position / total_value) * dec!(100)
}

/// The q-th percentile (0..=100) of `values`, with linear interpolation
/// between closest ranks.
///
/// Callers guarantee a non-empty slice.
fn percentile(values: &[Decimal], q: Decimal) -> Decimal {
    let mut sorted = values.to_vec();
    sorted.sort();

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = Decimal::from(n - 1) * q / dec!(100);
    let lower = rank.floor();
    let idx = lower.to_usize().unwrap_or(0).min(n - 1);
    if idx + 1 >= n {
        return sorted[n - 1];
    }

    let fraction = rank - lower;
    sorted[idx] + (sorted[idx + 1] - sorted[idx]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(symbol: &str, market_value: Decimal, pl_pct: Decimal) -> PositionRecord {
        PositionRecord::new(symbol, dec!(1), market_value, Decimal::ZERO, pl_pct)
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let values = vec![dec!(10), dec!(20), dec!(30), dec!(40)];
        assert_eq!(percentile(&values, dec!(0)), dec!(10));
        assert_eq!(percentile(&values, dec!(100)), dec!(40));
        assert_eq!(percentile(&values, dec!(50)), dec!(25));
    }

    #[test]
    fn percentile_is_order_invariant() {
        let values = vec![dec!(40), dec!(10), dec!(30), dec!(20)];
        assert_eq!(percentile(&values, dec!(50)), dec!(25));
    }

    #[test]
    fn var_is_zero_for_empty_book() {
        assert_eq!(value_at_risk(&[], dec!(0.95)), Decimal::ZERO);
        assert_eq!(value_at_risk(&[], dec!(0.99)), Decimal::ZERO);
    }

    #[test]
    fn var_scales_the_tail_percentile_to_percent() {
        // A single position: every percentile is that position's P/L pct.
        let positions = vec![position("AAPL", dec!(1000), dec!(-0.04))];
        assert_eq!(value_at_risk(&positions, dec!(0.95)), dec!(4.00));
        assert_eq!(value_at_risk(&positions, dec!(0.99)), dec!(4.00));
    }

    #[test]
    fn concentration_is_zero_for_empty_book() {
        assert_eq!(concentration_risk(&[]), Decimal::ZERO);
    }

    #[test]
    fn concentration_is_100_for_a_single_position() {
        let positions = vec![position("AAPL", dec!(500), dec!(0.01))];
        assert_eq!(concentration_risk(&positions), dec!(100));
    }

    #[test]
    fn concentration_is_order_invariant() {
        let a = vec![
            position("AAPL", dec!(750), dec!(0.01)),
            position("MSFT", dec!(250), dec!(0.02)),
        ];
        let b: Vec<_> = a.iter().rev().cloned().collect();
        assert_eq!(concentration_risk(&a), concentration_risk(&b));
        assert_eq!(concentration_risk(&a), dec!(75));
    }

    #[test]
    fn concentration_is_zero_when_values_cancel() {
        let positions = vec![
            position("AAPL", dec!(500), dec!(0.01)),
            position("MSFT", dec!(-500), dec!(-0.02)),
        ];
        assert_eq!(concentration_risk(&positions), Decimal::ZERO);
    }
}

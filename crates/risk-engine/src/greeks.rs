use crate::report::GreeksReport;
use core_types::{AssetType, PositionRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Fixed per-contract sensitivities. This is a coarse placeholder model: true
// Greeks require strike, expiry, underlying price and implied volatility,
// none of which this engine receives. Rho is always reported as zero.
pub const DELTA_PER_CONTRACT: Decimal = dec!(0.5);
pub const GAMMA_PER_CONTRACT: Decimal = dec!(0.05);
pub const THETA_PER_CONTRACT: Decimal = dec!(-0.02);
pub const VEGA_PER_CONTRACT: Decimal = dec!(0.1);

/// Accumulates the placeholder Greeks over every option position in the
/// book, weighted by signed quantity. Non-option positions are excluded.
pub fn aggregate(positions: &[PositionRecord]) -> GreeksReport {
    let mut report = GreeksReport::default();

    for position in positions {
        if position.asset_type != AssetType::Option {
            continue;
        }
        report.delta += position.quantity * DELTA_PER_CONTRACT;
        report.gamma += position.quantity * GAMMA_PER_CONTRACT;
        report.theta += position.quantity * THETA_PER_CONTRACT;
        report.vega += position.quantity * VEGA_PER_CONTRACT;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_only_option_positions() {
        let positions = vec![
            PositionRecord::new("AAPL240119C", dec!(10), dec!(500), dec!(10), dec!(0.02)),
            PositionRecord::new("MSFT", dec!(5), dec!(2000), dec!(50), dec!(0.025)),
        ];

        let report = aggregate(&positions);
        assert_eq!(report.delta, dec!(5.0));
        assert_eq!(report.gamma, dec!(0.50));
        assert_eq!(report.theta, dec!(-0.20));
        assert_eq!(report.vega, dec!(1.0));
        assert_eq!(report.rho, Decimal::ZERO);
    }

    #[test]
    fn short_option_positions_contribute_negatively() {
        let positions = vec![PositionRecord::new(
            "SPY240621P",
            dec!(-4),
            dec!(-800),
            dec!(20),
            dec!(0.03),
        )];

        let report = aggregate(&positions);
        assert_eq!(report.delta, dec!(-2.0));
        assert_eq!(report.theta, dec!(0.08));
    }

    #[test]
    fn empty_book_yields_zero_greeks() {
        let report = aggregate(&[]);
        assert_eq!(report, GreeksReport::default());
    }
}

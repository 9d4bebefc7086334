use crate::report::RiskDecision;
use configuration::RiskLimits;
use core_types::{AccountSnapshot, OrderRequest, PositionRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reference price used to value an order that carries no limit price.
/// A documented default, not an error: market orders still get gated.
pub const DEFAULT_REFERENCE_PRICE: Decimal = dec!(100);

/// Evaluates an order against the risk-limit policy.
///
/// Every check runs independently and every breach is collected, so a
/// rejection names all of its reasons, not just the first. The portfolio
/// risk ratio is never computed against a non-positive portfolio value;
/// that case is itself a violation (fail closed) with a risk score of zero.
pub fn evaluate(
    account: &AccountSnapshot,
    positions: &[PositionRecord],
    order: &OrderRequest,
    limits: &RiskLimits,
) -> RiskDecision {
    let mut violations = Vec::new();

    // --- 1. Order size against the absolute position-size limit ---
    let effective_price = order.limit_price.unwrap_or(DEFAULT_REFERENCE_PRICE);
    let order_value = order.quantity * effective_price;

    if order_value > limits.max_position_size {
        violations.push(format!(
            "Order value {} exceeds max position size {}",
            order_value.round_dp(2),
            limits.max_position_size
        ));
    }

    // --- 2. Prospective portfolio risk against the portfolio-risk limit ---
    let mut risk_score = Decimal::ZERO;

    if account.portfolio_value <= Decimal::ZERO {
        violations.push(format!(
            "Portfolio value {} is non-positive; cannot assess portfolio risk",
            account.portfolio_value
        ));
    } else {
        let total_exposure: Decimal =
            positions.iter().map(|p| p.market_value).sum::<Decimal>() + order_value;
        let portfolio_risk = total_exposure / account.portfolio_value;
        risk_score = portfolio_risk;

        if portfolio_risk > limits.max_portfolio_risk {
            violations.push(format!(
                "Portfolio risk {:.2}% exceeds limit {:.2}%",
                portfolio_risk * dec!(100),
                limits.max_portfolio_risk * dec!(100)
            ));
        }
    }

    RiskDecision {
        approved: violations.is_empty(),
        violations,
        risk_score,
    }
}

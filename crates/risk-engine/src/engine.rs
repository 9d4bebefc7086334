use crate::error::EngineError;
use crate::report::{
    AssetTypeExposure, GreeksReport, PortfolioAnalytics, PortfolioSummary, RiskDecision,
    RiskMetrics,
};
use crate::{gate, greeks, metrics};
use configuration::RiskLimits;
use core_types::{AccountSnapshot, AssetType, OrderRequest, PositionRecord};
use execution_source::ExecutionSource;
use reference_data::SectorMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

/// The portfolio risk and analytics engine.
///
/// Stateless per call: every entry point fetches a fresh snapshot through
/// the injected source and derives its metrics from that alone. The only
/// shared pieces are the read-only risk-limit policy and sector table, so
/// calls may run concurrently without coordination.
///
/// Analytic entry points never surface source failures: account data
/// degrades to the paper fallback snapshot and position data to an empty
/// book, with the documented zero-defaults flowing through every aggregate.
pub struct RiskEngine {
    source: Arc<dyn ExecutionSource>,
    limits: RiskLimits,
    sectors: SectorMap,
}

impl RiskEngine {
    /// Creates a new engine around an execution source and a risk policy.
    pub fn new(
        source: Arc<dyn ExecutionSource>,
        limits: RiskLimits,
        sectors: SectorMap,
    ) -> Result<Self, EngineError> {
        // Validate that the policy is enforceable before accepting it.
        if limits.max_position_size <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy(
                "max_position_size must be positive".to_string(),
            ));
        }
        if limits.max_portfolio_risk <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy(
                "max_portfolio_risk must be positive".to_string(),
            ));
        }
        Ok(Self {
            source,
            limits,
            sectors,
        })
    }

    /// Fetches the account snapshot, substituting the deterministic paper
    /// fallback on any source failure. Never returns an error.
    pub async fn account_info(&self, user_id: &str) -> AccountSnapshot {
        match self.source.get_account(user_id).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(
                    %error,
                    user_id,
                    "execution source unavailable, substituting paper snapshot"
                );
                AccountSnapshot::paper()
            }
        }
    }

    /// Fetches the open positions, degrading to an empty book on failure so
    /// downstream aggregates resolve to their zero-defaults.
    pub async fn positions(&self, user_id: &str) -> Vec<PositionRecord> {
        match self.source.get_positions(user_id).await {
            Ok(positions) => positions,
            Err(error) => {
                tracing::warn!(
                    %error,
                    user_id,
                    "execution source unavailable, treating position list as empty"
                );
                Vec::new()
            }
        }
    }

    /// The aggregate account/position view.
    pub async fn portfolio_summary(&self, user_id: &str) -> PortfolioSummary {
        let account = self.account_info(user_id).await;
        let positions = self.positions(user_id).await;

        let total_pl: Decimal = positions.iter().map(|p| p.unrealized_pl).sum();
        let positions_value: Decimal = positions.iter().map(|p| p.market_value).sum();

        let total_pl_percent = if account.last_equity > Decimal::ZERO {
            (total_pl / account.last_equity) * dec!(100)
        } else {
            Decimal::ZERO
        };

        PortfolioSummary {
            account_value: account.portfolio_value,
            buying_power: account.buying_power,
            cash: account.cash,
            positions_value,
            total_pl,
            total_pl_percent,
            // No day-boundary tracking: intraday and total P/L coincide.
            day_pl: total_pl,
            positions_count: positions.len(),
            margin_used: account.initial_margin.unwrap_or(Decimal::ZERO),
            margin_available: account.buying_power,
        }
    }

    /// Sector and asset-class exposure, plus concentration.
    pub async fn portfolio_analytics(&self, user_id: &str) -> PortfolioAnalytics {
        let positions = self.positions(user_id).await;

        let mut exposure_by_sector: HashMap<String, Decimal> = HashMap::new();
        let mut exposure_by_asset_type = AssetTypeExposure::default();

        for position in &positions {
            let sector = self.sectors.sector(&position.symbol);
            *exposure_by_sector
                .entry(sector.to_string())
                .or_insert(Decimal::ZERO) += position.market_value;

            match position.asset_type {
                AssetType::Stock => exposure_by_asset_type.stocks += position.market_value,
                AssetType::Option => exposure_by_asset_type.options += position.market_value,
                AssetType::Future => exposure_by_asset_type.futures += position.market_value,
                AssetType::Crypto => exposure_by_asset_type.crypto += position.market_value,
            }
        }

        PortfolioAnalytics {
            exposure_by_sector,
            exposure_by_asset_type,
            concentration_risk: metrics::concentration_risk(&positions),
            beta: metrics::PLACEHOLDER_BETA,
            sharpe_ratio: metrics::PLACEHOLDER_SHARPE_RATIO,
            sortino_ratio: metrics::PLACEHOLDER_SORTINO_RATIO,
        }
    }

    /// VaR, expected shortfall, cash fraction and leverage.
    pub async fn risk_metrics(&self, user_id: &str) -> RiskMetrics {
        let account = self.account_info(user_id).await;
        let positions = self.positions(user_id).await;

        let portfolio_value = account.portfolio_value;
        let var_95 = metrics::value_at_risk(&positions, dec!(0.95));
        let var_99 = metrics::value_at_risk(&positions, dec!(0.99));

        let (cash_percent, leverage) = if portfolio_value > Decimal::ZERO {
            (
                (account.cash / portfolio_value) * dec!(100),
                (portfolio_value - account.cash) / portfolio_value,
            )
        } else {
            // An empty or broken account is all cash and unlevered.
            (dec!(100), Decimal::ZERO)
        };

        RiskMetrics {
            portfolio_value,
            cash_percent,
            leverage,
            var_95,
            var_99,
            expected_shortfall: var_99 * metrics::EXPECTED_SHORTFALL_MULTIPLIER,
            max_drawdown: metrics::PLACEHOLDER_MAX_DRAWDOWN,
            volatility: metrics::PLACEHOLDER_VOLATILITY,
            beta: metrics::PLACEHOLDER_BETA,
        }
    }

    /// Aggregated option Greeks for the current book.
    pub async fn portfolio_greeks(&self, user_id: &str) -> GreeksReport {
        let positions = self.positions(user_id).await;
        greeks::aggregate(&positions)
    }

    /// The pre-trade gate: evaluates an order against the risk-limit policy
    /// over a fresh snapshot and returns the itemized decision.
    pub async fn check_risk_limits(&self, user_id: &str, order: &OrderRequest) -> RiskDecision {
        let account = self.account_info(user_id).await;
        let positions = self.positions(user_id).await;
        gate::evaluate(&account, &positions, order, &self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_types::{OrderSide, SnapshotSource};
    use execution_source::error::SourceError;

    /// A source that serves fixed data.
    struct StaticSource {
        account: AccountSnapshot,
        positions: Vec<PositionRecord>,
    }

    #[async_trait]
    impl ExecutionSource for StaticSource {
        async fn get_account(&self, _user_id: &str) -> Result<AccountSnapshot, SourceError> {
            Ok(self.account.clone())
        }

        async fn get_positions(&self, _user_id: &str) -> Result<Vec<PositionRecord>, SourceError> {
            Ok(self.positions.clone())
        }
    }

    /// A source that is always unreachable.
    struct FailingSource;

    #[async_trait]
    impl ExecutionSource for FailingSource {
        async fn get_account(&self, _user_id: &str) -> Result<AccountSnapshot, SourceError> {
            Err(SourceError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }

        async fn get_positions(&self, _user_id: &str) -> Result<Vec<PositionRecord>, SourceError> {
            Err(SourceError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }
    }

    fn engine_with(account: AccountSnapshot, positions: Vec<PositionRecord>) -> RiskEngine {
        RiskEngine::new(
            Arc::new(StaticSource { account, positions }),
            RiskLimits::default(),
            SectorMap::with_defaults(),
        )
        .unwrap()
    }

    fn failing_engine() -> RiskEngine {
        RiskEngine::new(
            Arc::new(FailingSource),
            RiskLimits::default(),
            SectorMap::with_defaults(),
        )
        .unwrap()
    }

    fn position(
        symbol: &str,
        market_value: Decimal,
        unrealized_pl: Decimal,
        pl_pct: Decimal,
    ) -> PositionRecord {
        PositionRecord::new(symbol, dec!(10), market_value, unrealized_pl, pl_pct)
    }

    #[test]
    fn rejects_unenforceable_policy() {
        let limits = RiskLimits {
            max_portfolio_risk: dec!(0),
            ..RiskLimits::default()
        };
        let result = RiskEngine::new(Arc::new(FailingSource), limits, SectorMap::with_defaults());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unreachable_source_yields_the_paper_snapshot_verbatim() {
        let engine = failing_engine();
        let snapshot = engine.account_info("user-1").await;

        assert_eq!(snapshot.account_number, "PAPER001");
        assert_eq!(snapshot.cash, dec!(100000.0));
        assert_eq!(snapshot.portfolio_value, dec!(100000.0));
        assert_eq!(snapshot.equity, dec!(100000.0));
        assert_eq!(snapshot.last_equity, dec!(100000.0));
        assert_eq!(snapshot.buying_power, dec!(100000.0));
        assert_eq!(snapshot.source, SnapshotSource::PaperFallback);
    }

    #[tokio::test]
    async fn unreachable_source_degrades_every_aggregate_to_zero_defaults() {
        let engine = failing_engine();

        let summary = engine.portfolio_summary("user-1").await;
        assert_eq!(summary.positions_count, 0);
        assert_eq!(summary.total_pl, Decimal::ZERO);
        assert_eq!(summary.total_pl_percent, Decimal::ZERO);
        assert_eq!(summary.positions_value, Decimal::ZERO);

        let analytics = engine.portfolio_analytics("user-1").await;
        assert!(analytics.exposure_by_sector.is_empty());
        assert_eq!(analytics.concentration_risk, Decimal::ZERO);

        let risk = engine.risk_metrics("user-1").await;
        assert_eq!(risk.var_95, Decimal::ZERO);
        assert_eq!(risk.var_99, Decimal::ZERO);
        assert_eq!(risk.expected_shortfall, Decimal::ZERO);

        let greeks = engine.portfolio_greeks("user-1").await;
        assert_eq!(greeks, GreeksReport::default());
    }

    #[tokio::test]
    async fn summary_aggregates_pl_and_market_value() {
        let mut account = AccountSnapshot::paper();
        account.last_equity = dec!(10000);
        account.initial_margin = Some(dec!(2500));

        let engine = engine_with(
            account,
            vec![
                position("AAPL", dec!(4000), dec!(150), dec!(0.039)),
                position("JPM", dec!(1000), dec!(-50), dec!(-0.047)),
            ],
        );

        let summary = engine.portfolio_summary("user-1").await;
        assert_eq!(summary.total_pl, dec!(100));
        assert_eq!(summary.positions_value, dec!(5000));
        assert_eq!(summary.total_pl_percent, dec!(1.00));
        assert_eq!(summary.day_pl, summary.total_pl);
        assert_eq!(summary.positions_count, 2);
        assert_eq!(summary.margin_used, dec!(2500));
        assert_eq!(summary.margin_available, summary.buying_power);
    }

    #[tokio::test]
    async fn zero_last_equity_short_circuits_the_percentage() {
        let mut account = AccountSnapshot::paper();
        account.last_equity = Decimal::ZERO;

        let engine = engine_with(
            account,
            vec![position("AAPL", dec!(4000), dec!(150), dec!(0.039))],
        );

        let summary = engine.portfolio_summary("user-1").await;
        assert_eq!(summary.total_pl, dec!(150));
        assert_eq!(summary.total_pl_percent, Decimal::ZERO);
    }

    #[tokio::test]
    async fn analytics_buckets_exposure_by_sector_and_asset_type() {
        let engine = engine_with(
            AccountSnapshot::paper(),
            vec![
                position("AAPL", dec!(4000), dec!(150), dec!(0.039)),
                position("MSFT", dec!(2000), dec!(20), dec!(0.010)),
                position("JPM", dec!(1000), dec!(-50), dec!(-0.047)),
                position("XYZ123", dec!(500), dec!(5), dec!(0.011)),
                position("AAPL240119C", dec!(300), dec!(30), dec!(0.100)),
            ],
        );

        let analytics = engine.portfolio_analytics("user-1").await;
        assert_eq!(
            analytics.exposure_by_sector.get("Technology"),
            Some(&dec!(6000))
        );
        assert_eq!(analytics.exposure_by_sector.get("Finance"), Some(&dec!(1000)));
        // Unmapped symbols land in "Other", never in an absent bucket.
        assert_eq!(analytics.exposure_by_sector.get("Other"), Some(&dec!(800)));

        assert_eq!(analytics.exposure_by_asset_type.stocks, dec!(7500));
        assert_eq!(analytics.exposure_by_asset_type.options, dec!(300));
        assert_eq!(analytics.exposure_by_asset_type.futures, Decimal::ZERO);

        assert_eq!(analytics.beta, dec!(1.0));
        assert_eq!(analytics.sharpe_ratio, dec!(1.5));
        assert_eq!(analytics.sortino_ratio, dec!(2.0));
    }

    #[tokio::test]
    async fn risk_metrics_guard_non_positive_portfolio_value() {
        let mut account = AccountSnapshot::paper();
        account.portfolio_value = Decimal::ZERO;
        let engine = engine_with(account, Vec::new());

        let risk = engine.risk_metrics("user-1").await;
        assert_eq!(risk.cash_percent, dec!(100));
        assert_eq!(risk.leverage, Decimal::ZERO);
    }

    #[tokio::test]
    async fn risk_metrics_compute_cash_fraction_and_leverage() {
        let mut account = AccountSnapshot::paper();
        account.portfolio_value = dec!(100000);
        account.cash = dec!(25000);
        let engine = engine_with(account, Vec::new());

        let risk = engine.risk_metrics("user-1").await;
        assert_eq!(risk.cash_percent, dec!(25));
        assert_eq!(risk.leverage, dec!(0.75));
    }

    #[tokio::test]
    async fn expected_shortfall_is_exactly_var_99_times_the_multiplier() {
        let engine = engine_with(
            AccountSnapshot::paper(),
            vec![
                position("AAPL", dec!(4000), dec!(150), dec!(0.04)),
                position("MSFT", dec!(2000), dec!(-80), dec!(-0.02)),
                position("JPM", dec!(1000), dec!(-120), dec!(-0.06)),
            ],
        );

        let risk = engine.risk_metrics("user-1").await;
        assert_eq!(risk.expected_shortfall, risk.var_99 * dec!(1.2));
        assert_eq!(risk.max_drawdown, dec!(0.05));
        assert_eq!(risk.volatility, dec!(0.15));
    }

    #[tokio::test]
    async fn gate_runs_against_the_fresh_snapshot() {
        let mut account = AccountSnapshot::paper();
        account.portfolio_value = dec!(100000);
        let engine = engine_with(
            account,
            vec![position("MSFT", dec!(1500), dec!(20), dec!(0.010))],
        );

        let order = OrderRequest::new("AAPL", OrderSide::Buy, dec!(5), Some(dec!(100))).unwrap();
        let decision = engine.check_risk_limits("user-1", &order).await;

        // (1500 + 500) / 100000 = 0.02, right at the default limit.
        assert!(decision.approved);
        assert_eq!(decision.risk_score, dec!(0.02));
    }
}

use crate::enums::{AccountStatus, AssetType, OrderSide, SnapshotSource};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable snapshot of a brokerage account at a single point in time.
///
/// A fresh snapshot is constructed on every engine call; nothing here is
/// cached or mutated. The `source` field tells callers whether the numbers
/// came from the live execution source or from the synthetic paper-trading
/// fallback substituted when the source is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account_number: String,
    pub status: AccountStatus,
    /// ISO currency code, e.g. "USD".
    pub currency: String,
    pub buying_power: Decimal,
    pub cash: Decimal,
    pub portfolio_value: Decimal,
    pub equity: Decimal,
    /// Equity at the previous session close. Percentage metrics that divide
    /// by this must short-circuit to zero when it is zero.
    pub last_equity: Decimal,
    pub initial_margin: Option<Decimal>,
    pub maintenance_margin: Option<Decimal>,
    pub daytrading_buying_power: Option<Decimal>,
    pub regt_buying_power: Option<Decimal>,
    pub multiplier: Option<u32>,
    pub daytrade_count: Option<u32>,
    pub source: SnapshotSource,
    pub as_of: DateTime<Utc>,
}

impl AccountSnapshot {
    /// The deterministic paper-trading snapshot substituted when the
    /// execution source is unreachable or returns a malformed response.
    pub fn paper() -> Self {
        Self {
            account_number: "PAPER001".to_string(),
            status: AccountStatus::Active,
            currency: "USD".to_string(),
            buying_power: dec!(100000.0),
            cash: dec!(100000.0),
            portfolio_value: dec!(100000.0),
            equity: dec!(100000.0),
            last_equity: dec!(100000.0),
            initial_margin: None,
            maintenance_margin: None,
            daytrading_buying_power: None,
            regt_buying_power: None,
            multiplier: None,
            daytrade_count: None,
            source: SnapshotSource::PaperFallback,
            as_of: Utc::now(),
        }
    }
}

/// A single open position as reported by the execution source.
///
/// Quantities and market values are signed; a negative quantity is a short.
/// `unrealized_pl_pct` is a fraction (0.05 means +5%), matching the wire
/// convention of the execution source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub symbol: String,
    pub quantity: Decimal,
    pub market_value: Decimal,
    pub unrealized_pl: Decimal,
    pub unrealized_pl_pct: Decimal,
    pub asset_type: AssetType,
}

impl PositionRecord {
    /// Builds a record, inferring the asset class from the symbol.
    pub fn new(
        symbol: impl Into<String>,
        quantity: Decimal,
        market_value: Decimal,
        unrealized_pl: Decimal,
        unrealized_pl_pct: Decimal,
    ) -> Self {
        let symbol = symbol.into();
        let asset_type = AssetType::infer(&symbol);
        Self {
            symbol,
            quantity,
            market_value,
            unrealized_pl,
            unrealized_pl_pct,
            asset_type,
        }
    }
}

/// A prospective order submitted to the pre-trade risk gate.
///
/// `limit_price` is optional; the gate values market orders at a documented
/// reference price instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub limit_price: Option<Decimal>,
    pub client_order_id: Uuid,
}

impl OrderRequest {
    /// Creates a new order request with a fresh client order id.
    pub fn new(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        limit_price: Option<Decimal>,
    ) -> Result<Self, CoreError> {
        if quantity <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "quantity".to_string(),
                format!("must be positive, got {}", quantity),
            ));
        }
        if let Some(price) = limit_price {
            if price <= Decimal::ZERO {
                return Err(CoreError::InvalidInput(
                    "limit_price".to_string(),
                    format!("must be positive, got {}", price),
                ));
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            side,
            quantity,
            limit_price,
            client_order_id: Uuid::new_v4(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_snapshot_is_deterministic() {
        let snapshot = AccountSnapshot::paper();
        assert_eq!(snapshot.account_number, "PAPER001");
        assert_eq!(snapshot.status, AccountStatus::Active);
        assert_eq!(snapshot.cash, dec!(100000.0));
        assert_eq!(snapshot.portfolio_value, dec!(100000.0));
        assert_eq!(snapshot.equity, dec!(100000.0));
        assert_eq!(snapshot.last_equity, dec!(100000.0));
        assert_eq!(snapshot.source, SnapshotSource::PaperFallback);
        assert!(snapshot.initial_margin.is_none());
    }

    #[test]
    fn position_record_infers_asset_type() {
        let stock = PositionRecord::new("MSFT", dec!(5), dec!(2000), dec!(50), dec!(0.025));
        assert_eq!(stock.asset_type, AssetType::Stock);

        let option = PositionRecord::new("AAPL240119C", dec!(10), dec!(500), dec!(10), dec!(0.02));
        assert_eq!(option.asset_type, AssetType::Option);
    }

    #[test]
    fn order_request_rejects_non_positive_quantity() {
        let result = OrderRequest::new("AAPL", OrderSide::Buy, dec!(0), None);
        assert!(result.is_err());
    }

    #[test]
    fn order_request_rejects_non_positive_limit_price() {
        let result = OrderRequest::new("AAPL", OrderSide::Buy, dec!(10), Some(dec!(-1)));
        assert!(result.is_err());
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side of the order
    pub fn opposite(&self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

/// The trading status of a brokerage account.
///
/// Upstream sources report many fine-grained statuses; everything that is not
/// plainly active or restricted collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Restricted,
    Other,
}

impl AccountStatus {
    /// Maps an upstream status string onto our coarse classification.
    pub fn from_upstream(status: &str) -> Self {
        match status.to_ascii_uppercase().as_str() {
            "ACTIVE" => AccountStatus::Active,
            "RESTRICTED" | "ACCOUNT_UPDATED" | "ONBOARDING" => AccountStatus::Restricted,
            _ => AccountStatus::Other,
        }
    }
}

/// Marks whether an `AccountSnapshot` came from the live execution source or
/// from the synthetic paper-trading fallback substituted on source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotSource {
    Live,
    PaperFallback,
}

/// The instrument class of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Option,
    Future,
    Crypto,
}

impl AssetType {
    /// Infers the instrument class from a symbol when the source carries no
    /// explicit asset class field.
    ///
    /// The inference is total and deterministic:
    /// - a leading `/` marks a futures contract (e.g. `/ES`),
    /// - a `/` elsewhere marks a crypto pair (e.g. `BTC/USD`),
    /// - an OCC-style symbol (root + date digits + C/P + optional strike) or
    ///   a symbol containing "option" marks an options contract,
    /// - anything else is treated as a stock.
    pub fn infer(symbol: &str) -> Self {
        if symbol.starts_with('/') {
            return AssetType::Future;
        }
        if symbol.contains('/') {
            return AssetType::Crypto;
        }
        if is_option_symbol(symbol) {
            return AssetType::Option;
        }
        AssetType::Stock
    }
}

/// Whether a symbol names an options contract.
///
/// Recognizes OCC-style symbols such as `AAPL240119C` or the fully
/// expanded `AAPL240119C00190000`, as well as symbols carrying the literal
/// word "option" in any casing.
pub fn is_option_symbol(symbol: &str) -> bool {
    if symbol.to_ascii_lowercase().contains("option") {
        return true;
    }

    // OCC shape: alphabetic root, >= 6 date digits, C or P, optional strike digits.
    let root_len = symbol
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if root_len == 0 || root_len == symbol.len() {
        return false;
    }
    let rest = &symbol[root_len..];
    let digit_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digit_len < 6 {
        return false;
    }
    let mut tail = rest[digit_len..].chars();
    match tail.next() {
        Some(c) if c.eq_ignore_ascii_case(&'c') || c.eq_ignore_ascii_case(&'p') => {
            tail.all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_occ_style_symbols_as_options() {
        assert_eq!(AssetType::infer("AAPL240119C"), AssetType::Option);
        assert_eq!(AssetType::infer("AAPL240119C00190000"), AssetType::Option);
        assert_eq!(AssetType::infer("msft250620p"), AssetType::Option);
    }

    #[test]
    fn infers_option_keyword_symbols_as_options() {
        assert_eq!(AssetType::infer("SPY-OPTION-1"), AssetType::Option);
        assert_eq!(AssetType::infer("TestOptionLeg"), AssetType::Option);
    }

    #[test]
    fn plain_tickers_are_stocks() {
        assert_eq!(AssetType::infer("MSFT"), AssetType::Stock);
        assert_eq!(AssetType::infer("BRK.B"), AssetType::Stock);
        // Too few date digits to be an OCC symbol.
        assert_eq!(AssetType::infer("AAPL24C"), AssetType::Stock);
    }

    #[test]
    fn slash_prefixed_symbols_are_futures() {
        assert_eq!(AssetType::infer("/ES"), AssetType::Future);
        assert_eq!(AssetType::infer("/NQH5"), AssetType::Future);
    }

    #[test]
    fn pair_symbols_are_crypto() {
        assert_eq!(AssetType::infer("BTC/USD"), AssetType::Crypto);
        assert_eq!(AssetType::infer("ETH/USDT"), AssetType::Crypto);
    }

    #[test]
    fn upstream_status_mapping_collapses_unknowns() {
        assert_eq!(AccountStatus::from_upstream("ACTIVE"), AccountStatus::Active);
        assert_eq!(
            AccountStatus::from_upstream("restricted"),
            AccountStatus::Restricted
        );
        assert_eq!(
            AccountStatus::from_upstream("SUBMISSION_FAILED"),
            AccountStatus::Other
        );
    }
}

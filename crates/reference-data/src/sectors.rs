use crate::error::ReferenceError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The sector assigned to every symbol the table does not know.
pub const UNKNOWN_SECTOR: &str = "Other";

/// A total symbol -> sector classification table.
///
/// Built once at startup and never mutated afterwards; lookups are total, so
/// exposure aggregation never has to handle an absent sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorMap {
    entries: HashMap<String, String>,
}

impl SectorMap {
    /// The built-in classification covering the most commonly held symbols.
    pub fn with_defaults() -> Self {
        let entries = [
            ("AAPL", "Technology"),
            ("MSFT", "Technology"),
            ("GOOGL", "Technology"),
            ("AMZN", "Technology"),
            ("NVDA", "Technology"),
            ("META", "Technology"),
            ("TSLA", "Automotive"),
            ("JPM", "Finance"),
            ("BAC", "Finance"),
            ("GS", "Finance"),
            ("XOM", "Energy"),
            ("CVX", "Energy"),
            ("JNJ", "Healthcare"),
            ("PFE", "Healthcare"),
        ]
        .into_iter()
        .map(|(symbol, sector)| (symbol.to_string(), sector.to_string()))
        .collect();

        Self { entries }
    }

    /// Builds the table from the defaults plus configuration-supplied
    /// overrides. Overrides win on conflict.
    pub fn with_overrides(
        overrides: &HashMap<String, String>,
    ) -> Result<Self, ReferenceError> {
        let mut map = Self::with_defaults();
        for (symbol, sector) in overrides {
            if symbol.trim().is_empty() {
                return Err(ReferenceError::InvalidMapping(
                    "empty symbol in sector overrides".to_string(),
                ));
            }
            if sector.trim().is_empty() {
                return Err(ReferenceError::InvalidMapping(format!(
                    "empty sector for symbol '{}'",
                    symbol
                )));
            }
            map.entries.insert(symbol.clone(), sector.clone());
        }
        Ok(map)
    }

    /// Resolves the sector for a symbol. Total: unmapped symbols resolve to
    /// `UNKNOWN_SECTOR`, never to an absent value.
    pub fn sector(&self, symbol: &str) -> &str {
        self.entries
            .get(symbol)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_SECTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_resolve_to_their_sector() {
        let map = SectorMap::with_defaults();
        assert_eq!(map.sector("AAPL"), "Technology");
        assert_eq!(map.sector("TSLA"), "Automotive");
        assert_eq!(map.sector("JPM"), "Finance");
    }

    #[test]
    fn unmapped_symbols_resolve_to_other() {
        let map = SectorMap::with_defaults();
        assert_eq!(map.sector("XYZ123"), UNKNOWN_SECTOR);
        assert_eq!(map.sector(""), UNKNOWN_SECTOR);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let overrides = HashMap::from([
            ("TSLA".to_string(), "Technology".to_string()),
            ("PLTR".to_string(), "Technology".to_string()),
        ]);
        let map = SectorMap::with_overrides(&overrides).unwrap();
        assert_eq!(map.sector("TSLA"), "Technology");
        assert_eq!(map.sector("PLTR"), "Technology");
        assert_eq!(map.sector("JPM"), "Finance");
    }

    #[test]
    fn empty_override_entries_are_rejected() {
        let overrides = HashMap::from([("  ".to_string(), "Technology".to_string())]);
        assert!(SectorMap::with_overrides(&overrides).is_err());

        let overrides = HashMap::from([("PLTR".to_string(), "".to_string())]);
        assert!(SectorMap::with_overrides(&overrides).is_err());
    }
}

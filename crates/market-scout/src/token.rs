//! Ticker symbol → canonical data-source identifier

/// Static lookup table with a lower-case fallback.
///
/// Resolution is total: an unknown symbol resolves to itself lower-cased, so
/// "DOGE" becomes "doge" and the data source decides whether it exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenResolver {
    table: &'static [(&'static str, &'static str)],
}

const CORE: &[(&str, &str)] = &[("BTC", "bitcoin"), ("ETH", "ethereum"), ("SOL", "solana")];

const EXTENDED: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("ARB", "arbitrum"),
    ("OP", "optimism"),
];

impl TokenResolver {
    /// BTC, ETH, SOL
    pub const fn core() -> Self {
        Self { table: CORE }
    }

    /// Core table plus ARB and OP
    pub const fn extended() -> Self {
        Self { table: EXTENDED }
    }

    pub fn resolve(&self, symbol: &str) -> String {
        let upper = symbol.to_uppercase();
        self.table
            .iter()
            .find(|(ticker, _)| *ticker == upper)
            .map_or_else(|| symbol.to_lowercase(), |(_, id)| (*id).to_string())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &'static str> {
        self.table.iter().map(|(ticker, _)| *ticker)
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::extended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_symbols_case_insensitively() {
        let resolver = TokenResolver::core();
        assert_eq!(resolver.resolve("BTC"), "bitcoin");
        assert_eq!(resolver.resolve("eth"), "ethereum");
        assert_eq!(resolver.resolve("Sol"), "solana");
    }

    #[test]
    fn unknown_symbols_fall_back_to_lowercase() {
        for resolver in [TokenResolver::core(), TokenResolver::extended()] {
            assert_eq!(resolver.resolve("DOGE"), "doge");
            assert_eq!(resolver.resolve("PePe"), "pepe");
        }
    }

    #[test]
    fn extended_table_adds_layer_twos() {
        assert_eq!(TokenResolver::core().resolve("ARB"), "arb");
        assert_eq!(TokenResolver::extended().resolve("ARB"), "arbitrum");
        assert_eq!(TokenResolver::extended().resolve("op"), "optimism");
        assert_eq!(TokenResolver::extended().symbols().count(), 5);
    }
}

//! Common types used throughout the sotavento workspace.
//!
//! This module defines asset identity and the resolved trading universe.
//! Tickers are resolved to [`AssetId`]s exactly once, when the price bundle
//! is loaded; everything downstream speaks in asset identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SotaventoError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market ticker symbol.
///
/// Symbols such as "AAPL" or "MSFT" are only used at the edges of the
/// system: universe resolution at startup and human-readable output. The
/// core logic operates on [`AssetId`]s.
pub type Symbol = String;

/// Stable identifier for a tradable security.
///
/// An `AssetId` is a dense index into the [`Universe`] symbol table,
/// assigned once at universe construction and never reused within a run.
/// Score vectors and weight vectors are aligned to this index order, which
/// also serves as the deterministic tie-break order when ranking equal
/// scores.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("{_0}")]
pub struct AssetId(u32);

impl AssetId {
    /// Creates an asset identifier from a universe index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the universe index of this asset.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The fixed set of assets valid for a backtest run.
///
/// A `Universe` is resolved once at startup from the ticker symbols present
/// in the price bundle and is immutable afterwards. Resolution of an
/// unknown symbol is fatal: the run cannot proceed without a valid asset
/// identifier.
///
/// # Example
///
/// ```
/// use sotavento_traits::Universe;
///
/// let universe = Universe::from_symbols(["AAPL", "MSFT", "GOOGL"]);
/// let aapl = universe.resolve("AAPL").unwrap();
/// assert_eq!(universe.symbol(aapl), "AAPL");
/// assert_eq!(universe.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    /// Symbols in AssetId index order.
    symbols: Vec<Symbol>,
    /// Reverse lookup from symbol to identifier.
    index: BTreeMap<Symbol, AssetId>,
}

impl Universe {
    /// Builds a universe from an iterator of ticker symbols.
    ///
    /// Symbols are deduplicated and sorted before identifiers are assigned,
    /// so the same set of tickers always produces the same identifier
    /// assignment regardless of input order.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut sorted: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        sorted.sort();
        sorted.dedup();

        let index = sorted
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), AssetId::new(i as u32)))
            .collect();

        Self {
            symbols: sorted,
            index,
        }
    }

    /// Resolves a ticker symbol to its asset identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SotaventoError::SymbolNotFound`] if the symbol is not part
    /// of this universe. Callers treat this as fatal at load time.
    pub fn resolve(&self, symbol: &str) -> Result<AssetId> {
        self.index
            .get(symbol)
            .copied()
            .ok_or_else(|| SotaventoError::SymbolNotFound(symbol.to_string()))
    }

    /// Returns the ticker symbol for an asset identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier was not issued by this universe.
    #[must_use]
    pub fn symbol(&self, asset: AssetId) -> &str {
        &self.symbols[asset.index()]
    }

    /// Number of assets in the universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over all (identifier, symbol) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (AssetId::new(i as u32), s.as_str()))
    }

    /// Iterates over all asset identifiers in index order.
    pub fn ids(&self) -> impl Iterator<Item = AssetId> + '_ {
        (0..self.symbols.len() as u32).map(AssetId::new)
    }
}

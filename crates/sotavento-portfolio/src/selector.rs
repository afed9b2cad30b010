//! Top-K / bottom-K selection over a day's prediction scores.

use std::collections::BTreeSet;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use sotavento_traits::AssetId;

/// Configuration for daily selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Maximum number of long positions (default: 25).
    pub n_longs: usize,
    /// Maximum number of short positions (default: 25).
    pub n_shorts: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            n_longs: 25,
            n_shorts: 25,
        }
    }
}

/// The two disjoint buckets selected for one trading day.
///
/// Recomputed fresh every day and never persisted across days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySelection {
    /// Assets to hold long: positive scores, ranked highest.
    pub longs: BTreeSet<AssetId>,
    /// Assets to hold short: negative scores, ranked lowest.
    pub shorts: BTreeSet<AssetId>,
}

impl DailySelection {
    /// Returns whether both buckets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.longs.is_empty() && self.shorts.is_empty()
    }

    /// Returns whether an asset appears in either bucket.
    #[must_use]
    pub fn contains(&self, asset: AssetId) -> bool {
        self.longs.contains(&asset) || self.shorts.contains(&asset)
    }
}

/// Ranks a day's scores into long and short buckets.
///
/// Scores partition by sign: only strictly positive scores are long
/// candidates and only strictly negative scores are short candidates, so
/// the two buckets are disjoint by construction. Zero and `NaN` scores are
/// excluded from both sides.
///
/// Equal scores are broken deterministically by ascending [`AssetId`]
/// (bundle symbol-table order) rather than by input order.
#[derive(Debug, Clone)]
pub struct Selector {
    config: SelectorConfig,
}

impl Selector {
    /// Creates a selector with the given configuration.
    #[must_use]
    pub const fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// The selector configuration.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Selects up to `n_longs` longs and `n_shorts` shorts from a day view
    /// of scores aligned to universe index order (`NaN` = no prediction).
    #[must_use]
    pub fn select(&self, scores: &Array1<f64>) -> DailySelection {
        let mut positive: Vec<(AssetId, f64)> = Vec::new();
        let mut negative: Vec<(AssetId, f64)> = Vec::new();

        for (i, &score) in scores.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            let asset = AssetId::new(i as u32);
            if score > 0.0 {
                positive.push((asset, score));
            } else if score < 0.0 {
                negative.push((asset, score));
            }
        }

        // Highest scores first; ties resolved by ascending asset id. The
        // comparison is total because non-finite scores were filtered above.
        positive.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(a.0.cmp(&b.0)));
        negative.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.cmp(&b.0)));

        DailySelection {
            longs: positive
                .into_iter()
                .take(self.config.n_longs)
                .map(|(asset, _)| asset)
                .collect(),
            shorts: negative
                .into_iter()
                .take(self.config.n_shorts)
                .map(|(asset, _)| asset)
                .collect(),
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn select(scores: Array1<f64>, n_longs: usize, n_shorts: usize) -> DailySelection {
        Selector::new(SelectorConfig { n_longs, n_shorts }).select(&scores)
    }

    fn ids(selection: &BTreeSet<AssetId>) -> Vec<usize> {
        selection.iter().map(|a| a.index()).collect()
    }

    use std::collections::BTreeSet;

    #[test]
    fn test_sign_partition() {
        // index:        0     1      2     3    4
        let scores = array![0.05, -0.02, 0.03, 0.0, f64::NAN];
        let selection = select(scores, 5, 5);

        assert_eq!(ids(&selection.longs), vec![0, 2]);
        assert_eq!(ids(&selection.shorts), vec![1]);
    }

    #[test]
    fn test_top_k_truncation() {
        let scores = array![0.05, 0.03, 0.01, -0.02, -0.04, -0.06];
        let selection = select(scores, 2, 2);

        // Highest two positives and lowest two negatives.
        assert_eq!(ids(&selection.longs), vec![0, 1]);
        assert_eq!(ids(&selection.shorts), vec![4, 5]);
    }

    #[test]
    fn test_fewer_candidates_than_k() {
        let scores = array![0.05, -0.01];
        let selection = select(scores, 10, 10);
        assert_eq!(selection.longs.len(), 1);
        assert_eq!(selection.shorts.len(), 1);
    }

    #[test]
    fn test_buckets_are_disjoint() {
        let scores = array![0.05, -0.02, 0.03, -0.04, 0.01];
        let selection = select(scores, 5, 5);
        assert!(selection.longs.is_disjoint(&selection.shorts));
    }

    #[test]
    fn test_ties_break_by_asset_id() {
        // Assets 1 and 3 tie; the lower id wins the last slot.
        let scores = array![0.05, 0.03, f64::NAN, 0.03];
        let selection = select(scores, 2, 2);
        assert_eq!(ids(&selection.longs), vec![0, 1]);

        let scores = array![-0.05, -0.03, f64::NAN, -0.03];
        let selection = select(scores, 2, 2);
        assert_eq!(ids(&selection.shorts), vec![0, 1]);
    }

    #[test]
    fn test_all_missing_selects_nothing() {
        let scores = array![f64::NAN, f64::NAN];
        let selection = select(scores, 5, 5);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let scores = array![0.05, -0.02, 0.03, -0.04, 0.01];
        let selector = Selector::default();
        assert_eq!(selector.select(&scores), selector.select(&scores));
    }

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.n_longs, 25);
        assert_eq!(config.n_shorts, 25);
    }
}

//! Target-weight allocation with a minimum-position gate.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use sotavento_traits::AssetId;

use crate::selector::DailySelection;

/// Configuration for daily allocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Minimum position count required on *both* sides before any new
    /// weights are issued (default: 10). Must not exceed either side's
    /// maximum position count.
    pub min_positions: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self { min_positions: 10 }
    }
}

/// One day's target portfolio, asset identifier to signed weight in [-1, 1].
///
/// A zero weight flattens an existing position; an absent asset receives no
/// instruction at all. Computed once per day, consumed by the execution
/// seam, then discarded.
pub type TargetAllocation = BTreeMap<AssetId, f64>;

/// Converts a day's selection into equal-weight target allocations.
///
/// The gate requires strictly more than `min_positions` names on *both*
/// sides; when it fires, each long receives `+1/|longs|` and each short
/// `-1/|shorts|`. The two sides need not be equal in size, so the book is
/// not necessarily dollar-neutral. When the gate does not fire, no new
/// weights are issued — only flattening instructions for previously held
/// assets that dropped out of selection, which are emitted regardless of
/// the gate outcome.
///
/// The allocator is a pure function of (selection, previously held set):
/// no internal state, deterministic, idempotent.
#[derive(Debug, Clone)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator with the given configuration.
    #[must_use]
    pub const fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// The allocator configuration.
    #[must_use]
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Computes the day's target allocation.
    ///
    /// `previously_held` is yesterday's set of assets with a non-zero
    /// position; members absent from both of today's buckets are flattened
    /// with a zero target weight.
    ///
    /// Selection buckets are guaranteed disjoint by the upstream sign
    /// partition; overlapping buckets are an input-contract violation.
    #[must_use]
    pub fn allocate(
        &self,
        selection: &DailySelection,
        previously_held: &BTreeSet<AssetId>,
    ) -> TargetAllocation {
        debug_assert!(
            selection.longs.is_disjoint(&selection.shorts),
            "long and short buckets must be disjoint"
        );

        let mut allocation = TargetAllocation::new();

        let gate_open = selection.longs.len() > self.config.min_positions
            && selection.shorts.len() > self.config.min_positions;

        if gate_open {
            let long_weight = 1.0 / selection.longs.len() as f64;
            for &asset in &selection.longs {
                allocation.insert(asset, long_weight);
            }

            let short_weight = -1.0 / selection.shorts.len() as f64;
            for &asset in &selection.shorts {
                allocation.insert(asset, short_weight);
            }
        }

        // Dropped holdings are flattened whether or not the gate fired.
        for &asset in previously_held {
            if !selection.contains(asset) {
                allocation.insert(asset, 0.0);
            }
        }

        allocation
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(AllocatorConfig::default())
    }
}

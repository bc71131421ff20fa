//! Tuning knobs shared by all operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric tolerances and work budgets.
///
/// The defaults suit coordinates of moderate magnitude; every field can be
/// adjusted with the `with_*` setters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Distance, relative to the input's bounding-box diagonal, below which
    /// two skeleton nodes are merged.
    pub merge_tolerance: f64,

    /// Maximum inner steps of the optimal partition dynamic program.
    pub optimal_step_budget: u64,

    /// Fall back to the approximate partition when the optimal budget runs
    /// out instead of failing.
    pub optimal_fallback: bool,

    /// Skeleton events allowed per input vertex.
    pub skeleton_event_factor: usize,

    /// Maximum inner steps of the skeleton event search, summed over all
    /// events.
    pub skeleton_step_budget: u64,

    /// Relative threshold under which skeleton event denominators count as
    /// zero.
    pub degenerate_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            merge_tolerance: 1e-9,
            optimal_step_budget: 50_000_000,
            optimal_fallback: true,
            skeleton_event_factor: 8,
            skeleton_step_budget: 1_000_000_000,
            degenerate_tolerance: 1e-12,
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the skeleton node merge tolerance.
    pub fn with_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.merge_tolerance = tolerance.max(0.0);
        self
    }

    /// Sets the optimal partition step budget.
    pub fn with_optimal_step_budget(mut self, budget: u64) -> Self {
        self.optimal_step_budget = budget;
        self
    }

    /// Enables or disables the approximate fallback.
    pub fn with_optimal_fallback(mut self, fallback: bool) -> Self {
        self.optimal_fallback = fallback;
        self
    }

    /// Sets the number of skeleton events allowed per vertex.
    pub fn with_skeleton_event_factor(mut self, factor: usize) -> Self {
        self.skeleton_event_factor = factor.max(1);
        self
    }

    /// Sets the skeleton step budget.
    pub fn with_skeleton_step_budget(mut self, budget: u64) -> Self {
        self.skeleton_step_budget = budget;
        self
    }

    /// Sets the degenerate denominator tolerance.
    pub fn with_degenerate_tolerance(mut self, tolerance: f64) -> Self {
        self.degenerate_tolerance = tolerance.max(0.0);
        self
    }

    /// Maximum number of skeleton events for a polygon with `n` vertices.
    pub fn skeleton_event_budget(&self, n: usize) -> usize {
        self.skeleton_event_factor.saturating_mul(n).saturating_add(16)
    }
}

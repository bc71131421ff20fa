//! Error types for flatgeom operations.

use thiserror::Error;

/// Errors that can occur while computing boxes, partitions or skeletons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// Input violates a basic requirement (too few points, malformed buffer,
    /// non-finite coordinate, missing buffer).
    #[error("precondition failed: {reason}")]
    PreconditionFailure {
        /// What was wrong with the input.
        reason: String,
    },

    /// Input is not a simple polygon.
    #[error("invalid geometry: polygon is not simple")]
    InvalidGeometry,

    /// An output does not fit in the space the caller provided.
    #[error("capacity exceeded: {required} required, {capacity} available")]
    CapacityExceeded {
        /// Number of items the full result needs.
        required: usize,
        /// Number of items the caller made room for.
        capacity: usize,
    },

    /// The configuration is too degenerate for the algorithm to resolve.
    #[error("numeric degeneracy: {reason}")]
    NumericDegeneracy {
        /// Where the computation got stuck.
        reason: String,
    },

    /// A metered loop ran out of steps.
    #[error("work budget of {budget} steps exceeded")]
    BudgetExceeded {
        /// The budget that was exhausted.
        budget: u64,
    },
}

impl GeomError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionFailure {
            reason: reason.into(),
        }
    }

    pub(crate) fn degeneracy(reason: impl Into<String>) -> Self {
        Self::NumericDegeneracy {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = GeomError::precondition("need at least 3 points");
        assert_eq!(e.to_string(), "precondition failed: need at least 3 points");

        let e = GeomError::CapacityExceeded {
            required: 10,
            capacity: 4,
        };
        assert_eq!(e.to_string(), "capacity exceeded: 10 required, 4 available");

        let e = GeomError::BudgetExceeded { budget: 7 };
        assert_eq!(e.to_string(), "work budget of 7 steps exceeded");
    }
}

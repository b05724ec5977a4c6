//! Dot relaxation: random initial layout, repulsion passes, band and canvas constraints.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod band;
pub mod dot;
pub mod engine;

pub use band::{clamp_to_canvas, ForbiddenBand};
pub use dot::{scatter_dots, Dot, RADIUS_JITTER_MAX, RADIUS_JITTER_MIN};
pub use engine::{RelaxationEngine, RelaxationSummary, StepStats};

/// How positions are updated within one relaxation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpdateOrder {
    /// Dots move in place in index order; later dots see earlier dots' new positions.
    #[default]
    Sequential,
    /// All displacements are computed from the positions at the start of the pass.
    Synchronous,
}

/// Handling of two dots at exactly the same position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoincidencePolicy {
    /// Push the pair apart along a fixed per-pair direction.
    #[default]
    Escape,
    /// Abort the pass with [`crate::error::Error::DegenerateGeometry`].
    Fail,
}

#![forbid(unsafe_code)]
//! dot_field: relaxed fields of organic dots and brightness-gated blue-noise stippling.
//!
//! Modules:
//! - relax: scatter randomly shaped dots and spread them by positional repulsion,
//!   keeping clear of a horizontal band and inside the canvas
//! - sampling: spatial grid and Poisson-disk sampler with an optional midline density profile
//! - stipple: turn sampled points into marks from the brightness of a reference raster
//! - svg: byte-stable vector output for dot fields and marks
//! - pipeline: stage runners with event reporting
//!
//! Image decoding and raster drawing are left to the caller; see the examples crate.
pub mod config;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod relax;
pub mod sampling;
pub mod stipple;
pub mod svg;

/// Convenient re-exports for common types. Import with `use dot_field::prelude::*;`.
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FieldEvent, FieldEventKind, FnSink, VecSink};
    pub use crate::pipeline::{
        relax_dots, relax_dots_with_events, stipple_raster, stipple_raster_with_events,
        RelaxedField, StippledRaster,
    };
    pub use crate::relax::{
        scatter_dots, CoincidencePolicy, Dot, ForbiddenBand, RelaxationEngine,
        RelaxationSummary, UpdateOrder,
    };
    pub use crate::sampling::{
        PoissonDiskSampling, PoissonSamples, PositionSampling, SpacingPolicy, SpatialGrid,
    };
    pub use crate::stipple::{
        GrayscaleRaster, LumaBuffer, Mark, MarkShape, StippleFilter, StippleMode, StippleResult,
    };
    pub use crate::svg::{
        save_dot_field_svg, save_marks_svg, write_dot_field_svg, write_marks_svg, Palette,
    };
}

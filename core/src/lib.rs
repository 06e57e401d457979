//! Array-factor engine for uniform linear antenna arrays.
//!
//! The crate computes normalized far-field patterns for five families
//! (uniform, steered, Chebyshev-tapered, grating-lobe check and a full 3D
//! view), keeps an append-only set of comparison traces per session, and
//! turns both into chart-ready scenes. It performs no I/O; callers own the
//! session state and drive every render explicitly.

pub mod comparison;
pub mod math;
pub mod pattern;
pub mod prelude;
pub mod render;
pub mod telemetry;

pub use comparison::{ComparisonEntry, ComparisonStore};
pub use prelude::{
    FamilyParameters, PatternError, PatternFamily, PatternParameters, PatternResult,
    PatternStrategy, SampleResolution,
};
pub use render::{render, PatternRenderer, RenderedScene};

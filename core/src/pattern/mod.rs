//! Pattern families and the array-factor math they share.

pub mod array_factor;
pub mod grating;
pub mod spatial;
pub mod steered;
pub mod taper;
pub mod uniform;

pub use grating::{check_grating_lobes, GratingCheckPattern, GratingLobeReport};
pub use spatial::SpatialPattern3D;
pub use steered::SteeredPattern;
pub use taper::{taper_window, TaperedPattern};
pub use uniform::UniformPattern;

use crate::prelude::{
    ComputedPattern, PatternFamily, PatternParameters, PatternResult, PatternStrategy,
    SampleResolution,
};

static UNIFORM: UniformPattern = UniformPattern;
static STEERED: SteeredPattern = SteeredPattern;
static TAPERED: TaperedPattern = TaperedPattern;
static GRATING: GratingCheckPattern = GratingCheckPattern;
static SPATIAL: SpatialPattern3D = SpatialPattern3D;

impl PatternFamily {
    /// Strategy implementing this family.
    pub fn strategy(self) -> &'static dyn PatternStrategy {
        match self {
            PatternFamily::Uniform => &UNIFORM,
            PatternFamily::Steered => &STEERED,
            PatternFamily::Taper => &TAPERED,
            PatternFamily::GratingCheck => &GRATING,
            PatternFamily::Spatial3D => &SPATIAL,
        }
    }
}

/// Evaluates `params` with the strategy of its own family.
pub fn compute(
    params: &PatternParameters,
    resolution: &SampleResolution,
) -> PatternResult<ComputedPattern> {
    params.family().strategy().compute(params, resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_has_matching_strategy() {
        for family in PatternFamily::ALL {
            let strategy = family.strategy();
            assert_eq!(strategy.family(), family);
            assert!(!strategy.title().is_empty());
            assert!(!strategy.description().is_empty());
            let keys: Vec<_> = strategy.controls().iter().map(|c| c.key).collect();
            assert_eq!(&keys[..2], &["element_count", "spacing"]);
        }
    }

    #[test]
    fn strategy_rejects_foreign_parameters() {
        let params = PatternParameters::taper(8, 0.5, 30.0);
        let result = PatternFamily::Uniform
            .strategy()
            .compute(&params, &SampleResolution::default());
        assert!(result.is_err());
    }

    #[test]
    fn compute_dispatches_on_family() {
        let resolution = SampleResolution::default();
        for family in PatternFamily::ALL {
            let output = compute(&PatternParameters::defaults(family), &resolution).unwrap();
            match output {
                ComputedPattern::Curve(curve) => {
                    assert_ne!(family, PatternFamily::Spatial3D);
                    assert_eq!(curve.len(), resolution.curve_samples);
                }
                ComputedPattern::Spatial(grid) => {
                    assert_eq!(family, PatternFamily::Spatial3D);
                    assert_eq!(grid.magnitude.dim(), (100, 100));
                }
            }
        }
    }
}

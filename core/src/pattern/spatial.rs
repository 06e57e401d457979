use crate::pattern::array_factor::spatial_pattern;
use crate::prelude::{
    ComputedPattern, ControlSpec, FamilyParameters, PatternFamily, PatternParameters,
    PatternResult, PatternStrategy, SampleResolution, ELEMENT_COUNT, SPACING,
};

/// Full-sphere view of the unsteered pattern.
pub struct SpatialPattern3D;

impl PatternStrategy for SpatialPattern3D {
    fn family(&self) -> PatternFamily {
        PatternFamily::Spatial3D
    }

    fn title(&self) -> &'static str {
        "3D Array Factor Pattern"
    }

    fn description(&self) -> &'static str {
        "Array factor over every azimuth and elevation, shown as a surface whose radius \
         is the normalized magnitude and as an azimuth/elevation contour map."
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![ELEMENT_COUNT, SPACING]
    }

    fn summary(&self, params: &PatternParameters) -> String {
        format!("N={}, d={}λ", params.element_count, params.spacing)
    }

    fn compute(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<ComputedPattern> {
        if params.variant != FamilyParameters::Spatial3D {
            return Err(params.mismatch(PatternFamily::Spatial3D));
        }
        params.validate()?;
        resolution.validate()?;
        spatial_pattern(
            params.element_count,
            params.spacing,
            resolution.azimuth_samples,
            resolution.elevation_samples,
        )
        .map(ComputedPattern::Spatial)
    }
}

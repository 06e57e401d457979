use crate::pattern::array_factor::{dirichlet_curve, steering_phase};
use crate::prelude::{
    ComputedPattern, ControlSpec, FamilyParameters, PatternFamily, PatternParameters,
    PatternResult, PatternStrategy, SampleResolution, ELEMENT_COUNT, SPACING, STEERING_ANGLE,
};

/// Electronically steered ULA; the phase slope is derived from the steering angle.
pub struct SteeredPattern;

impl PatternStrategy for SteeredPattern {
    fn family(&self) -> PatternFamily {
        PatternFamily::Steered
    }

    fn title(&self) -> &'static str {
        "Beam Steering Pattern"
    }

    fn description(&self) -> &'static str {
        "Main beam steered electronically to θ₀ with β = -2πd·cos(θ₀). The pattern \
         broadens and distorts as the beam approaches endfire."
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![ELEMENT_COUNT, SPACING, STEERING_ANGLE]
    }

    fn summary(&self, params: &PatternParameters) -> String {
        let angle = match params.variant {
            FamilyParameters::Steered { steering_angle_deg } => steering_angle_deg,
            _ => 0.0,
        };
        format!("N={}, d={}λ, θ={}°", params.element_count, params.spacing, angle)
    }

    fn compute(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<ComputedPattern> {
        let FamilyParameters::Steered { steering_angle_deg } = params.variant else {
            return Err(params.mismatch(PatternFamily::Steered));
        };
        params.validate()?;
        resolution.validate()?;
        let beta = steering_phase(params.spacing, steering_angle_deg);
        dirichlet_curve(
            params.element_count,
            params.spacing,
            beta,
            resolution.curve_samples,
        )
        .map(ComputedPattern::Curve)
    }
}

use crate::pattern::array_factor::dirichlet_curve;
use crate::prelude::{
    ComputedPattern, ControlSpec, FamilyParameters, PatternFamily, PatternParameters,
    PatternResult, PatternStrategy, SampleResolution, ELEMENT_COUNT, PHASE_SHIFT, SPACING,
};

/// Unweighted ULA with a caller-chosen progressive phase shift.
pub struct UniformPattern;

impl PatternStrategy for UniformPattern {
    fn family(&self) -> PatternFamily {
        PatternFamily::Uniform
    }

    fn title(&self) -> &'static str {
        "ULA Radiation Pattern"
    }

    fn description(&self) -> &'static str {
        "Normalized radiation pattern of a uniform linear array. More elements narrow \
         the main beam; spacing sets beam width and sidelobe positions; the progressive \
         phase shift β moves the beam."
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![ELEMENT_COUNT, SPACING, PHASE_SHIFT]
    }

    fn summary(&self, params: &PatternParameters) -> String {
        let beta = match params.variant {
            FamilyParameters::Uniform { phase_shift_rad } => phase_shift_rad,
            _ => 0.0,
        };
        format!(
            "N={}, d={}λ, β={:.2} rad",
            params.element_count, params.spacing, beta
        )
    }

    fn compute(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<ComputedPattern> {
        let FamilyParameters::Uniform { phase_shift_rad } = params.variant else {
            return Err(params.mismatch(PatternFamily::Uniform));
        };
        params.validate()?;
        resolution.validate()?;
        dirichlet_curve(
            params.element_count,
            params.spacing,
            phase_shift_rad,
            resolution.curve_samples,
        )
        .map(ComputedPattern::Curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_phase_shift() {
        let params = PatternParameters::uniform(8, 0.5, 0.0);
        assert_eq!(UniformPattern.summary(&params), "N=8, d=0.5λ, β=0.00 rad");
    }

    #[test]
    fn phase_shift_moves_peak_off_broadside() {
        let resolution = SampleResolution::default();
        let params = PatternParameters::uniform(8, 0.5, -1.0);
        let curve = UniformPattern
            .compute(&params, &resolution)
            .unwrap()
            .into_curve()
            .unwrap();
        let (angle, value) = curve.peak().unwrap();
        assert_eq!(value, 1.0);
        // π·cos θ = 1 rad
        let expected = (1.0 / std::f64::consts::PI).acos().to_degrees();
        assert!((angle - expected).abs() < 0.5);
    }

    #[test]
    fn invalid_parameters_block_computation() {
        let params = PatternParameters::uniform(1, 0.5, 0.0);
        assert!(UniformPattern
            .compute(&params, &SampleResolution::default())
            .is_err());
    }
}

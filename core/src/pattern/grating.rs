//! Grating-lobe prediction for a given spacing and wavelength.

use crate::pattern::array_factor::dirichlet_curve;
use crate::prelude::{
    ComputedPattern, ControlSpec, FamilyParameters, PatternError, PatternFamily,
    PatternParameters, PatternResult, PatternStrategy, SampleResolution, ELEMENT_COUNT, SPACING,
    WAVELENGTH,
};
use serde::Serialize;

/// Relative margin over λ/2 needed before lobes count as present.
const CRITICAL_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GratingLobeReport {
    /// d·λ
    pub physical_spacing: f64,
    /// λ/2
    pub critical_spacing: f64,
    pub lobes_present: bool,
    /// arccos(±λ/d_phys) in degrees, ascending; empty when no lobes are present.
    pub lobe_angles_deg: Vec<f64>,
    /// Set when |λ/d_phys| exceeded 1 and the angles were pinned to endfire.
    pub clamped_to_visible: bool,
}

impl GratingLobeReport {
    pub fn status_text(&self) -> String {
        if self.lobes_present {
            format!(
                "Grating lobes likely: d = {:.2} > λ/2 = {:.2}",
                self.physical_spacing, self.critical_spacing
            )
        } else {
            format!(
                "No grating lobes: d = {:.2} ≤ λ/2 = {:.2}",
                self.physical_spacing, self.critical_spacing
            )
        }
    }
}

/// Checks spacing `spacing` (in wavelengths) at wavelength `wavelength` for grating lobes.
pub fn check_grating_lobes(spacing: f64, wavelength: f64) -> PatternResult<GratingLobeReport> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "spacing must be positive, got {}",
            spacing
        )));
    }
    if !wavelength.is_finite() || wavelength <= 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "wavelength must be positive, got {}",
            wavelength
        )));
    }

    let physical_spacing = spacing * wavelength;
    let critical_spacing = wavelength / 2.0;
    let lobes_present = physical_spacing - critical_spacing > critical_spacing * CRITICAL_TOLERANCE;

    let mut lobe_angles_deg = Vec::new();
    let mut clamped_to_visible = false;
    if lobes_present {
        let ratio = wavelength / physical_spacing;
        for sign in [-1.0, 1.0] {
            let argument = sign * ratio;
            let bounded = argument.clamp(-1.0, 1.0);
            clamped_to_visible |= bounded != argument;
            lobe_angles_deg.push(bounded.acos().to_degrees());
        }
        lobe_angles_deg.sort_by(f64::total_cmp);
    }

    Ok(GratingLobeReport {
        physical_spacing,
        critical_spacing,
        lobes_present,
        lobe_angles_deg,
        clamped_to_visible,
    })
}

/// Unsteered ULA evaluated alongside a grating-lobe check.
pub struct GratingCheckPattern;

impl GratingCheckPattern {
    pub fn report(&self, params: &PatternParameters) -> PatternResult<GratingLobeReport> {
        let FamilyParameters::GratingCheck { wavelength } = params.variant else {
            return Err(params.mismatch(PatternFamily::GratingCheck));
        };
        params.validate()?;
        check_grating_lobes(params.spacing, wavelength)
    }
}

impl PatternStrategy for GratingCheckPattern {
    fn family(&self) -> PatternFamily {
        PatternFamily::GratingCheck
    }

    fn title(&self) -> &'static str {
        "Grating Lobe Check"
    }

    fn description(&self) -> &'static str {
        "Flags spacings beyond λ/2, where spurious main-lobe-strength peaks appear at \
         θ = arccos(±λ/d), and marks their angles on the pattern."
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![ELEMENT_COUNT, SPACING, WAVELENGTH]
    }

    fn summary(&self, params: &PatternParameters) -> String {
        let wavelength = match params.variant {
            FamilyParameters::GratingCheck { wavelength } => wavelength,
            _ => 0.0,
        };
        format!(
            "N={}, d={}λ, λ={:.2}",
            params.element_count, params.spacing, wavelength
        )
    }

    fn compute(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<ComputedPattern> {
        if !matches!(params.variant, FamilyParameters::GratingCheck { .. }) {
            return Err(params.mismatch(PatternFamily::GratingCheck));
        }
        params.validate()?;
        resolution.validate()?;
        dirichlet_curve(
            params.element_count,
            params.spacing,
            0.0,
            resolution.curve_samples,
        )
        .map(ComputedPattern::Curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_critical_spacing_has_no_lobes() {
        let report = check_grating_lobes(0.4, 1.0).unwrap();
        assert!(!report.lobes_present);
        assert!(report.lobe_angles_deg.is_empty());
        assert_eq!(report.status_text(), "No grating lobes: d = 0.40 ≤ λ/2 = 0.50");
    }

    #[test]
    fn exactly_critical_spacing_has_no_lobes() {
        for wavelength in [0.1, 0.3, 1.0, 1.7] {
            let report = check_grating_lobes(0.5, wavelength).unwrap();
            assert!(!report.lobes_present, "λ = {}", wavelength);
        }
    }

    #[test]
    fn wide_spacing_reports_symmetric_pair() {
        let report = check_grating_lobes(0.6, 1.0).unwrap();
        assert!(report.lobes_present);
        assert_eq!(report.lobe_angles_deg.len(), 2);
        let expected: Vec<f64> = [1.0 / 0.6, -1.0 / 0.6]
            .iter()
            .map(|v: &f64| v.clamp(-1.0, 1.0).acos().to_degrees())
            .collect();
        assert!((report.lobe_angles_deg[0] - expected[0]).abs() < 1e-9);
        assert!((report.lobe_angles_deg[1] - expected[1]).abs() < 1e-9);
        let midpoint = (report.lobe_angles_deg[0] + report.lobe_angles_deg[1]) / 2.0;
        assert!((midpoint - 90.0).abs() < 1e-9);
        assert!(report.clamped_to_visible);
        assert!(report.status_text().starts_with("Grating lobes likely"));
    }

    #[test]
    fn lobes_inside_visible_region_are_not_clamped() {
        let report = check_grating_lobes(2.0, 1.0).unwrap();
        assert!(report.lobes_present);
        assert!(!report.clamped_to_visible);
        assert!((report.lobe_angles_deg[0] - 60.0).abs() < 1e-9);
        assert!((report.lobe_angles_deg[1] - 120.0).abs() < 1e-9);
        let midpoint = (report.lobe_angles_deg[0] + report.lobe_angles_deg[1]) / 2.0;
        assert!((midpoint - 90.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(check_grating_lobes(0.0, 1.0).is_err());
        assert!(check_grating_lobes(0.5, -1.0).is_err());
        assert!(check_grating_lobes(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn report_requires_grating_parameters() {
        let params = PatternParameters::grating_check(8, 0.8, 1.0);
        assert!(GratingCheckPattern.report(&params).unwrap().lobes_present);
        assert!(GratingCheckPattern
            .report(&PatternParameters::uniform(8, 0.8, 0.0))
            .is_err());
    }

    #[test]
    fn summary_lists_wavelength() {
        let params = PatternParameters::grating_check(8, 0.5, 1.0);
        assert_eq!(GratingCheckPattern.summary(&params), "N=8, d=0.5λ, λ=1.00");
    }
}

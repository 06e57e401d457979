use crate::math::window::{chebyshev_weights, TaperWindow};
use crate::pattern::array_factor::tapered_curve;
use crate::prelude::{
    ComputedPattern, ControlSpec, FamilyParameters, PatternCurve, PatternFamily, PatternParameters,
    PatternResult, PatternStrategy, SampleResolution, ELEMENT_COUNT, SIDELOBE_LEVEL, SPACING,
};

/// Dolph-Chebyshev tapered ULA.
pub struct TaperedPattern;

/// Chebyshev weights for a taper-family parameter set.
pub fn taper_window(params: &PatternParameters) -> PatternResult<TaperWindow> {
    let FamilyParameters::Taper { sidelobe_level_db } = params.variant else {
        return Err(params.mismatch(PatternFamily::Taper));
    };
    params.validate()?;
    chebyshev_weights(params.element_count, sidelobe_level_db)
}

impl TaperedPattern {
    /// Taper weights together with the pattern they produce.
    pub fn evaluate(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<(TaperWindow, PatternCurve)> {
        resolution.validate()?;
        let window = taper_window(params)?;
        let curve = tapered_curve(&window.weights, params.spacing, resolution.curve_samples)?;
        Ok((window, curve))
    }
}

impl PatternStrategy for TaperedPattern {
    fn family(&self) -> PatternFamily {
        PatternFamily::Taper
    }

    fn title(&self) -> &'static str {
        "Chebyshev Array Pattern"
    }

    fn description(&self) -> &'static str {
        "Chebyshev amplitude taper giving equal-height sidelobes at the requested level, \
         traded against a wider main beam. AF = |Σ wₙ·exp(j2πnd·cos θ)|."
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![ELEMENT_COUNT, SPACING, SIDELOBE_LEVEL]
    }

    fn summary(&self, params: &PatternParameters) -> String {
        let level = match params.variant {
            FamilyParameters::Taper { sidelobe_level_db } => sidelobe_level_db,
            _ => 0.0,
        };
        format!("N={}, d={}λ, R={} dB", params.element_count, params.spacing, level)
    }

    fn compute(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<ComputedPattern> {
        self.evaluate(params, resolution)
            .map(|(_, curve)| ComputedPattern::Curve(curve))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_with_samples(n: usize, level: f64, samples: usize) -> PatternCurve {
        let resolution = SampleResolution {
            curve_samples: samples,
            ..Default::default()
        };
        TaperedPattern
            .compute(&PatternParameters::taper(n, 0.5, level), &resolution)
            .unwrap()
            .into_curve()
            .unwrap()
    }

    fn curve_for(n: usize, level: f64) -> PatternCurve {
        curve_with_samples(n, level, SampleResolution::default().curve_samples)
    }

    /// Largest value outside the main lobe, found by walking down to the first null on each side.
    fn worst_sidelobe(curve: &PatternCurve) -> f64 {
        let (peak_idx, _) = crate::math::StatsHelper::peak(&curve.magnitudes).unwrap();
        let m = &curve.magnitudes;

        // equal neighbours at a split peak still belong to the main lobe
        let mut right = peak_idx;
        while right + 1 < m.len() && m[right + 1] <= m[right] {
            right += 1;
        }
        let mut left = peak_idx;
        while left > 0 && m[left - 1] <= m[left] {
            left -= 1;
        }

        m.iter()
            .enumerate()
            .filter(|&(i, _)| i < left || i > right)
            .map(|(_, &v)| v)
            .fold(0.0, f64::max)
    }

    #[test]
    fn sidelobes_stay_at_design_level() {
        let curve = curve_for(8, 30.0);
        let limit = 10f64.powf(-30.0 / 20.0) * 1.02;
        let worst = worst_sidelobe(&curve);
        assert!(worst <= limit, "worst sidelobe {} above {}", worst, limit);
        assert!(worst > limit * 0.5, "sidelobes {} suspiciously low", worst);
    }

    #[test]
    fn split_broadside_peak_is_not_a_sidelobe() {
        // an even sample count puts 90° between two samples of equal height
        let even = curve_with_samples(8, 30.0, 1000);
        let (peak_idx, _) = crate::math::StatsHelper::peak(&even.magnitudes).unwrap();
        assert!((even.magnitudes[peak_idx + 1] - 1.0).abs() < 1e-9);
        let limit = 10f64.powf(-30.0 / 20.0) * 1.02;
        assert!(worst_sidelobe(&even) <= limit);

        let odd = curve_with_samples(8, 30.0, 1001);
        assert_eq!(odd.value_near(90.0), Some(1.0));
        assert!(worst_sidelobe(&odd) <= limit);
    }

    #[test]
    fn evaluate_returns_window_with_curve() {
        let (window, curve) = TaperedPattern
            .evaluate(
                &PatternParameters::taper(2, 0.5, 40.0),
                &SampleResolution::default(),
            )
            .unwrap();
        assert!(window.is_degenerate());
        assert_eq!(window.weights, vec![1.0, 1.0]);
        assert_eq!(curve.len(), 1000);
    }

    #[test]
    fn tapered_curve_is_normalized() {
        let curve = curve_for(12, 45.0);
        let (_, value) = curve.peak().unwrap();
        assert_eq!(value, 1.0);
        assert!(curve.magnitudes.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn window_rejects_other_families() {
        assert!(taper_window(&PatternParameters::uniform(8, 0.5, 0.0)).is_err());
        let window = taper_window(&PatternParameters::taper(8, 0.5, 30.0)).unwrap();
        assert_eq!(window.weights.len(), 8);
    }

    #[test]
    fn summary_lists_sidelobe_level() {
        let params = PatternParameters::taper(8, 0.5, 30.0);
        assert_eq!(TaperedPattern.summary(&params), "N=8, d=0.5λ, R=30 dB");
    }
}

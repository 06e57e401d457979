use crate::math::StatsHelper;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Pattern families supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    Uniform,
    Steered,
    Taper,
    GratingCheck,
    #[serde(rename = "spatial_3d")]
    Spatial3D,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 5] = [
        PatternFamily::Uniform,
        PatternFamily::Steered,
        PatternFamily::Taper,
        PatternFamily::GratingCheck,
        PatternFamily::Spatial3D,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PatternFamily::Uniform => "uniform",
            PatternFamily::Steered => "steered",
            PatternFamily::Taper => "taper",
            PatternFamily::GratingCheck => "grating_check",
            PatternFamily::Spatial3D => "spatial_3d",
        }
    }

    /// Whether the family renders as a 2D chart that can carry comparison overlays.
    pub fn supports_comparison(self) -> bool {
        !matches!(self, PatternFamily::Spatial3D)
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PatternFamily {
    type Err = PatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "uniform" | "basic" => Ok(PatternFamily::Uniform),
            "steered" | "steering" => Ok(PatternFamily::Steered),
            "taper" | "chebyshev" => Ok(PatternFamily::Taper),
            "grating_check" | "grating" => Ok(PatternFamily::GratingCheck),
            "spatial_3d" | "3d" => Ok(PatternFamily::Spatial3D),
            other => Err(PatternError::InvalidParameter(format!(
                "unknown pattern family '{}'",
                other
            ))),
        }
    }
}

/// Declared range and default for one scalar control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub help: &'static str,
}

impl ControlSpec {
    /// Rejects non-finite values and values outside `[min, max]`.
    pub fn check(&self, value: f64) -> PatternResult<()> {
        if !value.is_finite() {
            return Err(PatternError::InvalidParameter(format!(
                "{} must be finite",
                self.key
            )));
        }
        if value < self.min || value > self.max {
            return Err(PatternError::InvalidParameter(format!(
                "{} = {} outside [{}, {}]",
                self.key, value, self.min, self.max
            )));
        }
        Ok(())
    }
}

pub const ELEMENT_COUNT: ControlSpec = ControlSpec {
    key: "element_count",
    label: "Number of Elements (N)",
    unit: "",
    min: 2.0,
    max: 20.0,
    default: 8.0,
    help: "Number of antenna elements in the array",
};

pub const SPACING: ControlSpec = ControlSpec {
    key: "spacing",
    label: "Element Spacing (d/λ)",
    unit: "λ",
    min: 0.1,
    max: 1.0,
    default: 0.5,
    help: "Spacing between elements in wavelengths",
};

pub const PHASE_SHIFT: ControlSpec = ControlSpec {
    key: "phase_shift_rad",
    label: "Phase Shift (β)",
    unit: "rad",
    min: -PI,
    max: PI,
    default: 0.0,
    help: "Progressive phase shift in radians",
};

pub const STEERING_ANGLE: ControlSpec = ControlSpec {
    key: "steering_angle_deg",
    label: "Steering Angle (degrees)",
    unit: "°",
    min: 0.0,
    max: 180.0,
    default: 30.0,
    help: "Desired steering angle in degrees",
};

pub const SIDELOBE_LEVEL: ControlSpec = ControlSpec {
    key: "sidelobe_level_db",
    label: "Sidelobe Level (dB)",
    unit: "dB",
    min: 10.0,
    max: 50.0,
    default: 30.0,
    help: "Desired sidelobe level in decibels",
};

pub const WAVELENGTH: ControlSpec = ControlSpec {
    key: "wavelength",
    label: "Wavelength (λ)",
    unit: "",
    min: 0.1,
    max: 2.0,
    default: 1.0,
    help: "Wavelength of operation",
};

/// Family-specific parameter set; the variant tag selects the family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FamilyParameters {
    Uniform {
        phase_shift_rad: f64,
    },
    Steered {
        steering_angle_deg: f64,
    },
    Taper {
        sidelobe_level_db: f64,
    },
    GratingCheck {
        wavelength: f64,
    },
    #[serde(rename = "spatial_3d")]
    Spatial3D,
}

impl FamilyParameters {
    pub fn family(&self) -> PatternFamily {
        match self {
            FamilyParameters::Uniform { .. } => PatternFamily::Uniform,
            FamilyParameters::Steered { .. } => PatternFamily::Steered,
            FamilyParameters::Taper { .. } => PatternFamily::Taper,
            FamilyParameters::GratingCheck { .. } => PatternFamily::GratingCheck,
            FamilyParameters::Spatial3D => PatternFamily::Spatial3D,
        }
    }

    pub fn defaults(family: PatternFamily) -> Self {
        match family {
            PatternFamily::Uniform => FamilyParameters::Uniform {
                phase_shift_rad: PHASE_SHIFT.default,
            },
            PatternFamily::Steered => FamilyParameters::Steered {
                steering_angle_deg: STEERING_ANGLE.default,
            },
            PatternFamily::Taper => FamilyParameters::Taper {
                sidelobe_level_db: SIDELOBE_LEVEL.default,
            },
            PatternFamily::GratingCheck => FamilyParameters::GratingCheck {
                wavelength: WAVELENGTH.default,
            },
            PatternFamily::Spatial3D => FamilyParameters::Spatial3D,
        }
    }
}

/// Scalar inputs for one pattern evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternParameters {
    pub element_count: usize,
    /// Element spacing in wavelengths.
    pub spacing: f64,
    #[serde(flatten)]
    pub variant: FamilyParameters,
}

impl PatternParameters {
    pub fn new(element_count: usize, spacing: f64, variant: FamilyParameters) -> Self {
        Self {
            element_count,
            spacing,
            variant,
        }
    }

    pub fn uniform(element_count: usize, spacing: f64, phase_shift_rad: f64) -> Self {
        Self::new(
            element_count,
            spacing,
            FamilyParameters::Uniform { phase_shift_rad },
        )
    }

    pub fn steered(element_count: usize, spacing: f64, steering_angle_deg: f64) -> Self {
        Self::new(
            element_count,
            spacing,
            FamilyParameters::Steered { steering_angle_deg },
        )
    }

    pub fn taper(element_count: usize, spacing: f64, sidelobe_level_db: f64) -> Self {
        Self::new(
            element_count,
            spacing,
            FamilyParameters::Taper { sidelobe_level_db },
        )
    }

    pub fn grating_check(element_count: usize, spacing: f64, wavelength: f64) -> Self {
        Self::new(
            element_count,
            spacing,
            FamilyParameters::GratingCheck { wavelength },
        )
    }

    pub fn spatial(element_count: usize, spacing: f64) -> Self {
        Self::new(element_count, spacing, FamilyParameters::Spatial3D)
    }

    /// Control defaults for `family` (N = 8, d = 0.5λ plus the family field).
    pub fn defaults(family: PatternFamily) -> Self {
        Self::new(
            ELEMENT_COUNT.default as usize,
            SPACING.default,
            FamilyParameters::defaults(family),
        )
    }

    pub fn family(&self) -> PatternFamily {
        self.variant.family()
    }

    pub fn validate(&self) -> PatternResult<()> {
        if self.element_count < 2 {
            return Err(PatternError::InvalidParameter(format!(
                "element_count must be at least 2, got {}",
                self.element_count
            )));
        }
        ELEMENT_COUNT.check(self.element_count as f64)?;
        if !(self.spacing > 0.0) {
            return Err(PatternError::InvalidParameter(format!(
                "spacing must be positive, got {}",
                self.spacing
            )));
        }
        SPACING.check(self.spacing)?;

        match self.variant {
            FamilyParameters::Uniform { phase_shift_rad } => PHASE_SHIFT.check(phase_shift_rad),
            FamilyParameters::Steered { steering_angle_deg } => {
                STEERING_ANGLE.check(steering_angle_deg)
            }
            FamilyParameters::Taper { sidelobe_level_db } => SIDELOBE_LEVEL.check(sidelobe_level_db),
            FamilyParameters::GratingCheck { wavelength } => WAVELENGTH.check(wavelength),
            FamilyParameters::Spatial3D => Ok(()),
        }
    }

    /// Error for a strategy handed parameters of another family.
    pub fn mismatch(&self, expected: PatternFamily) -> PatternError {
        PatternError::InvalidParameter(format!(
            "expected {} parameters, got {}",
            expected,
            self.family()
        ))
    }
}

/// Sampling density for curves and 3D grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleResolution {
    pub curve_samples: usize,
    pub azimuth_samples: usize,
    pub elevation_samples: usize,
}

impl Default for SampleResolution {
    fn default() -> Self {
        Self {
            curve_samples: 1000,
            azimuth_samples: 100,
            elevation_samples: 100,
        }
    }
}

impl SampleResolution {
    pub fn validate(&self) -> PatternResult<()> {
        for (name, value) in [
            ("curve_samples", self.curve_samples),
            ("azimuth_samples", self.azimuth_samples),
            ("elevation_samples", self.elevation_samples),
        ] {
            if value < 2 {
                return Err(PatternError::InvalidParameter(format!(
                    "{} must be at least 2, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Normalized array factor sampled over observation angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCurve {
    pub angles_deg: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl PatternCurve {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.angles_deg
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }

    /// Angle and value of the first sample holding the maximum.
    pub fn peak(&self) -> Option<(f64, f64)> {
        StatsHelper::peak(&self.magnitudes).map(|(idx, value)| (self.angles_deg[idx], value))
    }

    /// Value of the sample closest to `angle_deg`.
    pub fn value_near(&self, angle_deg: f64) -> Option<f64> {
        self.points()
            .min_by(|a, b| {
                (a.0 - angle_deg)
                    .abs()
                    .total_cmp(&(b.0 - angle_deg).abs())
            })
            .map(|(_, value)| value)
    }
}

/// Normalized pattern over the azimuth × elevation grid, plus its Cartesian projection.
///
/// Rows index elevation, columns index azimuth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialPattern {
    pub azimuth_deg: Vec<f64>,
    pub elevation_deg: Vec<f64>,
    pub magnitude: Array2<f64>,
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub z: Array2<f64>,
}

/// Output of a strategy evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedPattern {
    Curve(PatternCurve),
    Spatial(SpatialPattern),
}

impl ComputedPattern {
    pub fn into_curve(self) -> Option<PatternCurve> {
        match self {
            ComputedPattern::Curve(curve) => Some(curve),
            ComputedPattern::Spatial(_) => None,
        }
    }

    pub fn into_spatial(self) -> Option<SpatialPattern> {
        match self {
            ComputedPattern::Spatial(spatial) => Some(spatial),
            ComputedPattern::Curve(_) => None,
        }
    }
}

/// Common error type for pattern evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

pub type PatternResult<T> = Result<T, PatternError>;

/// One pattern family: its math, its controls and its legend text.
pub trait PatternStrategy {
    fn family(&self) -> PatternFamily;
    fn title(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn controls(&self) -> Vec<ControlSpec>;
    fn summary(&self, params: &PatternParameters) -> String;
    fn compute(
        &self,
        params: &PatternParameters,
        resolution: &SampleResolution,
    ) -> PatternResult<ComputedPattern>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_single_element() {
        let params = PatternParameters::uniform(1, 0.5, 0.0);
        assert!(matches!(
            params.validate(),
            Err(PatternError::InvalidParameter(_))
        ));
    }

    #[test]
    fn validate_rejects_non_positive_spacing() {
        assert!(PatternParameters::uniform(8, 0.0, 0.0).validate().is_err());
        assert!(PatternParameters::uniform(8, -0.5, 0.0).validate().is_err());
        assert!(PatternParameters::uniform(8, f64::NAN, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_family_fields() {
        assert!(PatternParameters::steered(8, 0.5, 181.0).validate().is_err());
        assert!(PatternParameters::taper(8, 0.5, 5.0).validate().is_err());
        assert!(PatternParameters::grating_check(8, 0.5, 2.5)
            .validate()
            .is_err());
        assert!(PatternParameters::uniform(8, 0.5, 4.0).validate().is_err());
        assert!(PatternParameters::uniform(21, 0.5, 0.0).validate().is_err());
    }

    #[test]
    fn defaults_are_valid_for_every_family() {
        for family in PatternFamily::ALL {
            let params = PatternParameters::defaults(family);
            assert_eq!(params.family(), family);
            params.validate().unwrap();
        }
    }

    #[test]
    fn family_parses_keys_and_aliases() {
        for family in PatternFamily::ALL {
            assert_eq!(family.key().parse::<PatternFamily>().unwrap(), family);
        }
        assert_eq!(
            "Chebyshev".parse::<PatternFamily>().unwrap(),
            PatternFamily::Taper
        );
        assert_eq!("3d".parse::<PatternFamily>().unwrap(), PatternFamily::Spatial3D);
        assert!("planar".parse::<PatternFamily>().is_err());
    }

    #[test]
    fn parameters_serialize_with_family_tag() {
        let params = PatternParameters::steered(8, 0.5, 30.0);
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["family"], "steered");
        assert_eq!(json["steering_angle_deg"], 30.0);

        let spatial: PatternParameters = serde_json::from_str(
            r#"{"element_count": 4, "spacing": 0.25, "family": "spatial_3d"}"#,
        )
        .unwrap();
        assert_eq!(spatial.family(), PatternFamily::Spatial3D);
    }

    #[test]
    fn resolution_requires_two_samples() {
        let resolution = SampleResolution {
            curve_samples: 1,
            ..Default::default()
        };
        assert!(resolution.validate().is_err());
        SampleResolution::default().validate().unwrap();
    }

    #[test]
    fn curve_peak_and_nearest_sample() {
        let curve = PatternCurve {
            angles_deg: vec![0.0, 45.0, 90.0, 135.0],
            magnitudes: vec![0.1, 1.0, 0.5, 1.0],
        };
        assert_eq!(curve.peak(), Some((45.0, 1.0)));
        assert_eq!(curve.value_near(80.0), Some(0.5));
    }
}

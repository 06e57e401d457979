//! Array-factor synthesis for a uniform linear array.
//!
//! Angles follow the usual ULA convention: θ is measured from the array axis,
//! so broadside sits at θ = 90°.

use crate::math::matrix::MatrixHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{PatternCurve, PatternError, PatternResult, SpatialPattern};
use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::{PI, TAU};

/// |sin(μ/2)| below this uses the analytic limit of the Dirichlet ratio.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

fn ensure_geometry(element_count: usize, spacing: f64) -> PatternResult<()> {
    if element_count < 2 {
        return Err(PatternError::InvalidParameter(format!(
            "array factor needs at least 2 elements, got {}",
            element_count
        )));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "spacing must be positive, got {}",
            spacing
        )));
    }
    Ok(())
}

/// Observation angles in radians, `samples` points over [0, π].
pub fn angle_sweep(samples: usize) -> Vec<f64> {
    StatsHelper::linspace(0.0, PI, samples)
}

/// Inter-element phase μ = 2π·d·cos θ + β.
pub fn phase_progression(spacing: f64, theta: f64, beta: f64) -> f64 {
    TAU * spacing * theta.cos() + beta
}

/// Phase slope β that moves the main lobe to `steering_angle_deg`.
pub fn steering_phase(spacing: f64, steering_angle_deg: f64) -> f64 {
    -TAU * spacing * steering_angle_deg.to_radians().cos()
}

/// |sin(Nμ/2) / (N·sin(μ/2))|, equal to 1 wherever μ is a multiple of 2π.
pub fn dirichlet_magnitude(element_count: usize, mu: f64) -> f64 {
    let half = (mu / 2.0).sin();
    if half.abs() < SINGULARITY_EPSILON {
        return 1.0;
    }
    let n = element_count as f64;
    ((n * mu / 2.0).sin() / (n * half)).abs()
}

fn normalized_curve(thetas: &[f64], mut magnitudes: Vec<f64>) -> PatternResult<PatternCurve> {
    StatsHelper::normalize_to_peak(magnitudes.iter_mut())?;
    Ok(PatternCurve {
        angles_deg: thetas.iter().map(|t| t.to_degrees()).collect(),
        magnitudes,
    })
}

/// Closed-form pattern of a uniformly weighted array with phase slope `beta`.
pub fn dirichlet_curve(
    element_count: usize,
    spacing: f64,
    beta: f64,
    samples: usize,
) -> PatternResult<PatternCurve> {
    ensure_geometry(element_count, spacing)?;
    if !beta.is_finite() {
        return Err(PatternError::InvalidParameter(
            "phase shift must be finite".into(),
        ));
    }
    let thetas = angle_sweep(samples);
    let magnitudes = thetas
        .iter()
        .map(|&theta| dirichlet_magnitude(element_count, phase_progression(spacing, theta, beta)))
        .collect();
    normalized_curve(&thetas, magnitudes)
}

/// Pattern of an arbitrarily weighted array by direct complex summation.
pub fn tapered_curve(weights: &[f64], spacing: f64, samples: usize) -> PatternResult<PatternCurve> {
    ensure_geometry(weights.len(), spacing)?;
    let thetas = angle_sweep(samples);
    let magnitudes = thetas
        .iter()
        .map(|&theta| {
            let step = TAU * spacing * theta.cos();
            weights
                .iter()
                .enumerate()
                .map(|(n, &w)| Complex64::from_polar(w, step * n as f64))
                .sum::<Complex64>()
                .norm()
        })
        .collect();
    normalized_curve(&thetas, magnitudes)
}

/// Pattern over the full sphere, normalized by the grid maximum and projected to Cartesian.
pub fn spatial_pattern(
    element_count: usize,
    spacing: f64,
    azimuth_samples: usize,
    elevation_samples: usize,
) -> PatternResult<SpatialPattern> {
    ensure_geometry(element_count, spacing)?;
    let azimuth = StatsHelper::linspace(0.0, TAU, azimuth_samples);
    let elevation = StatsHelper::linspace(0.0, PI, elevation_samples);
    let (az_grid, el_grid) = MatrixHelper::meshgrid(&azimuth, &elevation);

    let mut magnitude: Array2<f64> = el_grid.mapv(|el| {
        dirichlet_magnitude(element_count, phase_progression(spacing, el, 0.0))
    });
    StatsHelper::normalize_to_peak(magnitude.iter_mut())?;

    let (x, y, z) = MatrixHelper::spherical_to_cartesian(&magnitude, &az_grid, &el_grid);
    Ok(SpatialPattern {
        azimuth_deg: azimuth.iter().map(|a| a.to_degrees()).collect(),
        elevation_deg: elevation.iter().map(|e| e.to_degrees()).collect(),
        magnitude,
        x,
        y,
        z,
    })
}

//! Dolph-Chebyshev amplitude taper.
//!
//! Weights follow the frequency-sampling construction: the Chebyshev
//! polynomial T_{N-1} is sampled on the unit circle, transformed with an FFT
//! and mirrored into a symmetric window whose peak is 1.0.

use crate::math::fft::FftHelper;
use crate::prelude::{PatternError, PatternResult};
use log::warn;
use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

/// Weights within this fraction of the peak count as uniform.
const NEAR_UNIFORM_RATIO: f64 = 0.99;
/// Smallest weight/peak ratio (60 dB) before the window is considered ill-conditioned.
const MIN_WEIGHT_RATIO: f64 = 1e-3;
/// Relative size of a negative weight that is more than FFT round-off.
const NEGATIVE_TOLERANCE: f64 = 1e-9;

/// Numerical health of a generated taper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaperCondition {
    Nominal,
    /// The aperture is too small to realize the requested suppression.
    NearUniform,
    /// Extreme dynamic range or clipped negative weights.
    IllConditioned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaperWindow {
    pub weights: Vec<f64>,
    pub sidelobe_level_db: f64,
    pub condition: TaperCondition,
}

impl TaperWindow {
    /// Linear sidelobe level the design aims for, 10^(-R/20).
    pub fn reference_level(&self) -> f64 {
        10f64.powf(-self.sidelobe_level_db / 20.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.condition != TaperCondition::Nominal
    }
}

/// Builds `n` Dolph-Chebyshev weights with sidelobes `sidelobe_db` below the main lobe.
pub fn chebyshev_weights(n: usize, sidelobe_db: f64) -> PatternResult<TaperWindow> {
    if n < 2 {
        return Err(PatternError::InvalidParameter(format!(
            "taper needs at least 2 elements, got {}",
            n
        )));
    }
    if !sidelobe_db.is_finite() || sidelobe_db <= 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "sidelobe suppression must be a positive number of dB, got {}",
            sidelobe_db
        )));
    }

    let order = (n - 1) as f64;
    let ripple = 10f64.powf(sidelobe_db / 20.0);
    let x0 = (ripple.acosh() / order).cosh();
    let len = n as f64;

    let spectrum: Vec<Complex64> = (0..n)
        .map(|k| {
            let value = chebyshev_poly(n - 1, x0 * (PI * k as f64 / len).cos());
            if n % 2 == 0 {
                // half-sample shift keeps the even-length window centred
                Complex64::from_polar(value, PI * k as f64 / len)
            } else {
                Complex64::new(value, 0.0)
            }
        })
        .collect();

    let mut fft = FftHelper::new(n);
    let real: Vec<f64> = fft.forward(&spectrum).iter().map(|c| c.re).collect();

    let mut weights: Vec<f64> = Vec::with_capacity(n);
    if n % 2 == 1 {
        let half = (n + 1) / 2;
        weights.extend(real[1..half].iter().rev());
        weights.extend(&real[..half]);
    } else {
        let half = n / 2 + 1;
        weights.extend(real[1..half].iter().rev());
        weights.extend(&real[1..half]);
    }

    if weights.iter().any(|w| !w.is_finite()) {
        return Err(PatternError::NumericDegeneracy(format!(
            "Chebyshev taper for N={} at {} dB produced non-finite weights",
            n, sidelobe_db
        )));
    }

    let peak = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if peak <= 0.0 {
        return Err(PatternError::NumericDegeneracy(format!(
            "Chebyshev taper for N={} at {} dB has no positive weight",
            n, sidelobe_db
        )));
    }

    let mut clipped = 0.0_f64;
    for w in weights.iter_mut() {
        *w /= peak;
        if *w < 0.0 {
            clipped = clipped.max(-*w);
            *w = 0.0;
        }
    }

    let smallest = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let condition = if clipped > NEGATIVE_TOLERANCE || smallest < MIN_WEIGHT_RATIO {
        TaperCondition::IllConditioned
    } else if smallest > NEAR_UNIFORM_RATIO {
        TaperCondition::NearUniform
    } else {
        TaperCondition::Nominal
    };

    if condition != TaperCondition::Nominal {
        warn!(
            "Chebyshev taper N={} R={} dB is {:?} (smallest weight {:.2e})",
            n, sidelobe_db, condition, smallest
        );
    }

    Ok(TaperWindow {
        weights,
        sidelobe_level_db: sidelobe_db,
        condition,
    })
}

/// Evaluate the Chebyshev polynomial of the first kind T_n(x).
fn chebyshev_poly(n: usize, x: f64) -> f64 {
    let order = n as f64;
    if x.abs() <= 1.0 {
        (order * x.acos()).cos()
    } else if x > 1.0 {
        (order * x.acosh()).cosh()
    } else {
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        sign * (order * (-x).acosh()).cosh()
    }
}

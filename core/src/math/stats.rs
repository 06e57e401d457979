use crate::prelude::{PatternError, PatternResult};

/// Magnitudes at or below this are treated as zero.
pub const ENERGY_EPSILON: f64 = 1e-12;

pub struct StatsHelper;

impl StatsHelper {
    /// `samples` evenly spaced points from `start` to `end`, both inclusive.
    pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
        match samples {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (samples - 1) as f64;
                (0..samples)
                    .map(|i| {
                        if i == samples - 1 {
                            end
                        } else {
                            start + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }

    /// Index and value of the first maximum.
    pub fn peak(values: &[f64]) -> Option<(usize, f64)> {
        values
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (idx, value)| match best {
                Some((_, top)) if top >= value => best,
                _ => Some((idx, value)),
            })
    }

    /// Divides every value by the sampled maximum and returns that maximum.
    pub fn normalize_to_peak<'a, I>(values: I) -> PatternResult<f64>
    where
        I: IntoIterator<Item = &'a mut f64>,
    {
        let mut values: Vec<&mut f64> = values.into_iter().collect();
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PatternError::NumericDegeneracy(
                "non-finite magnitude in pattern".into(),
            ));
        }
        let peak = values.iter().map(|v| **v).fold(0.0_f64, f64::max);
        if peak <= ENERGY_EPSILON {
            return Err(PatternError::NumericDegeneracy(
                "pattern carries no energy to normalize".into(),
            ));
        }
        for value in values.iter_mut() {
            **value /= peak;
        }
        Ok(peak)
    }
}

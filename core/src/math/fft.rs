use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch, size }
    }

    /// Forward transform; input is zero-padded or truncated to the planned size.
    pub fn forward(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input.iter().take(self.size).copied().collect();
        buffer.resize(self.size, Complex64::zero());

        self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }
}

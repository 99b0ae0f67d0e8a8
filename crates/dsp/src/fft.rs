//! Forward Fourier transforms, backed by `rustfft`.
//!
//! Transforms are unnormalized: `X[k] = sum(x[n] * e^(-2 pi i k n / len))`.  This is `rustfft`'s convention, and both
//! halves of the pipeline (building datasets offline, filtering in real time) agree on it.
//!
//! Planning allocates; running a planned [ForwardTransform] does not.
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};

use crate::complex::Complex;

/// A planned forward transform of a fixed length, with preallocated scratch space.
pub struct ForwardTransform {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl ForwardTransform {
    /// Plan a transform of length `len` with a throwaway planner.
    ///
    /// # Panics
    ///
    /// If `len` is 0.
    pub fn new(len: usize) -> Self {
        Self::with_planner(&mut FftPlanner::new(), len)
    }

    /// Plan a transform of length `len`, sharing `planner`'s cache.
    ///
    /// The offline pipeline transforms many responses of the same few lengths, so it keeps one planner around.
    pub fn with_planner(planner: &mut FftPlanner<f32>, len: usize) -> Self {
        assert!(len > 0, "Transforms must have a nonzero length");

        let fft = planner.plan_fft_forward(len);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self { fft, scratch }
    }

    pub fn len(&self) -> usize {
        self.fft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Panics
    ///
    /// If `buffer` isn't exactly [Self::len] long.
    pub fn forward_in_place(&mut self, buffer: &mut [Complex<f32>]) {
        assert_eq!(buffer.len(), self.len());
        self.fft.process_with_scratch(buffer, &mut self.scratch[..]);
    }

    /// Transform real-valued `input` into `output`.
    ///
    /// # Panics
    ///
    /// If either slice isn't exactly [Self::len] long.
    pub fn forward_real(&mut self, input: &[f32], output: &mut [Complex<f32>]) {
        assert_eq!(input.len(), self.len());
        assert_eq!(output.len(), self.len());

        for (o, i) in output.iter_mut().zip(input.iter().copied()) {
            *o = Complex::new(i, 0.0);
        }

        self.forward_in_place(output);
    }
}

/// Apply `mapper` to every bin of `spectrum`, in place.
///
/// The closure receives the bin, its index, and the total number of bins.
#[inline]
pub fn map_bins(
    spectrum: &mut [Complex<f32>],
    mut mapper: impl FnMut(Complex<f32>, usize, usize) -> Complex<f32>,
) {
    let total = spectrum.len();
    for (index, bin) in spectrum.iter_mut().enumerate() {
        *bin = mapper(*bin, index, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::close_floats::close_floats32;

    #[test]
    fn test_impulse_is_flat() {
        let mut transform = ForwardTransform::new(8);
        let mut input = [0.0f32; 8];
        input[0] = 1.0;
        let mut output = [Complex::new(0.0f32, 0.0); 8];
        transform.forward_real(&input, &mut output);

        for bin in output {
            close_floats32(bin.re, 1.0, 1e-6);
            close_floats32(bin.im, 0.0, 1e-6);
        }
    }

    #[test]
    fn test_dc_is_unnormalized() {
        let mut transform = ForwardTransform::new(16);
        let input = [0.5f32; 16];
        let mut output = [Complex::new(0.0f32, 0.0); 16];
        transform.forward_real(&input, &mut output);

        close_floats32(output[0].re, 8.0, 1e-5);
        for bin in &output[1..] {
            close_floats32(bin.re, 0.0, 1e-5);
            close_floats32(bin.im, 0.0, 1e-5);
        }
    }

    #[test]
    fn test_shifted_impulse_alternates() {
        // An impulse halfway through the window rotates every bin by pi times its index.
        let mut transform = ForwardTransform::new(8);
        let mut input = [0.0f32; 8];
        input[4] = 1.0;
        let mut output = [Complex::new(0.0f32, 0.0); 8];
        transform.forward_real(&input, &mut output);

        for (k, bin) in output.iter().enumerate() {
            let expected = if k % 2 == 0 { 1.0 } else { -1.0 };
            close_floats32(bin.re, expected, 1e-5);
            close_floats32(bin.im, 0.0, 1e-5);
        }
    }

    #[test]
    fn test_non_power_of_two() {
        let mut transform = ForwardTransform::new(12);
        assert_eq!(transform.len(), 12);
        let input = [1.0f32; 12];
        let mut output = [Complex::new(0.0f32, 0.0); 12];
        transform.forward_real(&input, &mut output);
        close_floats32(output[0].re, 12.0, 1e-4);
    }

    #[test]
    fn test_map_bins() {
        let mut spectrum = vec![Complex::new(1.0f32, 1.0); 4];
        map_bins(&mut spectrum, |bin, index, total| {
            assert_eq!(total, 4);
            bin * (index as f32)
        });
        assert_eq!(
            spectrum,
            vec![
                Complex::new(0.0, 0.0),
                Complex::new(1.0, 1.0),
                Complex::new(2.0, 2.0),
                Complex::new(3.0, 3.0)
            ]
        );
    }

    /// An impulse at `position` should come out as `e^{-2 pi i k position / len}` in bin `k`.
    fn check_delayed_impulse(len: usize, position: usize) {
        let mut transform = ForwardTransform::new(len);
        let mut input = vec![0.0f32; len];
        input[position] = 1.0;
        let mut output = vec![Complex::new(0.0f32, 0.0); len];
        transform.forward_real(&input, &mut output);

        for (k, bin) in output.iter().enumerate() {
            let angle = -2.0 * std::f64::consts::PI * (k * position) as f64 / len as f64;
            close_floats32(bin.re, angle.cos() as f32, 1e-4);
            close_floats32(bin.im, angle.sin() as f32, 1e-4);
        }
    }

    macro_rules! delayed_impulse_test {
        ($len: expr, $position: expr) => {
            paste::paste! {
                #[test]
                fn [<delayed_impulse _ $len _ $position>]() {
                    check_delayed_impulse($len, $position);
                }
            }
        };
    }

    delayed_impulse_test!(8, 1);
    delayed_impulse_test!(8, 7);
    delayed_impulse_test!(128, 3);
    delayed_impulse_test!(128, 64);
    // Odd sizes go through a different rustfft algorithm.
    delayed_impulse_test!(15, 4);
    delayed_impulse_test!(1000, 999);

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let mut transform = ForwardTransform::new(8);
        let mut buffer = vec![Complex::new(0.0f32, 0.0); 4];
        transform.forward_in_place(&mut buffer);
    }
}

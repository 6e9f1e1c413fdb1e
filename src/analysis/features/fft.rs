// FFT module - Fast Fourier Transform computation
//
// This module handles FFT computation with Hann windowing to reduce
// spectral leakage. The magnitude spectrum is consumed by the spectral
// centroid, pitch track, and MFCC computations.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT processor that computes magnitude spectra from analysis frames
pub struct FftProcessor {
    fft: Arc<dyn Fft<f32>>,
    frame_size: usize,
    /// Hann window (pre-computed)
    window: Vec<f32>,
}

impl FftProcessor {
    /// Create a new FFT processor
    ///
    /// # Arguments
    /// * `frame_size` - Analysis frame size; also the FFT size
    pub fn new(frame_size: usize) -> Self {
        // Pre-compute Hann window to reduce spectral leakage
        let window = (0..frame_size)
            .map(|i| {
                0.5 * (1.0
                    - ((2.0 * std::f32::consts::PI * i as f32) / (frame_size as f32 - 1.0)).cos())
            })
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(frame_size);

        Self {
            fft,
            frame_size,
            window,
        }
    }

    /// Number of positive-frequency bins produced per frame
    pub fn spectrum_len(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Compute the magnitude spectrum of one analysis frame
    ///
    /// Applies Hann windowing, zero-pads short frames to the FFT size,
    /// performs the FFT, and returns magnitudes of the positive
    /// frequencies only (exploiting symmetry of real-valued input).
    ///
    /// # Arguments
    /// * `frame` - Time-domain frame (length <= frame_size)
    ///
    /// # Returns
    /// Magnitude spectrum of size `frame_size / 2 + 1`
    pub fn magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .take(self.frame_size)
            .zip(self.window.iter())
            .map(|(&sample, &w)| Complex::new(sample * w, 0.0))
            .collect();

        // Zero-pad short frames up to the FFT size
        buffer.resize(self.frame_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer[..self.spectrum_len()].iter().map(|c| c.norm()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_length() {
        let fft = FftProcessor::new(1024);
        let spectrum = fft.magnitude_spectrum(&[0.0; 1024]);
        assert_eq!(spectrum.len(), 513);
    }

    #[test]
    fn test_sine_peak_lands_in_expected_bin() {
        let frame_size = 2048;
        let sample_rate = 44100.0f32;
        let freq = 441.0f32;
        let fft = FftProcessor::new(frame_size);

        let frame: Vec<f32> = (0..frame_size)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect();
        let spectrum = fft.magnitude_spectrum(&frame);

        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        let bin_width = sample_rate / frame_size as f32;
        let peak_freq = peak_bin as f32 * bin_width;
        assert!(
            (peak_freq - freq).abs() < 2.0 * bin_width,
            "Expected peak near {} Hz, got {} Hz",
            freq,
            peak_freq
        );
    }

    #[test]
    fn test_short_frame_is_zero_padded() {
        let fft = FftProcessor::new(1024);
        let spectrum = fft.magnitude_spectrum(&[0.5, -0.5, 0.5, -0.5]);
        assert_eq!(spectrum.len(), 513);
        assert!(spectrum.iter().all(|m| m.is_finite()));
    }
}

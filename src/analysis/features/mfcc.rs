// MFCC module - Mel-frequency cepstral coefficients
//
// This module computes a compact spectral-envelope descriptor: magnitude
// spectra are pooled through a triangular mel filterbank (HTK mel scale),
// log-compressed, and decorrelated with an orthonormal DCT-II. The
// per-frame coefficients are averaged over time and the first three are
// reported as the secondary feature output.
//
// The MFCC summary is a sibling of the primary feature vector; it never
// enters the emotion scoring rules.

use crate::config::MfccConfig;

/// Floor applied before the log to avoid log(0) on silent bands
const LOG_FLOOR: f32 = 1e-10;

/// Mel cepstral coefficient processor
pub struct MfccProcessor {
    frame_size: usize,
    mel_bands: usize,
    coefficients: usize,
}

impl MfccProcessor {
    pub fn new(frame_size: usize, config: &MfccConfig) -> Self {
        Self {
            frame_size,
            mel_bands: config.mel_bands,
            coefficients: config.coefficients,
        }
    }

    /// Mean cepstral coefficients over a sequence of magnitude spectra
    ///
    /// # Arguments
    /// * `spectra` - One magnitude spectrum per analysis frame
    /// * `sample_rate` - Sample rate in Hz (fixes the mel band edges)
    ///
    /// # Returns
    /// `coefficients` values averaged over all frames
    pub fn mean_coefficients(&self, spectra: &[Vec<f32>], sample_rate: u32) -> Vec<f32> {
        let filterbank = self.mel_filterbank(sample_rate);
        let mut sums = vec![0.0f32; self.coefficients];

        for spectrum in spectra {
            let log_energies = self.log_mel_energies(spectrum, &filterbank);
            let cepstrum = Self::dct_ii(&log_energies, self.coefficients);
            for (sum, c) in sums.iter_mut().zip(cepstrum.iter()) {
                *sum += c;
            }
        }

        let n = spectra.len().max(1) as f32;
        sums.iter_mut().for_each(|s| *s /= n);
        sums
    }

    /// Pool one magnitude spectrum into log mel band energies
    fn log_mel_energies(&self, spectrum: &[f32], filterbank: &[Vec<f32>]) -> Vec<f32> {
        filterbank
            .iter()
            .map(|filter| {
                let energy: f32 = filter
                    .iter()
                    .zip(spectrum.iter())
                    .map(|(&f, &mag)| f * mag * mag)
                    .sum();
                energy.max(LOG_FLOOR).ln()
            })
            .collect()
    }

    /// Create the triangular mel filterbank matrix (mel_bands x n_freqs)
    fn mel_filterbank(&self, sample_rate: u32) -> Vec<Vec<f32>> {
        let n_freqs = self.frame_size / 2 + 1;
        let mut filters = vec![vec![0.0f32; n_freqs]; self.mel_bands];

        let mel_min = Self::hz_to_mel(0.0);
        let mel_max = Self::hz_to_mel(sample_rate as f32 / 2.0);

        // mel_bands + 2 points define the triangular filter edges
        let bin_points: Vec<usize> = (0..=self.mel_bands + 1)
            .map(|i| {
                let mel = mel_min + i as f32 * (mel_max - mel_min) / (self.mel_bands + 1) as f32;
                let hz = Self::mel_to_hz(mel);
                ((self.frame_size as f32 + 1.0) * hz / sample_rate as f32).floor() as usize
            })
            .collect();

        for (i, filter) in filters.iter_mut().enumerate() {
            let start = bin_points[i];
            let center = bin_points[i + 1];
            let end = bin_points[i + 2];

            for k in start..center {
                if k < n_freqs && center > start {
                    filter[k] = (k - start) as f32 / (center - start) as f32;
                }
            }
            for k in center..end {
                if k < n_freqs && end > center {
                    filter[k] = (end - k) as f32 / (end - center) as f32;
                }
            }
        }

        filters
    }

    /// Orthonormal DCT-II of the log mel energies, truncated to `n_out`
    fn dct_ii(input: &[f32], n_out: usize) -> Vec<f32> {
        let m = input.len();
        if m == 0 {
            return vec![0.0; n_out];
        }

        let scale0 = (1.0 / m as f32).sqrt();
        let scale = (2.0 / m as f32).sqrt();

        (0..n_out)
            .map(|k| {
                let sum: f32 = input
                    .iter()
                    .enumerate()
                    .map(|(n, &x)| {
                        x * (std::f32::consts::PI * k as f32 * (n as f32 + 0.5) / m as f32).cos()
                    })
                    .sum();
                if k == 0 {
                    sum * scale0
                } else {
                    sum * scale
                }
            })
            .collect()
    }

    /// Convert frequency in Hz to mel scale (HTK formula)
    fn hz_to_mel(hz: f32) -> f32 {
        2595.0 * (1.0 + hz / 700.0).log10()
    }

    /// Convert mel scale to frequency in Hz (HTK formula)
    fn mel_to_hz(mel: f32) -> f32 {
        700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
    }
}

// Spectral module - Frequency-domain feature extraction
//
// This module computes per-frame spectral features from magnitude spectra:
// the spectral centroid and the spectral-peak pitch candidates that feed
// the pitch-mean feature.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use crate::config::PitchConfig;

/// Magnitude sums below this are treated as a silent frame
const SILENCE_FLOOR: f32 = 1e-10;

/// Spectral feature computation functions
pub struct SpectralFeatures {
    frame_size: usize,
}

impl SpectralFeatures {
    /// Create a new spectral features processor
    ///
    /// # Arguments
    /// * `frame_size` - FFT size used to produce the spectra
    pub fn new(frame_size: usize) -> Self {
        Self { frame_size }
    }

    fn bin_width(&self, sample_rate: u32) -> f32 {
        sample_rate as f32 / self.frame_size as f32
    }

    /// Compute spectral centroid (weighted mean frequency) of one frame
    ///
    /// Formula: centroid = Σ(f_i × |X[i]|) / Σ|X[i]|
    ///
    /// The spectral centroid represents the "center of mass" of the
    /// spectrum, and is a measure of the brightness of a sound. Silent
    /// frames contribute 0.
    ///
    /// # Returns
    /// Spectral centroid in Hz
    pub fn centroid(&self, spectrum: &[f32], sample_rate: u32) -> f32 {
        let bin_width = self.bin_width(sample_rate);

        let weighted_sum: f32 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| i as f32 * bin_width * mag)
            .sum();

        let magnitude_sum: f32 = spectrum.iter().sum();

        if magnitude_sum > SILENCE_FLOOR {
            weighted_sum / magnitude_sum
        } else {
            0.0
        }
    }

    /// Collect voiced pitch candidates from one frame's magnitude spectrum
    ///
    /// A candidate is a local spectral maximum inside the configured pitch
    /// band whose magnitude reaches `peak_threshold` of the frame's peak.
    /// Candidate frequencies are refined by parabolic interpolation over
    /// the three bins around the maximum. Silent frames produce no
    /// candidates, which is how unvoiced audio is excluded from the
    /// pitch mean.
    pub fn pitch_candidates(
        &self,
        spectrum: &[f32],
        sample_rate: u32,
        config: &PitchConfig,
        out: &mut Vec<f32>,
    ) {
        let peak = spectrum.iter().fold(0.0f32, |acc, &m| acc.max(m));
        if peak <= SILENCE_FLOOR {
            return;
        }

        let bin_width = self.bin_width(sample_rate);
        let threshold = config.peak_threshold * peak;

        for i in 1..spectrum.len().saturating_sub(1) {
            let mag = spectrum[i];
            if mag < threshold {
                continue;
            }
            if !(mag > spectrum[i - 1] && mag >= spectrum[i + 1]) {
                continue;
            }

            let freq = (i as f32 + Self::parabolic_shift(spectrum, i)) * bin_width;
            if freq >= config.min_hz && freq <= config.max_hz {
                out.push(freq);
            }
        }
    }

    /// Fractional bin offset of the true peak, from the parabola through
    /// the bin and its two neighbours. Degenerate (flat) neighbourhoods
    /// return 0.
    fn parabolic_shift(spectrum: &[f32], i: usize) -> f32 {
        let a = spectrum[i - 1];
        let b = spectrum[i];
        let c = spectrum[i + 1];
        let denom = a - 2.0 * b + c;
        if denom.abs() < SILENCE_FLOOR {
            0.0
        } else {
            0.5 * (a - c) / denom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::fft::FftProcessor;

    const FRAME: usize = 2048;
    const SAMPLE_RATE: u32 = 44100;

    fn sine_spectrum(frequency: f32) -> Vec<f32> {
        let fft = FftProcessor::new(FRAME);
        let frame: Vec<f32> = (0..FRAME)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect();
        fft.magnitude_spectrum(&frame)
    }

    #[test]
    fn test_centroid_tracks_tone_frequency() {
        let spectral = SpectralFeatures::new(FRAME);

        let low = spectral.centroid(&sine_spectrum(200.0), SAMPLE_RATE);
        let high = spectral.centroid(&sine_spectrum(5000.0), SAMPLE_RATE);

        assert!(low < 1000.0, "Expected low centroid for 200 Hz, got {}", low);
        assert!(
            high > 3000.0,
            "Expected high centroid for 5 kHz, got {}",
            high
        );
    }

    #[test]
    fn test_centroid_of_silence_is_zero() {
        let spectral = SpectralFeatures::new(FRAME);
        let spectrum = vec![0.0f32; FRAME / 2 + 1];
        assert_eq!(spectral.centroid(&spectrum, SAMPLE_RATE), 0.0);
    }

    #[test]
    fn test_pitch_candidate_near_fundamental() {
        let spectral = SpectralFeatures::new(FRAME);
        let config = PitchConfig::default();
        let mut candidates = Vec::new();

        spectral.pitch_candidates(&sine_spectrum(220.0), SAMPLE_RATE, &config, &mut candidates);

        assert!(!candidates.is_empty(), "Expected at least one candidate");
        let closest = candidates
            .iter()
            .cloned()
            .min_by(|a, b| {
                (a - 220.0).abs().partial_cmp(&(b - 220.0).abs()).unwrap()
            })
            .unwrap();
        assert!(
            (closest - 220.0).abs() < 15.0,
            "Expected candidate near 220 Hz, got {}",
            closest
        );
    }

    #[test]
    fn test_no_candidates_from_silence() {
        let spectral = SpectralFeatures::new(FRAME);
        let config = PitchConfig::default();
        let mut candidates = Vec::new();

        let spectrum = vec![0.0f32; FRAME / 2 + 1];
        spectral.pitch_candidates(&spectrum, SAMPLE_RATE, &config, &mut candidates);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_candidates_respect_pitch_band() {
        let spectral = SpectralFeatures::new(FRAME);
        let config = PitchConfig {
            min_hz: 50.0,
            max_hz: 300.0,
            peak_threshold: 0.1,
        };
        let mut candidates = Vec::new();

        // 5 kHz tone lies outside the band
        spectral.pitch_candidates(&sine_spectrum(5000.0), SAMPLE_RATE, &config, &mut candidates);
        assert!(
            candidates.is_empty(),
            "Expected no candidates outside 50-300 Hz, got {:?}",
            candidates
        );
    }
}

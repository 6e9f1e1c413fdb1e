// FeatureExtractor - acoustic feature extraction for emotion analysis
//
// This module turns a decoded mono signal into the fixed 5-element feature
// vector consumed by the emotion scorer, plus an optional MFCC summary.
//
// Module organization:
// - types: Data structures (AudioSignal, FeatureVector, ExtractedFeatures)
// - fft: FFT computation with windowing
// - spectral: Frequency-domain features (centroid, pitch candidates)
// - temporal: Time-domain features (frame RMS, ZCR)
// - mfcc: Mel cepstral coefficients (secondary output)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Features extracted, in fixed output order:
// 1. Energy: mean frame-wise RMS amplitude
// 2. Spectral Centroid: mean weighted mean frequency (brightness measure)
// 3. Zero-Crossing Rate: mean fraction of sign changes (noise measure)
// 4. Pitch Mean: mean of voiced pitch-track candidates
// 5. Energy Variance: standard deviation of the frame RMS series
//
// All frame-wise computations share one framing (frame + hop from the
// analysis config), so the same input and config always produce
// bit-identical output.

pub(crate) mod fft;
mod mfcc;
mod spectral;
mod temporal;
mod types;

pub use types::{
    AudioSignal, ExtractedFeatures, FeatureVector, MfccSummary, FEATURE_COUNT,
};

use crate::config::{AnalysisConfig, FramingConfig};
use crate::error::ExtractionError;
use fft::FftProcessor;
use mfcc::MfccProcessor;
use spectral::SpectralFeatures;
use temporal::TemporalFeatures;

/// Split a signal into fixed-size analysis frames at hop intervals
///
/// Signals shorter than one frame are analyzed as a single (short) frame,
/// so every non-empty signal yields at least one frame.
pub(crate) fn frame_slices(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<&[f32]> {
    if samples.len() < frame_size {
        return vec![samples];
    }
    (0..=samples.len() - frame_size)
        .step_by(hop_size)
        .map(|start| &samples[start..start + frame_size])
        .collect()
}

/// FeatureExtractor coordinates the acoustic feature extraction pipeline
///
/// Combines FFT processing, spectral and temporal feature extraction, and
/// MFCC computation behind a single interface. The extractor is pure and
/// holds no per-signal state; it can be reused across clips and shared
/// between threads.
pub struct FeatureExtractor {
    config: AnalysisConfig,
    fft_processor: FftProcessor,
    spectral_features: SpectralFeatures,
    temporal_features: TemporalFeatures,
    mfcc_processor: MfccProcessor,
}

impl FeatureExtractor {
    /// Create an extractor with the default analysis configuration
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create an extractor with an explicit configuration
    ///
    /// Framing values must be positive; a config with a zero frame or hop
    /// size (e.g. from a hand-edited JSON file) falls back to the default
    /// framing with a warning instead of poisoning the frame iteration.
    pub fn with_config(mut config: AnalysisConfig) -> Self {
        if config.framing.frame_size == 0 || config.framing.hop_size == 0 {
            log::warn!(
                "[Config] Invalid framing (frame_size={}, hop_size={}). Using defaults.",
                config.framing.frame_size,
                config.framing.hop_size
            );
            config.framing = FramingConfig::default();
        }

        let frame_size = config.framing.frame_size;
        let hop_size = config.framing.hop_size;

        Self {
            fft_processor: FftProcessor::new(frame_size),
            spectral_features: SpectralFeatures::new(frame_size),
            temporal_features: TemporalFeatures::new(frame_size, hop_size),
            mfcc_processor: MfccProcessor::new(frame_size, &config.mfcc),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Extract the primary 5-element feature vector from a signal
    ///
    /// # Errors
    /// `ExtractionError::NoVoicedPitch` if no voiced pitch candidate exists
    /// anywhere in the signal (an all-zero buffer fails here rather than
    /// producing a zero vector).
    pub fn extract(&self, signal: &AudioSignal) -> Result<FeatureVector, ExtractionError> {
        let spectra = self.frame_spectra(signal.samples());
        self.primary_features(signal, &spectra)
    }

    /// Extract the primary vector together with the MFCC summary
    pub fn extract_full(&self, signal: &AudioSignal) -> Result<ExtractedFeatures, ExtractionError> {
        let spectra = self.frame_spectra(signal.samples());
        let primary = self.primary_features(signal, &spectra)?;

        let coefficients = self
            .mfcc_processor
            .mean_coefficients(&spectra, signal.sample_rate());
        // Report the first 3 coefficients; a config with fewer pads with 0
        let mut summary = [0.0f32; 3];
        for (dst, src) in summary.iter_mut().zip(coefficients.iter()) {
            *dst = *src;
        }
        let mfcc = MfccSummary {
            coefficients: summary,
        };

        Ok(ExtractedFeatures { primary, mfcc })
    }

    fn frame_spectra(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        frame_slices(
            samples,
            self.config.framing.frame_size,
            self.config.framing.hop_size,
        )
        .iter()
        .map(|frame| self.fft_processor.magnitude_spectrum(frame))
        .collect()
    }

    fn primary_features(
        &self,
        signal: &AudioSignal,
        spectra: &[Vec<f32>],
    ) -> Result<FeatureVector, ExtractionError> {
        let samples = signal.samples();
        let sample_rate = signal.sample_rate();

        let energy = self.temporal_features.mean_rms(samples);
        let energy_variance = self.temporal_features.rms_spread(samples);
        let zero_crossing_rate = self.temporal_features.mean_zcr(samples);

        let centroid_sum: f32 = spectra
            .iter()
            .map(|s| self.spectral_features.centroid(s, sample_rate))
            .sum();
        let spectral_centroid = centroid_sum / spectra.len() as f32;

        let mut pitch_candidates = Vec::new();
        for spectrum in spectra {
            self.spectral_features.pitch_candidates(
                spectrum,
                sample_rate,
                &self.config.pitch,
                &mut pitch_candidates,
            );
        }
        if pitch_candidates.is_empty() {
            return Err(ExtractionError::NoVoicedPitch);
        }
        let pitch_mean = pitch_candidates.iter().sum::<f32>() / pitch_candidates.len() as f32;

        let features = FeatureVector {
            energy,
            spectral_centroid,
            zero_crossing_rate,
            pitch_mean,
            energy_variance,
        };

        log::debug!(
            "Extracted features: energy={:.6} centroid={:.1}Hz zcr={:.4} pitch={:.1}Hz energy_var={:.6}",
            features.energy,
            features.spectral_centroid,
            features.zero_crossing_rate,
            features.pitch_mean,
            features.energy_variance
        );

        Ok(features)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

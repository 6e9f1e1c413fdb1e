// Types module - Data structures for the feature extraction pipeline
//
// This module defines the core data structures flowing through feature
// extraction: the validated input signal, the primary 5-element feature
// vector consumed by the scorer, and the secondary MFCC summary.

use crate::error::{ExtractionError, ScoringError};
use serde::{Deserialize, Serialize};

/// A decoded mono audio signal
///
/// Construction through [`AudioSignal::new`] is the single validation point
/// for the signal invariants: a non-empty sample sequence and a positive
/// sample rate. Every downstream computation may rely on both.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Create a validated signal from decoded samples
    ///
    /// # Arguments
    /// * `samples` - Mono amplitude sequence
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// * `ExtractionError::EmptySignal` if `samples` is empty
    /// * `ExtractionError::InvalidSampleRate` if `sample_rate` is zero
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, ExtractionError> {
        if samples.is_empty() {
            return Err(ExtractionError::EmptySignal);
        }
        if sample_rate == 0 {
            return Err(ExtractionError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Signal duration in seconds
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Number of primary features consumed by the emotion scorer
pub const FEATURE_COUNT: usize = 5;

/// The primary acoustic feature vector
///
/// Fixed order: `[energy, spectral_centroid, zero_crossing_rate,
/// pitch_mean, energy_variance]`. Created once per analyzed clip and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Mean frame-wise RMS amplitude (dimensionless)
    pub energy: f32,
    /// Mean magnitude-weighted spectral centroid in Hz
    pub spectral_centroid: f32,
    /// Mean fraction of adjacent-sample sign changes per frame
    pub zero_crossing_rate: f32,
    /// Mean of voiced pitch-track candidates in Hz
    pub pitch_mean: f32,
    /// Standard deviation of the frame-wise RMS series (dimensionless)
    pub energy_variance: f32,
}

impl FeatureVector {
    /// Features in their fixed scoring order
    pub fn as_array(&self) -> [f32; FEATURE_COUNT] {
        [
            self.energy,
            self.spectral_centroid,
            self.zero_crossing_rate,
            self.pitch_mean,
            self.energy_variance,
        ]
    }

    /// Build a feature vector from an ordered slice
    ///
    /// # Errors
    /// `ScoringError::InvalidFeatureVector` if the slice does not contain
    /// exactly [`FEATURE_COUNT`] elements.
    pub fn from_slice(values: &[f32]) -> Result<Self, ScoringError> {
        if values.len() != FEATURE_COUNT {
            return Err(ScoringError::InvalidFeatureVector { len: values.len() });
        }
        Ok(Self {
            energy: values[0],
            spectral_centroid: values[1],
            zero_crossing_rate: values[2],
            pitch_mean: values[3],
            energy_variance: values[4],
        })
    }
}

/// Mean of the first three mel-frequency cepstral coefficients
///
/// Secondary spectral-envelope descriptor, returned alongside the primary
/// vector but never fed into the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MfccSummary {
    pub coefficients: [f32; 3],
}

/// Full extraction output: primary vector plus the MFCC sibling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFeatures {
    pub primary: FeatureVector,
    pub mfcc: MfccSummary,
}

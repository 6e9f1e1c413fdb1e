// Temporal module - Time-domain feature extraction
//
// This module computes features directly from time-domain audio signals:
// the frame-wise RMS energy series and the zero-crossing rate. The RMS
// series additionally feeds the energy-variance feature, which is the
// standard deviation of that series.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::frame_slices;

/// Temporal feature computation functions
pub struct TemporalFeatures {
    frame_size: usize,
    hop_size: usize,
}

impl TemporalFeatures {
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        Self {
            frame_size,
            hop_size,
        }
    }

    /// Compute the frame-wise RMS amplitude series
    ///
    /// Formula per frame: `rms = sqrt(mean(x[n]^2))`
    ///
    /// The series is the basis for both the mean energy feature and the
    /// energy-variance (RMS spread) feature.
    pub fn frame_rms(&self, samples: &[f32]) -> Vec<f32> {
        frame_slices(samples, self.frame_size, self.hop_size)
            .iter()
            .map(|frame| {
                let sum_sq: f32 = frame.iter().map(|&x| x * x).sum();
                (sum_sq / frame.len() as f32).sqrt()
            })
            .collect()
    }

    /// Mean of the frame-wise RMS series (the energy feature)
    pub fn mean_rms(&self, samples: &[f32]) -> f32 {
        let rms = self.frame_rms(samples);
        rms.iter().sum::<f32>() / rms.len() as f32
    }

    /// Population standard deviation of the frame-wise RMS series
    ///
    /// Named "energy variance" in the feature vector but computed as a
    /// dispersion measure on the RMS values.
    pub fn rms_spread(&self, samples: &[f32]) -> f32 {
        let rms = self.frame_rms(samples);
        let mean = rms.iter().sum::<f32>() / rms.len() as f32;
        let variance = rms.iter().map(|&v| (v - mean) * (v - mean)).sum::<f32>() / rms.len() as f32;
        variance.sqrt()
    }

    /// Compute the mean zero-crossing rate across frames
    ///
    /// Per frame: fraction of adjacent-sample pairs whose sign differs.
    /// High ZCR indicates high-frequency or noise-like content.
    pub fn mean_zcr(&self, samples: &[f32]) -> f32 {
        let frames = frame_slices(samples, self.frame_size, self.hop_size);
        let sum: f32 = frames.iter().map(|frame| Self::frame_zcr(frame)).sum();
        sum / frames.len() as f32
    }

    fn frame_zcr(frame: &[f32]) -> f32 {
        if frame.len() < 2 {
            return 0.0;
        }

        let mut crossings = 0;
        for i in 1..frame.len() {
            if (frame[i] >= 0.0 && frame[i - 1] < 0.0) || (frame[i] < 0.0 && frame[i - 1] >= 0.0) {
                crossings += 1;
            }
        }

        crossings as f32 / (frame.len() - 1) as f32
    }
}

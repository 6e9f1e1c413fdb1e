// Analysis module - feature extraction and emotion scoring pipeline
//
// This module orchestrates the two-stage inference pipeline:
//
//   AudioSignal -> FeatureExtractor -> FeatureVector -> EmotionScorer
//     -> AnalysisResult (dominant emotion, confidence, distribution)
//
// Both stages are pure, synchronous computations over immutable inputs;
// invocations are independent and may be parallelized across clips by
// the caller.

pub mod features;
pub mod scorer;

pub use features::{
    AudioSignal, ExtractedFeatures, FeatureExtractor, FeatureVector, MfccSummary,
};
pub use scorer::{AnalysisResult, Emotion, EmotionScores, EmotionScorer};

use crate::config::AnalysisConfig;
use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};

/// Full pipeline output: the extracted features and the scored result
///
/// Emitted by `analyze_full` so callers (dataset tooling, the CLI report)
/// can inspect the acoustic evidence behind a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub features: ExtractedFeatures,
    pub result: AnalysisResult,
}

/// EmotionAnalyzer composes the extractor and scorer into one pipeline
pub struct EmotionAnalyzer {
    extractor: FeatureExtractor,
    scorer: EmotionScorer,
}

impl EmotionAnalyzer {
    /// Create an analyzer with the default analysis configuration
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            extractor: FeatureExtractor::with_config(config),
            scorer: EmotionScorer::new(),
        }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Run the full pipeline on one clip
    ///
    /// # Errors
    /// Propagates `ExtractionError` from the extraction stage; the scoring
    /// stage cannot fail on an extracted vector.
    pub fn analyze(&self, signal: &AudioSignal) -> Result<AnalysisResult, ExtractionError> {
        let features = self.extractor.extract(signal)?;
        let result = self.scorer.score(&features);

        log::info!(
            "Analysis: dominant={} confidence={:.2}%",
            result.dominant_emotion,
            result.confidence
        );

        Ok(result)
    }

    /// Run the full pipeline and keep the extracted features (incl. MFCC)
    pub fn analyze_full(&self, signal: &AudioSignal) -> Result<AnalysisReport, ExtractionError> {
        let features = self.extractor.extract_full(signal)?;
        let result = self.scorer.score(&features.primary);

        log::info!(
            "Analysis: dominant={} confidence={:.2}%",
            result.dominant_emotion,
            result.confidence
        );

        Ok(AnalysisReport { features, result })
    }
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voiced_clip() -> AudioSignal {
        let sample_rate = 44100u32;
        let samples: Vec<f32> = (0..sample_rate as usize)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                let envelope = 0.5 + 0.3 * (2.0 * std::f32::consts::PI * 4.0 * t).sin();
                envelope * (2.0 * std::f32::consts::PI * 200.0 * t).sin()
            })
            .collect();
        AudioSignal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_analyze_produces_complete_distribution() {
        let analyzer = EmotionAnalyzer::new();
        let result = analyzer.analyze(&voiced_clip()).unwrap();

        assert!((result.distribution.total() - 100.0).abs() < 1e-3);
        assert!((0.0..=100.0).contains(&result.confidence));
        assert_eq!(
            result.confidence,
            result.distribution.get(result.dominant_emotion)
        );
    }

    #[test]
    fn test_analyze_full_matches_analyze() {
        let analyzer = EmotionAnalyzer::new();
        let clip = voiced_clip();

        let report = analyzer.analyze_full(&clip).unwrap();
        let result = analyzer.analyze(&clip).unwrap();
        assert_eq!(report.result, result);
    }

    #[test]
    fn test_analyze_silence_propagates_extraction_error() {
        let analyzer = EmotionAnalyzer::new();
        let silence = AudioSignal::new(vec![0.0; 44100], 44100).unwrap();

        let err = analyzer.analyze(&silence).unwrap_err();
        assert_eq!(err, ExtractionError::NoVoicedPitch);
    }
}

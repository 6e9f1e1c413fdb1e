// Voice Emotion Core - acoustic feature extraction and rule-based scoring
//
// Pipeline: mono waveform -> 5-element feature vector -> emotion
// distribution over {happy, sad, angry, neutral} with a confidence value.

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use analysis::{
    AnalysisReport, AnalysisResult, AudioSignal, Emotion, EmotionAnalyzer, EmotionScorer,
    EmotionScores, ExtractedFeatures, FeatureExtractor, FeatureVector, MfccSummary,
};
pub use config::AnalysisConfig;
pub use error::{ErrorCode, ExtractionError, ScoringError};

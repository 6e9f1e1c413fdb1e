//! Integration tests covering the full extraction-to-scoring pipeline
//!
//! These tests drive the library through its public API with synthetic
//! signals: a voiced speech proxy, low-effort murmur, silence, and noise.
//! Scoring-contract details live in the scorer unit tests; here the focus
//! is on the end-to-end data flow and error propagation.

use rand::{rngs::StdRng, Rng, SeedableRng};
use voice_emotion::{
    AnalysisConfig, AudioSignal, EmotionAnalyzer, EmotionScorer, ErrorCode, ExtractionError,
    FeatureExtractor,
};

const SAMPLE_RATE: u32 = 44100;

/// Loud, bright, strongly amplitude-modulated tone: an excited-speech proxy
fn excited_clip(duration_secs: f32) -> AudioSignal {
    let n = (duration_secs * SAMPLE_RATE as f32) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = 0.5 + 0.5 * (2.0 * std::f32::consts::PI * 6.0 * t).sin();
            let fundamental = (2.0 * std::f32::consts::PI * 320.0 * t).sin();
            let overtone = 0.5 * (2.0 * std::f32::consts::PI * 1600.0 * t).sin();
            0.45 * envelope * (fundamental + overtone)
        })
        .collect();
    AudioSignal::new(samples, SAMPLE_RATE).unwrap()
}

/// Quiet, flat, low-pitched tone: a subdued-speech proxy
fn subdued_clip(duration_secs: f32) -> AudioSignal {
    let n = (duration_secs * SAMPLE_RATE as f32) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            0.02 * (2.0 * std::f32::consts::PI * 110.0 * t).sin()
        })
        .collect();
    AudioSignal::new(samples, SAMPLE_RATE).unwrap()
}

#[test]
fn test_pipeline_produces_valid_distribution() {
    let analyzer = EmotionAnalyzer::new();
    let result = analyzer.analyze(&excited_clip(1.0)).unwrap();

    let d = &result.distribution;
    for pct in [d.happy, d.sad, d.angry, d.neutral] {
        assert!((0.0..=100.0).contains(&pct), "Percentage out of range: {}", pct);
    }
    assert!((d.total() - 100.0).abs() < 1e-3);
    assert_eq!(result.confidence, d.get(result.dominant_emotion));
}

#[test]
fn test_subdued_clip_leans_sad() {
    let analyzer = EmotionAnalyzer::new();
    let result = analyzer.analyze(&subdued_clip(1.0)).unwrap();

    // Low energy, low pitch, and low variation all feed the sad accumulator
    assert!(
        result.distribution.sad > result.distribution.angry,
        "Expected sad > angry for a quiet flat clip, got {:?}",
        result.distribution
    );
}

#[test]
fn test_silence_fails_extraction_not_scoring() {
    let analyzer = EmotionAnalyzer::new();
    let silence = AudioSignal::new(vec![0.0; SAMPLE_RATE as usize], SAMPLE_RATE).unwrap();

    let err = analyzer.analyze(&silence).unwrap_err();
    assert_eq!(err, ExtractionError::NoVoicedPitch);
    assert_eq!(err.code(), 1103);
}

#[test]
fn test_empty_signal_rejected_at_construction() {
    let err = AudioSignal::new(Vec::new(), SAMPLE_RATE).unwrap_err();
    assert_eq!(err, ExtractionError::EmptySignal);
    assert_eq!(err.code(), 1101);
}

#[test]
fn test_pipeline_is_deterministic() {
    let analyzer = EmotionAnalyzer::new();
    let clip = excited_clip(0.5);

    let first = analyzer.analyze_full(&clip).unwrap();
    let second = analyzer.analyze_full(&clip).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_noise_clip_survives_pipeline() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<f32> = (0..SAMPLE_RATE as usize)
        .map(|_| rng.gen_range(-0.3..0.3))
        .collect();
    let clip = AudioSignal::new(samples, SAMPLE_RATE).unwrap();

    let analyzer = EmotionAnalyzer::new();
    let result = analyzer.analyze(&clip).unwrap();
    assert!((result.distribution.total() - 100.0).abs() < 1e-3);
}

#[test]
fn test_extracted_features_feed_scorer_unchanged() {
    let extractor = FeatureExtractor::new();
    let scorer = EmotionScorer::new();
    let clip = excited_clip(1.0);

    let features = extractor.extract(&clip).unwrap();
    let direct = scorer.score(&features);
    let via_slice = scorer.score_slice(&features.as_array()).unwrap();
    assert_eq!(direct, via_slice);

    let analyzer = EmotionAnalyzer::new();
    assert_eq!(analyzer.analyze(&clip).unwrap(), direct);
}

#[test]
fn test_custom_framing_config() {
    let mut config = AnalysisConfig::default();
    config.framing.frame_size = 1024;
    config.framing.hop_size = 256;

    let analyzer = EmotionAnalyzer::with_config(config);
    let result = analyzer.analyze(&excited_clip(0.5)).unwrap();
    assert!((result.distribution.total() - 100.0).abs() < 1e-3);
}

#[test]
fn test_report_serializes_to_json() {
    let analyzer = EmotionAnalyzer::new();
    let report = analyzer.analyze_full(&excited_clip(0.5)).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("dominant_emotion"));
    assert!(json.contains("confidence"));
    assert!(json.contains("mfcc"));
}

// Scorer - rule-based emotion scoring from acoustic features
//
// This module implements the deterministic feature-to-emotion mapping:
// each primary feature is rescaled into [-1, +1] against a fixed
// typical-range table, weighted threshold rules accumulate evidence for
// each emotion category, and the accumulators are resolved into a
// percentage distribution with a confidence value.
//
// The range and weight tables are process-wide constants; they are never
// mutated at runtime and are safe for concurrent reads.

use crate::analysis::features::{FeatureVector, FEATURE_COUNT};
use crate::error::ScoringError;
use serde::{Deserialize, Serialize};

/// Threshold a scaled feature must exceed to count as "high"
const HIGH_THRESHOLD: f32 = 0.3;
/// Threshold a scaled feature must fall below to count as "low"
const LOW_THRESHOLD: f32 = -0.3;
/// Prior belief in neutral in the absence of strong signal
const NEUTRAL_BASELINE: f32 = 0.3;

/// Emotion categories recognized by the scorer
///
/// The declaration order is also the tie-break priority when two
/// accumulators are exactly equal: happy > sad > angry > neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Neutral,
}

impl Emotion {
    /// All categories in tie-break priority order
    pub const PRIORITY: [Emotion; 4] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category score map
///
/// Holds raw accumulators during scoring and percentages in the final
/// distribution. Created fresh per scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    pub happy: f32,
    pub sad: f32,
    pub angry: f32,
    pub neutral: f32,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f32 {
        match emotion {
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Neutral => self.neutral,
        }
    }

    fn add(&mut self, emotion: Emotion, weight: f32) {
        match emotion {
            Emotion::Happy => self.happy += weight,
            Emotion::Sad => self.sad += weight,
            Emotion::Angry => self.angry += weight,
            Emotion::Neutral => self.neutral += weight,
        }
    }

    pub fn total(&self) -> f32 {
        self.happy + self.sad + self.angry + self.neutral
    }

    /// Category with the maximum score; exact ties resolve to the
    /// earlier category in [`Emotion::PRIORITY`]
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::PRIORITY[0];
        for &emotion in &Emotion::PRIORITY[1..] {
            if self.get(emotion) > self.get(best) {
                best = emotion;
            }
        }
        best
    }
}

/// Typical per-feature bounds used only by the normalization step
#[derive(Debug, Clone, Copy)]
pub struct FeatureRange {
    pub min: f32,
    pub max: f32,
}

/// Typical ranges for the 5 primary features, in feature order:
/// energy, spectral centroid, zero-crossing rate, pitch mean,
/// energy variance
pub const FEATURE_RANGES: [FeatureRange; FEATURE_COUNT] = [
    FeatureRange { min: 0.0, max: 0.2 },
    FeatureRange {
        min: 500.0,
        max: 2500.0,
    },
    FeatureRange { min: 0.0, max: 0.3 },
    FeatureRange {
        min: 50.0,
        max: 400.0,
    },
    FeatureRange { min: 0.0, max: 0.1 },
];

/// Result of scoring one feature vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Category with the highest raw accumulator
    pub dominant_emotion: Emotion,
    /// The dominant category's percentage (0-100)
    pub confidence: f32,
    /// Per-category percentages; sums to 100 except in the degenerate
    /// zero-total case, where every entry is 0
    pub distribution: EmotionScores,
}

/// EmotionScorer maps a feature vector to an emotion distribution
///
/// Pure, synchronous, and stateless: every call scales the features,
/// runs the weighted rule table, and resolves the accumulators. It never
/// fails for well-formed numeric input; division-by-zero in normalization
/// and in percentage conversion both degrade to 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionScorer;

impl EmotionScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a typed feature vector (infallible)
    pub fn score(&self, features: &FeatureVector) -> AnalysisResult {
        let scaled = Self::scale_features(&features.as_array());
        let scores = Self::accumulate(&scaled);
        Self::resolve(&scores)
    }

    /// Score a raw ordered slice
    ///
    /// # Errors
    /// `ScoringError::InvalidFeatureVector` if the slice does not have
    /// exactly 5 elements.
    pub fn score_slice(&self, features: &[f32]) -> Result<AnalysisResult, ScoringError> {
        let vector = FeatureVector::from_slice(features)?;
        Ok(self.score(&vector))
    }

    /// Rescale each feature into [-1, +1] against its typical range
    ///
    /// `scaled = 2 * (value - min) / (max - min) - 1`. A degenerate range
    /// (max == min) scales to 0 instead of dividing by zero. Values are
    /// deliberately not clamped: out-of-range inputs produce magnitudes
    /// beyond +-1 and simply saturate the threshold rules.
    fn scale_features(raw: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut scaled = [0.0f32; FEATURE_COUNT];
        for (i, (&value, range)) in raw.iter().zip(FEATURE_RANGES.iter()).enumerate() {
            scaled[i] = Self::scale(value, range);
        }
        scaled
    }

    fn scale(value: f32, range: &FeatureRange) -> f32 {
        let span = range.max - range.min;
        if span == 0.0 {
            0.0
        } else {
            2.0 * (value - range.min) / span - 1.0
        }
    }

    /// Apply the weighted threshold rules to the completed scaled record
    ///
    /// The cross-feature conditions read the scaled energy sign, which is
    /// why all 5 scaled values are computed before any rule runs. The
    /// high branches are not mutually exclusive per feature; every low
    /// branch contributes to sad only.
    fn accumulate(scaled: &[f32; FEATURE_COUNT]) -> EmotionScores {
        let mut scores = EmotionScores::default();
        scores.add(Emotion::Neutral, NEUTRAL_BASELINE);

        let [energy, centroid, zcr, pitch, energy_var] = *scaled;

        if energy > HIGH_THRESHOLD {
            scores.add(Emotion::Happy, 0.8);
            scores.add(Emotion::Angry, 0.6);
        } else if energy < LOW_THRESHOLD {
            scores.add(Emotion::Sad, 0.8);
        }

        if centroid > HIGH_THRESHOLD {
            scores.add(Emotion::Happy, 0.7);
            if energy > 0.0 {
                scores.add(Emotion::Angry, 0.5);
            }
        } else if centroid < LOW_THRESHOLD {
            scores.add(Emotion::Sad, 0.7);
        }

        if zcr > HIGH_THRESHOLD {
            if energy > 0.0 {
                scores.add(Emotion::Angry, 0.7);
            } else {
                scores.add(Emotion::Happy, 0.6);
            }
        } else if zcr < LOW_THRESHOLD {
            scores.add(Emotion::Sad, 0.5);
        }

        if pitch > HIGH_THRESHOLD {
            scores.add(Emotion::Happy, 0.6);
            if energy > 0.0 {
                scores.add(Emotion::Angry, 0.5);
            }
        } else if pitch < LOW_THRESHOLD {
            scores.add(Emotion::Sad, 0.6);
        }

        if energy_var > HIGH_THRESHOLD {
            scores.add(Emotion::Angry, 0.6);
            scores.add(Emotion::Happy, 0.4);
        } else if energy_var < LOW_THRESHOLD {
            scores.add(Emotion::Sad, 0.5);
        }

        scores
    }

    /// Resolve raw accumulators into the final result
    ///
    /// Dominance is decided on the raw accumulators before percentage
    /// conversion. A zero total yields an all-zero distribution and zero
    /// confidence rather than dividing by zero.
    fn resolve(scores: &EmotionScores) -> AnalysisResult {
        let total = scores.total();
        let dominant = scores.dominant();

        let distribution = if total > 0.0 {
            EmotionScores {
                happy: 100.0 * scores.happy / total,
                sad: 100.0 * scores.sad / total,
                angry: 100.0 * scores.angry / total,
                neutral: 100.0 * scores.neutral / total,
            }
        } else {
            EmotionScores::default()
        };

        AnalysisResult {
            dominant_emotion: dominant,
            confidence: distribution.get(dominant),
            distribution,
        }
    }
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;

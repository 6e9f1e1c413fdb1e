// Error types for the voice emotion analysis pipeline
//
// This module defines custom error types for feature extraction and emotion
// scoring, providing structured error handling with numeric error codes for
// log correlation and programmatic handling by callers.

use log::error;
use std::fmt;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the pipeline boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

/// Log an extraction error with structured context
///
/// Logs extraction errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information
pub fn log_extraction_error(err: &ExtractionError, context: &str) {
    error!(
        "Extraction error in {}: code={}, component=FeatureExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Log a scoring error with structured context
pub fn log_scoring_error(err: &ScoringError, context: &str) {
    error!(
        "Scoring error in {}: code={}, component=EmotionScorer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Feature extraction errors
///
/// These errors cover malformed or degenerate audio input. Arithmetic edge
/// cases inside the scorer (zero-range normalization, zero-total resolution)
/// are not errors; they degrade to 0 instead.
///
/// Error code range: 1101-1103
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Signal contains no samples (RMS over an empty sequence is undefined)
    EmptySignal,

    /// Sample rate must be a positive number of Hz
    InvalidSampleRate { rate: u32 },

    /// No voiced pitch candidates were detected anywhere in the signal
    /// (mean over an empty selection is undefined)
    NoVoicedPitch,
}

impl ErrorCode for ExtractionError {
    fn code(&self) -> i32 {
        match self {
            ExtractionError::EmptySignal => 1101,
            ExtractionError::InvalidSampleRate { .. } => 1102,
            ExtractionError::NoVoicedPitch => 1103,
        }
    }

    fn message(&self) -> String {
        match self {
            ExtractionError::EmptySignal => {
                "Audio signal is empty; features are undefined".to_string()
            }
            ExtractionError::InvalidSampleRate { rate } => {
                format!("Sample rate must be greater than 0 Hz (got {})", rate)
            }
            ExtractionError::NoVoicedPitch => {
                "No voiced pitch detected in signal; pitch mean is undefined".to_string()
            }
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtractionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ExtractionError {}

/// Emotion scoring errors
///
/// The scorer never fails for well-formed numeric input; the only failure is
/// a feature slice that does not have exactly the expected length.
///
/// Error code range: 1201
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Feature slice did not contain exactly the expected number of elements
    InvalidFeatureVector { len: usize },
}

impl ErrorCode for ScoringError {
    fn code(&self) -> i32 {
        match self {
            ScoringError::InvalidFeatureVector { .. } => 1201,
        }
    }

    fn message(&self) -> String {
        match self {
            ScoringError::InvalidFeatureVector { len } => {
                format!("Feature vector must have exactly 5 elements (got {})", len)
            }
        }
    }
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScoringError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ScoringError {}

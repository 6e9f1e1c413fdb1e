//! Configuration management for analysis parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling fast iteration without recompilation. Framing, pitch-tracking,
//! and MFCC parameters can be adjusted via the config file for rapid
//! experimentation.
//!
//! The scorer's range and weight tables are deliberately not configurable;
//! they are process-wide constants (see `analysis::scorer`).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub framing: FramingConfig,
    pub pitch: PitchConfig,
    pub mfcc: MfccConfig,
}

/// Short-time framing parameters shared by all frame-wise features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Analysis frame size in samples (also the FFT size)
    pub frame_size: usize,
    /// Hop size between successive frames in samples
    pub hop_size: usize,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
        }
    }
}

/// Pitch-track estimation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Lowest admissible pitch candidate in Hz
    pub min_hz: f32,
    /// Highest admissible pitch candidate in Hz
    pub max_hz: f32,
    /// Spectral peaks below this fraction of the frame's peak magnitude
    /// are treated as unvoiced and excluded
    pub peak_threshold: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            min_hz: 50.0,
            max_hz: 2000.0,
            peak_threshold: 0.1,
        }
    }
}

/// Mel-frequency cepstral coefficient parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfccConfig {
    /// Number of triangular mel filter bands
    pub mel_bands: usize,
    /// Number of cepstral coefficients computed per frame
    pub coefficients: usize,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            mel_bands: 26,
            coefficients: 13,
        }
    }
}

impl Default for AnalysisConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            framing: FramingConfig::default(),
            pitch: PitchConfig::default(),
            mfcc: MfccConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or the defaults if the file is missing or
    /// the JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.framing.frame_size, 2048);
        assert_eq!(config.framing.hop_size, 512);
        assert_eq!(config.pitch.min_hz, 50.0);
        assert_eq!(config.pitch.max_hz, 2000.0);
        assert_eq!(config.mfcc.mel_bands, 26);
        assert_eq!(config.mfcc.coefficients, 13);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.framing.frame_size, config.framing.frame_size);
        assert_eq!(parsed.pitch.peak_threshold, config.pitch.peak_threshold);
        assert_eq!(parsed.mfcc.mel_bands, config.mfcc.mel_bands);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AnalysisConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.framing.frame_size, 2048);
    }
}

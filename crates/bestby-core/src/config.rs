//! Configuration structures for the scan pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ocr::OcrProfile;

/// Main configuration for the bestby pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BestbyConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Image preparation configuration.
    pub preprocess: PreprocessConfig,
}

impl Default for BestbyConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            preprocess: PreprocessConfig::default(),
        }
    }
}

/// External OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path to the OCR engine binary. Resolved through PATH when relative.
    pub command: PathBuf,

    /// Engine mode passed as `--oem`.
    pub engine_mode: u8,

    /// Page segmentation profiles to run, in order.
    pub profiles: Vec<OcrProfile>,

    /// Run an extra contrast-boosted pass after the configured profiles.
    pub contrast_pass: bool,

    /// Gain applied to pixel values for the contrast pass.
    pub contrast_gain: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("tesseract"),
            engine_mode: 3,
            profiles: OcrProfile::all().to_vec(),
            contrast_pass: true,
            contrast_gain: 1.6,
        }
    }
}

/// Image preparation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Gaussian blur sigma for denoising. Zero disables the blur.
    pub denoise_sigma: f32,

    /// Apply the 3x3 sharpen kernel after denoising.
    pub sharpen: bool,

    /// Window size for the local-mean adaptive threshold.
    pub threshold_block_size: u32,

    /// Offset subtracted from the local mean before comparison.
    pub threshold_offset: i32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            denoise_sigma: 1.0,
            sharpen: true,
            threshold_block_size: 21,
            threshold_offset: 9,
        }
    }
}

impl BestbyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: BestbyConfig = serde_json::from_str(r#"{"ocr": {"engine_mode": 1}}"#).unwrap();

        assert_eq!(config.ocr.engine_mode, 1);
        assert_eq!(config.ocr.command, PathBuf::from("tesseract"));
        assert_eq!(config.preprocess.threshold_block_size, 21);
    }

    #[test]
    fn test_round_trip() {
        let config = BestbyConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: BestbyConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.ocr.profiles, config.ocr.profiles);
        assert_eq!(back.preprocess.threshold_offset, config.preprocess.threshold_offset);
    }
}

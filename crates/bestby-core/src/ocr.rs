//! OCR orchestration over an external engine.
//!
//! Label prints are short, oddly oriented, and often sparse, so a single
//! segmentation mode misses text that another finds. The pipeline runs the
//! engine once per profile and concatenates whatever came back; the expiry
//! engine downstream treats repeated detections as ordinary duplicates.

use std::path::PathBuf;
use std::process::Command;

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::OcrConfig;
use crate::error::OcrError;
use crate::preprocess::boost_contrast;

/// Page segmentation profile for one OCR pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrProfile {
    /// Uniform block of text.
    Block,
    /// Single line of text.
    SingleLine,
    /// Single column of variable-height text.
    SingleColumn,
    /// Sparse text in no particular order.
    Sparse,
}

impl OcrProfile {
    /// All profiles in their default run order.
    pub fn all() -> [OcrProfile; 4] {
        [
            OcrProfile::Block,
            OcrProfile::SingleLine,
            OcrProfile::SingleColumn,
            OcrProfile::Sparse,
        ]
    }

    /// Page segmentation mode passed as `--psm`.
    pub fn psm(self) -> u32 {
        match self {
            OcrProfile::Block => 6,
            OcrProfile::SingleLine => 7,
            OcrProfile::SingleColumn => 4,
            OcrProfile::Sparse => 11,
        }
    }
}

/// Seam to the external OCR engine: prepared image in, raw text out.
pub trait TextRecognizer {
    /// Recognize text in a prepared image under one segmentation profile.
    fn recognize(&self, image: &GrayImage, profile: OcrProfile) -> Result<String, OcrError>;
}

/// Recognizer backed by the Tesseract command-line binary.
pub struct TesseractRecognizer {
    /// Engine binary, injected via configuration.
    command: PathBuf,
    /// OCR engine mode passed as `--oem`.
    engine_mode: u8,
}

impl TesseractRecognizer {
    /// Create a recognizer using `tesseract` from PATH.
    pub fn new() -> Self {
        Self {
            command: PathBuf::from("tesseract"),
            engine_mode: 3,
        }
    }

    /// Create a recognizer from configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            engine_mode: config.engine_mode,
        }
    }

    /// Set the engine binary path.
    pub fn with_command(mut self, command: impl Into<PathBuf>) -> Self {
        self.command = command.into();
        self
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage, profile: OcrProfile) -> Result<String, OcrError> {
        // Tesseract reads from a file, so stage the prepared image as a
        // temporary PNG that lives for the duration of the call.
        let staged = tempfile::Builder::new()
            .prefix("bestby-ocr")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Staging(e.to_string()))?;

        image
            .save(staged.path())
            .map_err(|e| OcrError::Staging(e.to_string()))?;

        let output = Command::new(&self.command)
            .arg(staged.path())
            .arg("stdout")
            .args(["--oem", &self.engine_mode.to_string()])
            .args(["--psm", &profile.psm().to_string()])
            .output()
            .map_err(|e| OcrError::Launch {
                command: self.command.display().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OcrError::Engine {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Runs a recognizer once per profile and concatenates the results.
pub struct MultiPassOcr<R> {
    recognizer: R,
    profiles: Vec<OcrProfile>,
    contrast_pass: bool,
    contrast_gain: f32,
}

impl<R: TextRecognizer> MultiPassOcr<R> {
    /// Create a multi-pass runner with the default profile set.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            profiles: OcrProfile::all().to_vec(),
            contrast_pass: true,
            contrast_gain: 1.6,
        }
    }

    /// Create a multi-pass runner from configuration.
    pub fn from_config(recognizer: R, config: &OcrConfig) -> Self {
        Self {
            recognizer,
            profiles: config.profiles.clone(),
            contrast_pass: config.contrast_pass,
            contrast_gain: config.contrast_gain,
        }
    }

    /// Set the profiles to run.
    pub fn with_profiles(mut self, profiles: Vec<OcrProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Enable or disable the contrast-boosted extra pass.
    pub fn with_contrast_pass(mut self, enabled: bool) -> Self {
        self.contrast_pass = enabled;
        self
    }

    /// Read text from a prepared image.
    ///
    /// One profile's failure never aborts the others; the combined blob may
    /// legitimately be empty when every pass fails or finds nothing.
    pub fn read_text(&self, image: &GrayImage) -> String {
        let mut passes = Vec::new();

        for profile in &self.profiles {
            match self.recognizer.recognize(image, *profile) {
                Ok(text) if !text.is_empty() => {
                    debug!("profile {:?} recognized {} characters", profile, text.len());
                    passes.push(text);
                }
                Ok(_) => debug!("profile {:?} found no text", profile),
                Err(e) => warn!("profile {:?} failed: {}", profile, e),
            }
        }

        if self.contrast_pass {
            let boosted = boost_contrast(image, self.contrast_gain);
            match self.recognizer.recognize(&boosted, OcrProfile::Block) {
                Ok(text) if !text.is_empty() => {
                    debug!("contrast pass recognized {} characters", text.len());
                    passes.push(text);
                }
                Ok(_) => debug!("contrast pass found no text"),
                Err(e) => warn!("contrast pass failed: {}", e),
            }
        }

        passes.join("\n")
    }
}

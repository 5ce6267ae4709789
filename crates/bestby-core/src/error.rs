//! Error types for the bestby-core library.

use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for the bestby library.
///
/// The disambiguation engine itself never fails (absence of a date is a
/// normal outcome); errors come from the collaborator layer around it.
#[derive(Error, Debug)]
pub enum BestbyError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding or encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the external OCR engine seam.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to stage the image for the external engine.
    #[error("failed to stage image for OCR: {0}")]
    Staging(String),

    /// The engine binary could not be launched at all.
    #[error("failed to launch OCR engine `{command}`: {message}")]
    Launch { command: String, message: String },

    /// The engine ran but exited with a failure status.
    #[error("OCR engine exited with {status}: {stderr}")]
    Engine { status: ExitStatus, stderr: String },
}

/// Result type for the bestby library.
pub type Result<T> = std::result::Result<T, BestbyError>;

//! Core library for reading expiry dates off product-label photographs.
//!
//! This crate provides:
//! - Label image preparation for OCR (grayscale, denoise, sharpen, threshold)
//! - Multi-pass OCR orchestration over an external engine
//! - The expiry disambiguation engine (line classification, date grammars,
//!   shelf-life arithmetic, candidate ranking)

pub mod config;
pub mod error;
pub mod expiry;
pub mod ocr;
pub mod preprocess;

pub use config::{BestbyConfig, OcrConfig, PreprocessConfig};
pub use error::{BestbyError, OcrError, Result};
pub use expiry::{DateCandidate, Detection, ExpiryEngine, Provenance, ScanReport};
pub use expiry::rules::lines::{Line, Role};
pub use expiry::rules::duration::{ShelfLife, ShelfUnit};
pub use ocr::{MultiPassOcr, OcrProfile, TesseractRecognizer, TextRecognizer};
pub use preprocess::ImagePreprocessor;

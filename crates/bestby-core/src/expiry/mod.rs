//! The expiry date disambiguation engine.
//!
//! Raw OCR text in, one best-guess expiry date (or a not-detected verdict)
//! out. Lines are classified by role, date-like tokens are repaired and
//! parsed under a fixed grammar order, shelf-life phrases are combined with
//! manufacturing dates, and the resulting candidate pool is ranked by
//! provenance.

mod engine;
pub mod rules;

pub use engine::{DateCandidate, Detection, ExpiryEngine, Provenance, ScanReport};

//! Candidate pool construction, ranking, and selection.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::rules::dates::find_all_dates;
use super::rules::duration::parse_shelf_life;
use super::rules::lines::{Role, classify_lines};

/// Output date format for detections and diagnostics.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Evidentiary category of a candidate date; breaks ties during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Found on a line carrying an explicit expiry label.
    Labelled,
    /// Derived from a manufacturing date plus a shelf-life phrase.
    BestBefore,
    /// Found anywhere in the text, with no supporting label.
    Fallback,
}

impl Provenance {
    /// Selection rank; lower is stronger evidence.
    fn rank(self) -> u8 {
        match self {
            Provenance::Labelled => 0,
            Provenance::BestBefore => 1,
            Provenance::Fallback => 2,
        }
    }
}

/// A candidate expiry date with its provenance and source evidence.
#[derive(Debug, Clone, Serialize)]
pub struct DateCandidate {
    pub provenance: Provenance,
    pub value: NaiveDate,
    pub evidence: String,
}

/// Engine verdict: one calendar date or the fixed not-detected sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Found(NaiveDate),
    NotDetected,
}

impl Detection {
    /// The sentinel rendered when no expiry date was detected.
    pub const NOT_DETECTED: &'static str = "NOT DETECTED";

    /// The detected date, if any.
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Detection::Found(date) => Some(date),
            Detection::NotDetected => None,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Found(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Detection::NotDetected => f.write_str(Self::NOT_DETECTED),
        }
    }
}

/// Full scan output: the verdict plus the candidate pool behind it.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub detection: Detection,
    pub candidates: Vec<DateCandidate>,
}

/// The date disambiguation engine.
///
/// Synchronous and side-effect-free: raw OCR text in, verdict out. The text
/// may be the concatenation of several OCR passes; repeated detections are
/// ordinary duplicates, not a special case.
#[derive(Debug, Default)]
pub struct ExpiryEngine;

impl ExpiryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Extract the single best-guess expiry date from raw OCR text.
    pub fn extract(&self, text: &str) -> Detection {
        self.scan(text).detection
    }

    /// Scan raw OCR text, returning the verdict and the candidate pool.
    pub fn scan(&self, text: &str) -> ScanReport {
        let lines = classify_lines(text);
        debug!("classified {} lines", lines.len());

        let mut candidates = Vec::new();
        let mut mfg_dates = Vec::new();
        let mut shelf_lives = Vec::new();

        for line in &lines {
            if line.has_role(Role::Mfg) {
                // A noisy line can yield several spurious matches; the
                // latest is taken as the manufacturing date.
                if let Some(latest) = find_all_dates(&line.text).into_iter().max() {
                    debug!("MFG line `{}` -> {}", line.text, latest.format(DATE_FORMAT));
                    mfg_dates.push(latest);
                }
            }

            if line.has_role(Role::ExpiryLabel) {
                for date in find_all_dates(&line.text) {
                    debug!("expiry line `{}` -> {}", line.text, date.format(DATE_FORMAT));
                    candidates.push(DateCandidate {
                        provenance: Provenance::Labelled,
                        value: date,
                        evidence: line.text.clone(),
                    });
                }
            }

            if let Some(life) = parse_shelf_life(&line.text) {
                debug!("shelf life `{}` -> {}", line.text, life);
                shelf_lives.push(life);
            }
        }

        for mfg in &mfg_dates {
            for life in &shelf_lives {
                if let Some(derived) = life.from_manufacture(*mfg) {
                    debug!(
                        "derived expiry: {} + {} -> {}",
                        mfg.format(DATE_FORMAT),
                        life,
                        derived.format(DATE_FORMAT)
                    );
                    candidates.push(DateCandidate {
                        provenance: Provenance::BestBefore,
                        value: derived,
                        evidence: format!("MFG {} + {}", mfg.format(DATE_FORMAT), life),
                    });
                }
            }
        }

        // Labels beat derived dates; within one provenance the earliest
        // date wins.
        if !candidates.is_empty() {
            candidates.sort_by_key(|c| (c.provenance.rank(), c.value));
            let best = candidates[0].value;
            return ScanReport {
                detection: Detection::Found(best),
                candidates,
            };
        }

        // Fallback pool: every date anywhere in the text.
        for line in &lines {
            for date in find_all_dates(&line.text) {
                candidates.push(DateCandidate {
                    provenance: Provenance::Fallback,
                    value: date,
                    evidence: line.text.clone(),
                });
            }
        }

        let Some(latest) = candidates.iter().map(|c| c.value).max() else {
            return ScanReport {
                detection: Detection::NotDetected,
                candidates,
            };
        };

        // A shelf-life phrase promises a computed expiry; when the only
        // dates on the label are manufacturing dates, a bare MFG date must
        // not pass as the answer.
        if !shelf_lives.is_empty() && candidates.iter().all(|c| mfg_dates.contains(&c.value)) {
            debug!("suppressing manufacturing-only fallback (shelf-life phrase present)");
            return ScanReport {
                detection: Detection::NotDetected,
                candidates,
            };
        }

        candidates.sort_by_key(|c| (c.provenance.rank(), c.value));
        ScanReport {
            detection: Detection::Found(latest),
            candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn extract(text: &str) -> Detection {
        ExpiryEngine::new().extract(text)
    }

    #[test]
    fn test_labelled_expiry_wins() {
        let text = "MFG 01-01-2024\nEXP 12/2025\nBest Before 6 months";
        assert_eq!(extract(text), Detection::Found(date(2025, 12, 31)));
    }

    #[test]
    fn test_labelled_candidates_carry_provenance() {
        let report = ExpiryEngine::new().scan("EXP 12/2025");

        assert_eq!(report.detection, Detection::Found(date(2025, 12, 31)));
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].provenance, Provenance::Labelled);
        assert_eq!(report.candidates[0].evidence, "EXP 12/2025");
    }

    #[test]
    fn test_earliest_label_wins_within_provenance() {
        let text = "EXP 01/2026\nUse by 15.08.2025";
        assert_eq!(extract(text), Detection::Found(date(2025, 8, 15)));
    }

    #[test]
    fn test_derived_from_mfg_and_shelf_life() {
        // 01-01-2023 + 180 flat days; the unlabelled later date is ignored
        // because a derived candidate exists.
        let text = "MFG 01-01-2023\nBest Before 6 months\n11/11/2030";
        assert_eq!(extract(text), Detection::Found(date(2023, 6, 30)));
    }

    #[test]
    fn test_derived_uses_flat_days_in_leap_years() {
        let text = "MFG 01-01-2024\nBest Before 6 months";
        assert_eq!(extract(text), Detection::Found(date(2024, 6, 29)));
    }

    #[test]
    fn test_mfg_line_takes_latest_date() {
        // The MFG line parses two dates; the later one is the packing date.
        let text = "PKD 15MAR24 01JAN20\nbest before 10 days";
        assert_eq!(extract(text), Detection::Found(date(2024, 3, 25)));
    }

    #[test]
    fn test_fallback_returns_latest_date() {
        let text = "lot 4411\n10/10/2024 batch 7\n01/01/2020";
        assert_eq!(extract(text), Detection::Found(date(2024, 10, 10)));
    }

    #[test]
    fn test_fallback_candidates_carry_provenance() {
        let report = ExpiryEngine::new().scan("10/10/2024");

        assert_eq!(report.detection, Detection::Found(date(2024, 10, 10)));
        assert_eq!(report.candidates[0].provenance, Provenance::Fallback);
    }

    #[test]
    fn test_shelf_life_without_usable_mfg_date_suppresses_nothing_found() {
        // The MFG line itself cannot be parsed, so nothing is derivable and
        // no other date exists: not detected rather than a guess.
        let text = "MFG date smudged\nBest before 90 days";
        assert_eq!(extract(text), Detection::NotDetected);
    }

    #[test]
    fn test_bare_mfg_date_suppressed_when_shelf_life_present() {
        // The shelf-life span overflows the calendar, so no derived
        // candidate exists; the manufacturing date alone must not be
        // reported as the expiry.
        let text = "MFG 01-01-2024\nBest before 999999999 years";
        assert_eq!(extract(text), Detection::NotDetected);
    }

    #[test]
    fn test_empty_and_noise_inputs() {
        assert_eq!(extract(""), Detection::NotDetected);
        assert_eq!(extract("\n\n\n"), Detection::NotDetected);
        assert_eq!(extract("pure noise without numbers"), Detection::NotDetected);
    }

    #[test]
    fn test_idempotent() {
        let text = "MFG 01-01-2023\nBest Before 6 months\nEXP 12/2025";
        let engine = ExpiryEngine::new();
        assert_eq!(engine.extract(text), engine.extract(text));
    }

    #[test]
    fn test_duplicate_ocr_passes_do_not_change_the_answer() {
        let single = "EXP 12/2025\nMFG 01-01-2024";
        let doubled = format!("{single}\n{single}");
        assert_eq!(extract(single), extract(&doubled));
    }

    #[test]
    fn test_detection_display() {
        assert_eq!(
            Detection::Found(date(2025, 12, 31)).to_string(),
            "31-12-2025"
        );
        assert_eq!(Detection::NotDetected.to_string(), "NOT DETECTED");
    }
}

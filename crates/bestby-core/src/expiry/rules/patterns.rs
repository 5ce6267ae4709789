//! Compiled patterns for label line classification and date extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Manufacturing/packing vocabulary, whole words only
    pub static ref MFG_LINE: Regex = Regex::new(
        r"(?i)\b(mfg|mfd|manufactur(?:ed|e)?|manuf|pkd|packed|pack\s*date|pkgd|packed\s*on)\b"
    ).unwrap();

    // Expiry vocabulary, including common OCR mangles of "exp"
    pub static ref EXPIRY_LINE: Regex = Regex::new(
        r"(?i)\b(e[xs][pfr]\b|e[xs][pfr]iry|expires?|valid\s*till|use\s*by|sell\s*by|best\s*before|bbe|b/b)\b"
    ).unwrap();

    // "best before N units"; tolerates an OCR zero inside "before" and
    // arbitrary non-digit noise before the count
    pub static ref BEST_BEFORE_DURATION: Regex = Regex::new(
        r"(?i)best\s*bef[o0]re[^0-9]*(\d+)\s*(days?|months?|years?|m|y)\b"
    ).unwrap();

    // Date grammars, tried in priority order by the parser
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./-](\d{1,2})[./-](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./-](\d{1,2})[./-](\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"\b(\d{1,2})\s*([A-Za-z]{3,9})\s*(\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_MONTH_YEAR: Regex = Regex::new(
        r"\b(\d{1,2})[./-](\d{4})\b"
    ).unwrap();

    pub static ref DATE_MONTH_NAME_YEAR: Regex = Regex::new(
        r"\b([A-Za-z]{3,9})\s*(\d{4})\b"
    ).unwrap();

    // Date-shaped substrings: alphanumeric runs and separated numeric runs
    pub static ref DATE_SHAPED: Regex = Regex::new(
        r"[A-Za-z0-9]{1,4}[A-Za-z]{0,9}[0-9]{0,4}|[0-9]{1,4}[/.\-][0-9A-Za-z]{1,9}[/.\-]?[0-9]{0,4}"
    ).unwrap();
}

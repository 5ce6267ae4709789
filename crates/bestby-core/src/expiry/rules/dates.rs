//! Date grammars and the per-line candidate extractor.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::normalize::normalize_date_token;
use super::patterns::{
    DATE_DAY_MONTH_NAME, DATE_DMY, DATE_MONTH_NAME_YEAR, DATE_MONTH_YEAR, DATE_SHAPED, DATE_YMD,
};

/// Month-name prefixes, matched case-insensitively.
const MONTH_PREFIXES: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// One date grammar tried against a normalized fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGrammar {
    /// `D[/.-]M[/.-]Y` with a 2- or 4-digit year.
    DayMonthYear,
    /// `Y[/.-]M[/.-]D` with a 4-digit year first.
    YearMonthDay,
    /// `D <month name> Y`, spacing optional.
    DayNamedMonthYear,
    /// `M[/.-]Y`, resolved to the last day of the month.
    MonthYear,
    /// `<month name> Y`, resolved to the last day of the month.
    NamedMonthYear,
}

impl DateGrammar {
    /// Grammars in priority order; the first valid calendar date wins.
    pub const PRIORITY: [DateGrammar; 5] = [
        DateGrammar::DayMonthYear,
        DateGrammar::YearMonthDay,
        DateGrammar::DayNamedMonthYear,
        DateGrammar::MonthYear,
        DateGrammar::NamedMonthYear,
    ];

    /// Match this grammar against a normalized token.
    ///
    /// A structural match that names an impossible calendar date yields
    /// `None`, exactly like no match at all.
    fn apply(self, token: &str) -> Option<NaiveDate> {
        match self {
            DateGrammar::DayMonthYear => {
                let caps = DATE_DMY.captures(token)?;
                let day: u32 = caps[1].parse().ok()?;
                let month: u32 = caps[2].parse().ok()?;
                let year = widen_year(caps[3].parse().ok()?);
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateGrammar::YearMonthDay => {
                let caps = DATE_YMD.captures(token)?;
                let year: i32 = caps[1].parse().ok()?;
                let month: u32 = caps[2].parse().ok()?;
                let day: u32 = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateGrammar::DayNamedMonthYear => {
                let caps = DATE_DAY_MONTH_NAME.captures(token)?;
                let day: u32 = caps[1].parse().ok()?;
                let month = month_from_name(&caps[2])?;
                let year = widen_year(caps[3].parse().ok()?);
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateGrammar::MonthYear => {
                let caps = DATE_MONTH_YEAR.captures(token)?;
                let month: u32 = caps[1].parse().ok()?;
                let year: i32 = caps[2].parse().ok()?;
                last_day_of_month(year, month)
            }
            DateGrammar::NamedMonthYear => {
                let caps = DATE_MONTH_NAME_YEAR.captures(token)?;
                let month = month_from_name(&caps[1])?;
                let year: i32 = caps[2].parse().ok()?;
                last_day_of_month(year, month)
            }
        }
    }
}

/// Parse a fragment into a calendar date, or nothing.
///
/// Normalization always runs first; grammars are tried in priority order
/// with early exit. Absence of a date is a normal outcome, never an error.
pub fn parse_date(fragment: &str) -> Option<NaiveDate> {
    let token = normalize_date_token(fragment);
    if token.trim().is_empty() {
        return None;
    }
    DateGrammar::PRIORITY
        .iter()
        .find_map(|grammar| grammar.apply(&token))
}

/// Extract every parseable date from a line, in order of appearance.
///
/// Date-shaped substrings are tried first, then the whole line as a
/// catch-all: labels and dates frequently sit adjacent with no clean
/// delimiter in OCR output. Identical surface text is parsed only once;
/// distinct surfaces may still contribute the same date value.
pub fn find_all_dates(line: &str) -> Vec<NaiveDate> {
    let mut parts: Vec<&str> = DATE_SHAPED.find_iter(line).map(|m| m.as_str()).collect();
    parts.push(line);

    let mut seen = HashSet::new();
    let mut dates = Vec::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() || !seen.insert(part) {
            continue;
        }
        if let Some(date) = parse_date(part) {
            dates.push(date);
        }
    }
    dates
}

/// Resolve a month name case-insensitively by prefix.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTH_PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(*prefix))
        .map(|(_, month)| *month)
}

/// Widen a two-digit year against the fixed pivot: below 50 lands in the
/// 2000s, the rest in the 1900s.
fn widen_year(year: i32) -> i32 {
    if year < 100 {
        if year < 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

/// Last calendar day of a month; an expiry month means the product is valid
/// through its end.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next.pred_opt()
}

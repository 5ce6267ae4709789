//! Best-before shelf-life phrases.

use std::fmt;

use chrono::NaiveDate;

use super::patterns::BEST_BEFORE_DURATION;

/// Unit of a declared shelf life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfUnit {
    Day,
    Month,
    Year,
}

/// Shelf life declared as "best before N units" from manufacture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfLife {
    pub count: u32,
    pub unit: ShelfUnit,
}

impl ShelfLife {
    /// Flat day count: months are 30 days and years 365, with no
    /// calendar-month arithmetic and no leap-year adjustment.
    pub fn days(&self) -> i64 {
        let per_unit = match self.unit {
            ShelfUnit::Day => 1,
            ShelfUnit::Month => 30,
            ShelfUnit::Year => 365,
        };
        i64::from(self.count) * per_unit
    }

    /// Expiry implied by this shelf life for a given manufacturing date.
    ///
    /// `None` when the span overflows the calendar.
    pub fn from_manufacture(&self, mfg: NaiveDate) -> Option<NaiveDate> {
        mfg.checked_add_signed(chrono::Duration::try_days(self.days())?)
    }
}

impl fmt::Display for ShelfLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            ShelfUnit::Day => "day",
            ShelfUnit::Month => "month",
            ShelfUnit::Year => "year",
        };
        if self.count == 1 {
            write!(f, "1 {unit}")
        } else {
            write!(f, "{} {}s", self.count, unit)
        }
    }
}

/// Detect a shelf-life phrase in a line.
///
/// Line-local and independent of role tags. The unit word is normalized by
/// its first letter; zero counts are rejected.
pub fn parse_shelf_life(line: &str) -> Option<ShelfLife> {
    let caps = BEST_BEFORE_DURATION.captures(line)?;
    let count: u32 = caps[1].parse().ok()?;
    if count == 0 {
        return None;
    }
    let unit = match caps[2].to_ascii_lowercase().chars().next() {
        Some('d') => ShelfUnit::Day,
        Some('m') => ShelfUnit::Month,
        _ => ShelfUnit::Year,
    };
    Some(ShelfLife { count, unit })
}

//! Calendar-date validation for submitted date components.
//!
//! Event dates arrive as three separate integer fields. Primitive coercion
//! of such triples does not guarantee a real calendar date, so acceptance is
//! gated on an explicit Gregorian check before anything reaches the store.

use chrono::NaiveDate;
use serde::Deserialize;

/// A year/month/day triple exactly as submitted, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateComponents {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, expected in `[1, 12]`.
    pub month: i32,
    /// Calendar day, expected within the month's length.
    pub day: i32,
}

impl DateComponents {
    /// Creates a triple from raw components.
    #[must_use]
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Resolves the triple into a calendar date, or `None` when it does not
    /// denote one.
    ///
    /// Month must be in `[1, 12]` and day within that month's length for the
    /// year, with February running to 29 only in leap years (divisible by 4
    /// and either not by 100 or by 400). Negative components never resolve.
    #[must_use]
    pub fn resolve(self) -> Option<NaiveDate> {
        if self.year < 0 {
            return None;
        }
        let month = u32::try_from(self.month).ok()?;
        let day = u32::try_from(self.day).ok()?;
        NaiveDate::from_ymd_opt(self.year, month, day)
    }

    /// Whether the triple denotes a real Gregorian calendar date.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.resolve().is_some()
    }
}

//! The time-slot catalog and its date anchoring.
//!
//! The catalog is the fixed universe of times-of-day an owner may allow for
//! an event. It carries no date component; anchoring binds it to a concrete
//! calendar date for presentation and selection.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

static HOURLY: LazyLock<SlotCatalog> = LazyLock::new(|| {
    SlotCatalog::new(
        (0..24).map(|hour| NaiveTime::from_hms_opt(hour, 0, 0).expect("hours 0..24 are valid")),
    )
});

/// Returns the process-wide catalog: one slot at the top of every hour.
///
/// Initialized once at process start, never mutated, and safe for
/// unsynchronized concurrent reads.
#[must_use]
pub fn possible_times() -> &'static SlotCatalog {
    &HOURLY
}

/// An ordered, immutable sequence of selectable times-of-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<NaiveTime>,
}

impl SlotCatalog {
    /// Creates a catalog from the given slots, preserving their order.
    #[must_use]
    pub fn new(slots: impl IntoIterator<Item = NaiveTime>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    /// The catalog entries, in presentation order.
    #[must_use]
    pub fn slots(&self) -> &[NaiveTime] {
        &self.slots
    }

    /// Whether `time` is a member of the catalog.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.slots.contains(&time)
    }

    /// Binds every catalog entry to `date`, producing full date-times that
    /// share `date`'s year/month/day and the entry's hour/minute.
    ///
    /// Pure and total: anchoring never revalidates the date, so any
    /// constructible `NaiveDate` anchors successfully.
    #[must_use]
    pub fn anchor_to(&self, date: NaiveDate) -> Vec<NaiveDateTime> {
        self.slots.iter().map(|time| date.and_time(*time)).collect()
    }

    /// Number of slots in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

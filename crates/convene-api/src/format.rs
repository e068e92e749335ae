//! Display-preference handling for rendered times.
//!
//! The hour format is an external, per-request preference. It only shapes
//! response rendering; the scheduling core never reads it.

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Clock format for displayed times. Defaults to the 12-hour clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum HourFormat {
    /// 12-hour clock with an AM/PM marker.
    #[default]
    #[serde(rename = "12")]
    Twelve,
    /// 24-hour clock.
    #[serde(rename = "24")]
    TwentyFour,
}

impl HourFormat {
    /// Renders an anchored time for display.
    #[must_use]
    pub fn render(self, at: NaiveDateTime) -> String {
        match self {
            Self::Twelve => at.format("%Y-%m-%d %I:%M %p").to_string(),
            Self::TwentyFour => at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Query parameters carrying display preferences.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DisplayPrefs {
    /// Requested clock format.
    #[serde(default)]
    pub hour_format: HourFormat,
}

//! Due-date based suppression of far-future tasks.

use chrono::{DateTime, Utc};

use crate::types::Item;

const SECONDS_PER_DAY: i64 = 86_400;

/// Hides tasks whose due date lies at or beyond a look-ahead window.
///
/// A hidden task never carries the tracking label and takes no part in the
/// propagation rules for the cycle. A window of zero (or less) disables
/// hiding entirely.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityFilter {
    window_days: i64,
}

impl VisibilityFilter {
    pub fn new(window_days: i64) -> Self {
        Self { window_days }
    }

    /// Whether `item` falls outside the look-ahead window as of `now`.
    ///
    /// The boundary is inclusive: due exactly `window_days` from now is
    /// already hidden. Tasks without a due date are always visible.
    pub fn is_hidden(&self, item: &Item, now: DateTime<Utc>) -> bool {
        if self.window_days <= 0 {
            return false;
        }
        let Some(due) = item.due_date_utc else {
            return false;
        };
        (due - now).num_seconds() >= self.window_days.saturating_mul(SECONDS_PER_DAY)
    }
}

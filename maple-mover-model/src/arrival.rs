//! Building arrival entries from predicted minute counts.

use crate::ArrivalEntry;
use itertools::Itertools;

/// The number of arrivals shown on a fixed-size card board.
pub const BOARD_SIZE: usize = 4;

/// The label of an empty slot on a fixed-size board.
pub const PLACEHOLDER_LABEL: &str = "-";

/// Formats a whole number of minutes for display.
///
/// Under an hour this is "`n` min"; otherwise hours are split out
/// ("1hr", "2hr", "1hr 5 min").
pub fn format_minutes(minutes: u32) -> String {
    match minutes {
        0..60 => format!("{minutes} min"),
        60 => "1hr".to_string(),
        _ => {
            let (hours, rest) = (minutes / 60, minutes % 60);
            if rest == 0 {
                format!("{hours}hr")
            } else {
                format!("{hours}hr {rest} min")
            }
        }
    }
}

/// Builds arrival entries from predicted minutes.
///
/// Fractional minutes are truncated,
/// anything that truncates to zero (or is negative or NaN) is dropped,
/// and repeated whole minutes are collapsed to their first occurrence.
/// Input order is kept, so callers should pass predictions soonest first.
/// At most `limit` entries are returned; the first one is primary.
pub fn arrivals_from_minutes<I>(minutes: I, limit: usize) -> Vec<ArrivalEntry>
where
    I: IntoIterator<Item = f64>,
{
    minutes
        .into_iter()
        .filter_map(whole_minutes)
        .unique()
        .take(limit)
        .enumerate()
        .map(|(index, minutes)| ArrivalEntry {
            label: format_minutes(minutes),
            is_primary: index == 0,
        })
        .collect()
}

/// Fills a board up to `slots` entries with non-primary placeholders.
///
/// Boards that are already full (or over-full) are returned unchanged.
pub fn pad_arrivals(mut entries: Vec<ArrivalEntry>, slots: usize) -> Vec<ArrivalEntry> {
    if entries.len() < slots {
        entries.resize_with(slots, ArrivalEntry::placeholder);
    }
    entries
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(minutes: f64) -> Option<u32> {
    // Range is checked first; the cast saturates beyond u32::MAX.
    (minutes.is_finite() && minutes >= 1.0).then(|| minutes.trunc() as u32)
}

//! How a route's arrivals are laid out on a card.

use maple_mover_model::ArrivalEntry;

/// The visual treatment of an arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Larger, bolder text on the tertiary container.
    Primary,
    /// Muted text.
    Plain,
}

impl Emphasis {
    pub fn class(self) -> &'static str {
        match self {
            Emphasis::Primary => "arrival arrival--primary",
            Emphasis::Plain => "arrival arrival--plain",
        }
    }
}

/// One arrival row on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRow {
    pub label: String,
    pub emphasis: Emphasis,
    /// Whether a separator follows this row.
    pub separated: bool,
}

/// Lays out arrivals in their given order.
///
/// Every row except the last is followed by a separator.
pub fn arrival_rows(entries: Vec<ArrivalEntry>) -> Vec<ArrivalRow> {
    let count = entries.len();
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ArrivalRow {
            label: entry.label,
            emphasis: if entry.is_primary {
                Emphasis::Primary
            } else {
                Emphasis::Plain
            },
            separated: index + 1 < count,
        })
        .collect()
}

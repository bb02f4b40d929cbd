#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};

pub mod arrival;
pub mod featured;
mod route_title;

pub use route_title::RouteTitle;

/// A single arrival shown on a route card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalEntry {
    /// Display text for the arrival (e.g. "2 min" or "in 13 mins").
    ///
    /// This is copy, not a structured duration.
    /// Use [`arrival::format_minutes`] to produce labels from minute counts.
    pub label: String,
    /// Marks the soonest arrival, which cards render with emphasis.
    ///
    /// Nothing enforces that at most one entry per route carries this flag.
    #[serde(default)]
    pub is_primary: bool,
}

impl ArrivalEntry {
    /// An emphasised (soonest) arrival.
    pub fn primary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_primary: true,
        }
    }

    /// A regular arrival.
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_primary: false,
        }
    }

    /// An empty slot on a fixed-size arrival board.
    pub fn placeholder() -> Self {
        Self::plain(arrival::PLACEHOLDER_LABEL)
    }
}

/// Everything a route card displays for one transit route.
///
/// Missing text fields deserialize as empty strings
/// and a missing arrival list as an empty one;
/// cards render those regions blank rather than failing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteSummary {
    /// Short route identifier (e.g. "504").
    pub route_number: String,
    /// Human-readable route or line name.
    pub route_name: String,
    /// The current or last stop location.
    pub location: String,
    /// The terminal station or stop name.
    pub station: String,
    /// Arrivals, soonest first by convention.
    pub arrival_times: Vec<ArrivalEntry>,
}

impl RouteSummary {
    pub fn new(
        route_number: impl Into<String>,
        route_name: impl Into<String>,
        location: impl Into<String>,
        station: impl Into<String>,
        arrival_times: Vec<ArrivalEntry>,
    ) -> Self {
        Self {
            route_number: route_number.into(),
            route_name: route_name.into(),
            location: location.into(),
            station: station.into(),
            arrival_times,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_literals() {
        let json = r#"{
            "routeNumber": "504",
            "routeName": "King Streetcar",
            "location": "King St West At Yonge St",
            "station": "King Station",
            "arrivalTimes": [
                { "label": "2 min", "isPrimary": true },
                { "label": "in 13 mins" }
            ]
        }"#;
        let route: RouteSummary = serde_json::from_str(json).unwrap();

        assert_eq!(route.route_number, "504");
        assert_eq!(
            route.arrival_times,
            vec![
                ArrivalEntry::primary("2 min"),
                ArrivalEntry::plain("in 13 mins")
            ]
        );
    }

    #[test]
    fn missing_fields_degrade_to_blank() {
        let route: RouteSummary = serde_json::from_str(r#"{ "routeNumber": "95" }"#).unwrap();

        assert_eq!(route.route_number, "95");
        assert!(route.route_name.is_empty());
        assert!(route.station.is_empty());
        assert!(route.arrival_times.is_empty());
    }
}

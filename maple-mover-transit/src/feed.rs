//! NextBus prediction documents.
//!
//! These mirror the JSON returned by the `predictions` command of the NextBus public JSON feed.
//! The feed is loose about shapes: any list may arrive as a single object when it has
//! one element, and numbers arrive as strings.
//! The serde definitions below absorb both quirks.

use crate::defaults::FALLBACK_STATION;
use itertools::Itertools;
use maple_mover_model::arrival::arrivals_from_minutes;
use maple_mover_model::{RouteSummary, RouteTitle};
use serde::Deserialize;
use serde_with::{DisplayFromStr, OneOrMany, PickFirst, serde_as};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid prediction document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A response to one `predictions` request (one stop, every route serving it).
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PredictionsDocument {
    #[serde_as(as = "OneOrMany<_>")]
    pub predictions: Vec<RoutePredictions>,
}

/// Predictions for one route at one stop.
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutePredictions {
    pub route_tag: String,
    /// Route title, e.g. "504-King".
    pub route_title: String,
    /// Stop title, usually an intersection ("King St West At Yonge St").
    pub stop_title: String,
    pub stop_tag: String,
    #[serde_as(as = "OneOrMany<_>")]
    pub direction: Vec<Direction>,
    /// Present (instead of any directions) when nothing is currently predicted.
    pub dir_title_because_no_predictions: Option<String>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Direction {
    /// Direction title, e.g. "East - 504a King towards Broadview Station".
    pub title: String,
    #[serde_as(as = "OneOrMany<_>")]
    pub prediction: Vec<Prediction>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub minutes: f64,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub seconds: Option<u32>,
    pub vehicle: Option<String>,
    pub dir_tag: Option<String>,
}

impl RoutePredictions {
    /// Converts these predictions into route cards, one per direction with upcoming arrivals.
    ///
    /// Each card shows at most `arrivals_per_route` arrivals.
    /// Directions without a usable (non-zero) prediction are skipped.
    pub fn route_summaries(&self, arrivals_per_route: usize) -> Vec<RouteSummary> {
        let title = RouteTitle::parse(&self.route_title);
        let route_number = if self.route_tag.is_empty() {
            title.number
        } else {
            self.route_tag.as_str()
        };

        self.direction
            .iter()
            .filter_map(|direction| {
                let minutes = direction
                    .prediction
                    .iter()
                    .map(|prediction| prediction.minutes)
                    .sorted_by(f64::total_cmp);
                let arrivals = arrivals_from_minutes(minutes, arrivals_per_route);
                if arrivals.is_empty() {
                    debug!(
                        route = route_number,
                        direction = %direction.title,
                        "Skipping direction without upcoming arrivals"
                    );
                    return None;
                }

                Some(RouteSummary::new(
                    route_number,
                    title.name,
                    self.stop_title.as_str(),
                    station_for(direction),
                    arrivals,
                ))
            })
            .collect()
    }
}

/// The terminus shown on a card: where the direction is headed, else its title.
fn station_for(direction: &Direction) -> &str {
    RouteTitle::parse(&direction.title)
        .destination
        .or(Some(direction.title.trim()).filter(|title| !title.is_empty()))
        .unwrap_or(FALLBACK_STATION)
}

/// A saved set of prediction documents, indexed by stop tag.
#[derive(Debug, Clone, Default)]
pub struct PredictionSnapshot {
    by_stop: HashMap<String, Vec<RoutePredictions>>,
}

/// Snapshot files hold either one document or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    // Tried first: a lone document would otherwise be accepted from a one-element list.
    Many(Vec<PredictionsDocument>),
    One(PredictionsDocument),
}

impl PredictionSnapshot {
    pub fn from_documents<I: IntoIterator<Item = PredictionsDocument>>(documents: I) -> Self {
        let by_stop = documents
            .into_iter()
            .flat_map(|document| document.predictions)
            .into_group_map_by(|predictions| predictions.stop_tag.clone());

        Self { by_stop }
    }

    /// Reads a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or if the input isn't a prediction document (or list of them).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeedError> {
        let documents = match serde_json::from_reader(reader)? {
            SnapshotFile::Many(documents) => documents,
            SnapshotFile::One(document) => vec![document],
        };
        Ok(Self::from_documents(documents))
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file can't be opened or doesn't parse (see [`PredictionSnapshot::from_reader`]).
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        let snapshot = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            path = %path.display(),
            stops = snapshot.stop_count(),
            "Loaded prediction snapshot"
        );
        Ok(snapshot)
    }

    /// The number of stops with at least one route in the snapshot.
    pub fn stop_count(&self) -> usize {
        self.by_stop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_stop.is_empty()
    }

    /// Raw predictions for a stop (empty when the snapshot has none).
    pub fn for_stop(&self, stop_tag: &str) -> &[RoutePredictions] {
        self.by_stop.get(stop_tag).map_or(&[], Vec::as_slice)
    }

    /// Route cards for every route and direction at a stop, in feed order.
    pub fn summaries_for_stop(&self, stop_tag: &str, arrivals_per_route: usize) -> Vec<RouteSummary> {
        self.for_stop(stop_tag)
            .iter()
            .flat_map(|predictions| predictions.route_summaries(arrivals_per_route))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maple_mover_model::ArrivalEntry;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn single_objects_and_string_numbers() {
        let json = r#"{
            "predictions": {
                "routeTag": "504",
                "routeTitle": "504-King",
                "stopTitle": "King St West At Yonge St",
                "stopTag": "15638",
                "direction": {
                    "title": "East - 504a King towards Broadview Station",
                    "prediction": { "minutes": "4", "seconds": "261", "vehicle": "4412" }
                }
            }
        }"#;
        let snapshot = PredictionSnapshot::from_reader(json.as_bytes()).unwrap();
        let predictions = snapshot.for_stop("15638");

        assert_eq!(predictions.len(), 1);
        assert_eq!(
            predictions[0].direction[0].prediction,
            vec![Prediction {
                minutes: 4.0,
                seconds: Some(261),
                vehicle: Some("4412".to_string()),
                dir_tag: None,
            }]
        );
    }

    #[test]
    fn numeric_minutes_are_accepted() {
        let json = r#"{ "minutes": 7, "seconds": 430 }"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.minutes, 7.0);
        assert_eq!(prediction.seconds, Some(430));
    }

    #[test]
    fn summaries_per_direction() {
        let snapshot = PredictionSnapshot::load(&fixture("predictions_king_yonge.json")).unwrap();
        let summaries = snapshot.summaries_for_stop("15638", 4);

        assert_eq!(summaries.len(), 2);

        let eastbound = &summaries[0];
        assert_eq!(eastbound.route_number, "504");
        assert_eq!(eastbound.route_name, "504-King");
        assert_eq!(eastbound.location, "King St West At Yonge St");
        assert_eq!(eastbound.station, "Broadview Station");
        assert_eq!(
            eastbound.arrival_times,
            vec![
                ArrivalEntry::primary("2 min"),
                ArrivalEntry::plain("13 min"),
                ArrivalEntry::plain("27 min"),
            ]
        );

        let westbound = &summaries[1];
        assert_eq!(westbound.station, "Dundas West Station");
        assert_eq!(westbound.arrival_times.len(), 4);
    }

    #[test]
    fn routes_without_predictions_produce_no_cards() {
        let snapshot = PredictionSnapshot::load(&fixture("predictions_king_yonge.json")).unwrap();
        let predictions = snapshot.for_stop("15638");

        let quiet = predictions
            .iter()
            .find(|p| p.route_tag == "97")
            .expect("fixture includes route 97");
        assert!(quiet.dir_title_because_no_predictions.is_some());
        assert!(quiet.route_summaries(4).is_empty());
    }

    #[test]
    fn list_of_documents() {
        let snapshot = PredictionSnapshot::load(&fixture("predictions_snapshot.json")).unwrap();

        assert_eq!(snapshot.stop_count(), 2);
        assert_eq!(snapshot.summaries_for_stop("14185", 4)[0].route_number, "95");
        assert!(snapshot.for_stop("no-such-stop").is_empty());
    }

    #[test]
    fn other_documents_are_rejected() {
        let route_config = File::open(fixture("route_config_504.json")).unwrap();
        assert!(matches!(
            PredictionSnapshot::from_reader(route_config),
            Err(FeedError::Json(_))
        ));

        assert!(matches!(
            PredictionSnapshot::from_reader(r#"{ "predictionz": [] }"#.as_bytes()),
            Err(FeedError::Json(_))
        ));
        assert!(matches!(
            PredictionSnapshot::from_reader(r#"{ "Error": { "content": "Agency parameter a=ttcx is not valid." } }"#.as_bytes()),
            Err(FeedError::Json(_))
        ));
    }

    #[test]
    fn empty_prediction_list_is_a_valid_snapshot() {
        let snapshot = PredictionSnapshot::from_reader(r#"{ "predictions": [] }"#.as_bytes()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn station_falls_back_to_title_then_city() {
        let titled = Direction {
            title: "North - 320 Yonge".to_string(),
            prediction: vec![],
        };
        assert_eq!(station_for(&titled), "North - 320 Yonge");
        assert_eq!(station_for(&Direction::default()), FALLBACK_STATION);
    }
}

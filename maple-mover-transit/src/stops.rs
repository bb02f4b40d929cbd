//! Stop catalogs built from NextBus route configurations.

use crate::feed::FeedError;
use crate::geography::{BoundingBox, distance_meters};
use geo::{Point, point};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, OneOrMany, PickFirst, serde_as, skip_serializing_none};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// A response to one `routeConfig` request.
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RouteConfigDocument {
    #[serde_as(as = "OneOrMany<_>")]
    pub route: Vec<RouteConfig>,
}

impl RouteConfigDocument {
    /// Reads a route configuration document from JSON.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or malformed JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeedError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a route configuration document from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file can't be opened or doesn't parse.
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RouteConfig {
    pub tag: String,
    #[serde(default)]
    pub title: String,
    #[serde_as(as = "OneOrMany<_>")]
    #[serde(default)]
    pub stop: Vec<RouteStop>,
}

/// A stop as listed in a route configuration.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub tag: String,
    pub title: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub lat: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub lon: f64,
    /// The public stop number, shared by every route serving the stop.
    pub stop_id: Option<String>,
}

/// A stop in the catalog, with every route that serves it.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransitStop {
    /// Catalog key: the stop id, or the tag for stops without one.
    pub id: String,
    /// The tag used to look up predictions.
    pub tag: String,
    pub title: String,
    pub lat: f64,
    pub lon: f64,
    pub stop_id: Option<String>,
    /// Route tags, in the order they were added.
    pub routes: Vec<String>,
}

impl TransitStop {
    pub fn location(&self) -> Point {
        point!(x: self.lon, y: self.lat)
    }
}

/// A stop found by [`StopCatalog::nearby`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyStop<'a> {
    pub stop: &'a TransitStop,
    pub distance_meters: f64,
}

/// Every known stop, and the routes serving them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StopCatalog {
    /// Route tag to route title.
    routes: BTreeMap<String, String>,
    /// Stop id to stop.
    stops: BTreeMap<String, TransitStop>,
}

impl StopCatalog {
    pub fn from_route_configs<I: IntoIterator<Item = RouteConfig>>(routes: I) -> Self {
        let mut catalog = Self::default();
        for route in routes {
            catalog.add_route_config(route);
        }
        catalog
    }

    /// Merges one route's stops into the catalog.
    ///
    /// Stops shared with routes already in the catalog gain this route's tag;
    /// their title and position stay as first seen.
    pub fn add_route_config(&mut self, route: RouteConfig) {
        if route.tag.is_empty() {
            warn!(title = %route.title, "Skipping route configuration without a tag");
            return;
        }
        debug!(route = %route.tag, stops = route.stop.len(), "Adding route");

        for stop in route.stop {
            if !(stop.lat.is_finite() && stop.lon.is_finite()) {
                warn!(route = %route.tag, stop = %stop.tag, "Skipping stop without a usable position");
                continue;
            }
            let id = stop.stop_id.clone().unwrap_or_else(|| stop.tag.clone());
            match self.stops.entry(id) {
                Entry::Occupied(mut entry) => {
                    let routes = &mut entry.get_mut().routes;
                    if !routes.contains(&route.tag) {
                        routes.push(route.tag.clone());
                    }
                }
                Entry::Vacant(entry) => {
                    let id = entry.key().clone();
                    entry.insert(TransitStop {
                        id,
                        tag: stop.tag,
                        title: stop.title,
                        lat: stop.lat,
                        lon: stop.lon,
                        stop_id: stop.stop_id,
                        routes: vec![route.tag.clone()],
                    });
                }
            }
        }

        self.routes.insert(route.tag, route.title);
    }

    /// Builds a catalog from route configuration files.
    ///
    /// # Errors
    ///
    /// Fails on the first file that can't be read or parsed.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, FeedError> {
        let mut catalog = Self::default();
        for path in paths {
            let document = RouteConfigDocument::load(path.as_ref())?;
            for route in document.route {
                catalog.add_route_config(route);
            }
        }
        info!(
            routes = catalog.route_count(),
            stops = catalog.stop_count(),
            "Built stop catalog"
        );
        Ok(catalog)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops, ordered by id.
    pub fn stops(&self) -> impl Iterator<Item = &TransitStop> {
        self.stops.values()
    }

    pub fn route_title(&self, tag: &str) -> Option<&str> {
        self.routes.get(tag).map(String::as_str)
    }

    pub fn stop(&self, id: &str) -> Option<&TransitStop> {
        self.stops.get(id)
    }

    /// The closest stops within `radius_meters` of `center`, closest first.
    ///
    /// At most `max_stops` stops are returned.
    pub fn nearby(&self, center: Point, radius_meters: f64, max_stops: usize) -> Vec<NearbyStop<'_>> {
        let bbox = BoundingBox::around(center, radius_meters);

        let mut found: Vec<_> = self
            .stops
            .values()
            .filter(|stop| bbox.contains(stop.location()))
            .map(|stop| NearbyStop {
                stop,
                distance_meters: distance_meters(center, stop.location()),
            })
            .filter(|nearby| nearby.distance_meters <= radius_meters)
            .collect();

        found.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        found.truncate(max_stops);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{MAX_NEARBY_STOPS, SEARCH_RADIUS_METERS};
    use crate::geography::TORONTO_CENTER;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    fn stop(tag: &str, lat: f64, lon: f64) -> RouteStop {
        RouteStop {
            tag: tag.to_string(),
            title: format!("Stop {tag}"),
            lat,
            lon,
            stop_id: None,
        }
    }

    fn route(tag: &str, stops: Vec<RouteStop>) -> RouteConfig {
        RouteConfig {
            tag: tag.to_string(),
            title: format!("{tag}-Test"),
            stop: stops,
        }
    }

    #[test]
    fn builds_catalog_from_fixtures() {
        let catalog = StopCatalog::from_files(&[
            fixture("route_config_504.json"),
            fixture("route_config_97.json"),
        ])
        .unwrap();

        assert_eq!(catalog.route_count(), 2);
        assert_eq!(catalog.route_title("504"), Some("504-King"));

        // King St West At Yonge St is served by both routes.
        let king_yonge = catalog.stop("15638").unwrap();
        assert_eq!(king_yonge.routes, ["504", "97"]);
        assert_eq!(king_yonge.tag, "15638");
    }

    #[test]
    fn single_stop_route_config() {
        let json = r#"{
            "route": {
                "tag": "95",
                "title": "95-York Mills",
                "stop": { "tag": "14185", "title": "York Mills Station", "lat": "43.7443", "lon": "-79.4066", "stopId": "14185" }
            }
        }"#;
        let document = RouteConfigDocument::from_reader(json.as_bytes()).unwrap();
        let catalog = StopCatalog::from_route_configs(document.route);

        assert_eq!(catalog.stop_count(), 1);
        assert_eq!(catalog.stop("14185").unwrap().lat, 43.7443);
    }

    #[test]
    fn prediction_documents_are_not_route_configs() {
        assert!(matches!(
            RouteConfigDocument::load(&fixture("predictions_king_yonge.json")),
            Err(FeedError::Json(_))
        ));
        assert!(StopCatalog::from_files(&[fixture("predictions_snapshot.json")]).is_err());
        // A route entry must at least carry its tag.
        assert!(RouteConfigDocument::from_reader(r#"{ "route": { "title": "504-King" } }"#.as_bytes()).is_err());
    }

    #[test]
    fn stops_without_id_are_keyed_by_tag() {
        let catalog = StopCatalog::from_route_configs([route("1", vec![stop("a", 43.65, -79.38)])]);
        assert_eq!(catalog.stop("a").map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn repeated_route_is_not_listed_twice() {
        let mut catalog = StopCatalog::default();
        catalog.add_route_config(route("1", vec![stop("a", 43.65, -79.38)]));
        catalog.add_route_config(route("1", vec![stop("a", 43.65, -79.38)]));

        assert_eq!(catalog.stop("a").unwrap().routes, ["1"]);
    }

    #[test]
    fn nearby_is_sorted_and_limited() {
        let catalog = StopCatalog::from_route_configs([route(
            "1",
            vec![
                // Roughly 450m, 110m and 230m north of the center
                stop("far", TORONTO_CENTER.y() + 0.004, TORONTO_CENTER.x()),
                stop("near", TORONTO_CENTER.y() + 0.001, TORONTO_CENTER.x()),
                stop("mid", TORONTO_CENTER.y() + 0.002, TORONTO_CENTER.x()),
                // Roughly 1.1km away
                stop("outside", TORONTO_CENTER.y() + 0.01, TORONTO_CENTER.x()),
            ],
        )]);

        let found = catalog.nearby(TORONTO_CENTER, SEARCH_RADIUS_METERS, MAX_NEARBY_STOPS);
        let tags: Vec<_> = found.iter().map(|n| n.stop.tag.as_str()).collect();
        assert_eq!(tags, ["near", "mid", "far"]);
        assert!(found.windows(2).all(|w| w[0].distance_meters <= w[1].distance_meters));

        let closest = catalog.nearby(TORONTO_CENTER, SEARCH_RADIUS_METERS, 1);
        assert_eq!(closest.len(), 1);
        assert_eq!(closest[0].stop.tag, "near");
    }

    #[test]
    fn empty_catalog_finds_nothing() {
        assert!(
            StopCatalog::default()
                .nearby(TORONTO_CENTER, SEARCH_RADIUS_METERS, MAX_NEARBY_STOPS)
                .is_empty()
        );
    }
}

//! # Lookup collaborators
//!
//! Pages never look anything up themselves.
//! Callers resolve a location or a search query through these traits first,
//! then hand the resulting route summaries to a view.
//!
//! The implementations here are offline:
//! they answer from a [`StopCatalog`] and a [`PredictionSnapshot`] loaded from disk.

use crate::defaults::{ARRIVALS_PER_ROUTE, MAX_NEARBY_STOPS, SEARCH_RADIUS_METERS};
use crate::geography::{ServiceArea, TORONTO_CENTER};
use crate::{PredictionSnapshot, StopCatalog, TransitStop};
use geo::Point;
use maple_mover_model::{RouteSummary, RouteTitle};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("Location is unavailable")]
    Unavailable,
    #[error("Location ({lat}, {lon}) is outside the service area")]
    OutsideServiceArea { lat: f64, lon: f64 },
}

/// Supplies the rider's current position.
pub trait LocationProvider {
    /// # Errors
    ///
    /// Fails when no position can be determined.
    fn current_location(&self) -> Result<Point, LocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Point);

impl Default for FixedLocation {
    fn default() -> Self {
        Self(TORONTO_CENTER)
    }
}

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Result<Point, LocationError> {
        Ok(self.0)
    }
}

/// A provider that never knows where the rider is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_location(&self) -> Result<Point, LocationError> {
        Err(LocationError::Unavailable)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search query is empty")]
    EmptyQuery,
}

/// Turns a free-text query into route cards, in display order.
pub trait SearchController {
    /// # Errors
    ///
    /// Fails when the query can't be searched for (for example, when it is blank).
    fn search(&self, query: &str) -> Result<Vec<RouteSummary>, SearchError>;
}

/// Route cards for one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StopArrivals<'a> {
    pub stop: &'a TransitStop,
    /// Distance from the searched location, when the lookup had one.
    pub distance_meters: Option<f64>,
    pub routes: Vec<RouteSummary>,
}

/// Offline stop lookups over a catalog and a prediction snapshot.
#[derive(Debug, Clone, Copy)]
pub struct StopDirectory<'a> {
    catalog: &'a StopCatalog,
    predictions: &'a PredictionSnapshot,
    arrivals_per_route: usize,
}

impl<'a> StopDirectory<'a> {
    pub fn new(catalog: &'a StopCatalog, predictions: &'a PredictionSnapshot) -> Self {
        Self {
            catalog,
            predictions,
            arrivals_per_route: ARRIVALS_PER_ROUTE,
        }
    }

    #[must_use]
    pub fn with_arrivals_per_route(self, arrivals_per_route: usize) -> Self {
        Self {
            arrivals_per_route,
            ..self
        }
    }

    /// Route cards for a stop, or `None` when nothing is predicted there.
    ///
    /// Cards the feed left unnamed take the route title from the catalog.
    fn arrivals_at(&self, stop: &'a TransitStop, distance_meters: Option<f64>) -> Option<StopArrivals<'a>> {
        let mut routes = self
            .predictions
            .summaries_for_stop(&stop.tag, self.arrivals_per_route);
        if routes.is_empty() {
            debug!(stop = %stop.tag, "No predictions for stop");
            return None;
        }

        for route in routes.iter_mut().filter(|route| route.route_name.is_empty()) {
            if let Some(title) = self.catalog.route_title(&route.route_number) {
                route.route_name = RouteTitle::parse(title).name.to_string();
            }
        }

        Some(StopArrivals {
            stop,
            distance_meters,
            routes,
        })
    }

    /// Stops whose title or serving route tag matches `query`, ignoring case.
    ///
    /// Only stops with predicted arrivals are returned, ordered by stop id.
    ///
    /// # Errors
    ///
    /// Fails when the query is blank.
    pub fn stops_matching(&self, query: &str) -> Result<Vec<StopArrivals<'a>>, SearchError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let found: Vec<_> = self
            .catalog
            .stops()
            .filter(|stop| {
                stop.title.to_lowercase().contains(&needle)
                    || stop.routes.iter().any(|route| route.eq_ignore_ascii_case(&needle))
            })
            .filter_map(|stop| self.arrivals_at(stop, None))
            .collect();

        info!(query, stops = found.len(), "Searched stops");
        Ok(found)
    }

    /// Stops with predicted arrivals within `radius_meters` of `center`, closest first.
    pub fn stops_near(
        &self,
        center: Point,
        radius_meters: f64,
        max_stops: usize,
    ) -> Vec<StopArrivals<'a>> {
        self.catalog
            .nearby(center, radius_meters, max_stops)
            .into_iter()
            .filter_map(|nearby| self.arrivals_at(nearby.stop, Some(nearby.distance_meters)))
            .collect()
    }
}

impl SearchController for StopDirectory<'_> {
    fn search(&self, query: &str) -> Result<Vec<RouteSummary>, SearchError> {
        Ok(self
            .stops_matching(query)?
            .into_iter()
            .flat_map(|stop| stop.routes)
            .collect())
    }
}

/// Finds arrivals around wherever a [`LocationProvider`] says the rider is.
#[derive(Debug, Clone)]
pub struct NearbyArrivals<L> {
    provider: L,
    service_area: ServiceArea,
    radius_meters: f64,
    max_stops: usize,
}

impl<L: LocationProvider> NearbyArrivals<L> {
    /// Searches the Toronto service area with the default radius and stop limit.
    pub fn new(provider: L) -> Self {
        Self {
            provider,
            service_area: ServiceArea::TORONTO,
            radius_meters: SEARCH_RADIUS_METERS,
            max_stops: MAX_NEARBY_STOPS,
        }
    }

    #[must_use]
    pub fn with_radius(self, radius_meters: f64) -> Self {
        Self {
            radius_meters,
            ..self
        }
    }

    #[must_use]
    pub fn with_max_stops(self, max_stops: usize) -> Self {
        Self { max_stops, ..self }
    }

    /// Locates the rider and collects arrivals at the closest stops.
    ///
    /// # Errors
    ///
    /// Fails when the provider has no location or the location is outside the service area.
    pub fn find<'a>(&self, directory: &StopDirectory<'a>) -> Result<Vec<StopArrivals<'a>>, LocationError> {
        let location = self.provider.current_location()?;
        if !self.service_area.contains(location) {
            return Err(LocationError::OutsideServiceArea {
                lat: location.y(),
                lon: location.x(),
            });
        }

        let found = directory.stops_near(location, self.radius_meters, self.max_stops);
        info!(
            lat = location.y(),
            lon = location.x(),
            radius = self.radius_meters,
            stops = found.len(),
            "Found nearby arrivals"
        );
        Ok(found)
    }
}

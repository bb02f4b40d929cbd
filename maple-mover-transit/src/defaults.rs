//! Default tuning values for lookups.

pub use maple_mover_model::arrival::BOARD_SIZE as ARRIVALS_PER_ROUTE;

/// How far from a location to look for stops, in meters.
pub const SEARCH_RADIUS_METERS: f64 = 700.0;

/// How many of the closest stops a nearby lookup returns.
pub const MAX_NEARBY_STOPS: usize = 10;

/// Station text used when a prediction carries no direction information.
pub const FALLBACK_STATION: &str = "Toronto";

//! # Maple Mover transit data
//!
//! Offline access to TTC stop and prediction data in the shapes used by
//! the NextBus public JSON feed.
//! Nothing in here talks to the network:
//! route configurations and prediction snapshots are read from disk,
//! turned into a [`StopCatalog`] and [`PredictionSnapshot`],
//! and queried through the collaborator traits in [`collaborators`].

pub mod catalog_cache;
pub mod collaborators;
pub mod defaults;
mod feed;
pub mod geography;
mod stops;

// Flatten the handful of types most callers need.
pub use feed::{
    Direction, FeedError, Prediction, PredictionSnapshot, PredictionsDocument, RoutePredictions,
};
pub use stops::{NearbyStop, RouteConfig, RouteConfigDocument, RouteStop, StopCatalog, TransitStop};

//! On-disk cache of a [`StopCatalog`].
//!
//! Building a catalog means reading every route configuration,
//! so the result is saved as one JSON file and reused until it is rebuilt.

use crate::StopCatalog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// The cache layout version written by this crate.
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported catalog version {0:?}")]
    UnsupportedVersion(String),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile<C> {
    version: String,
    saved_at: DateTime<Utc>,
    catalog: C,
}

/// A catalog read back from the cache, with when it was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCatalog {
    pub catalog: StopCatalog,
    pub saved_at: DateTime<Utc>,
}

impl CachedCatalog {
    /// Whole days between saving and `now` (zero for timestamps in the future).
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.saved_at).num_days().max(0)
    }
}

/// Saves `catalog` to `path`, stamped with the current time.
///
/// # Errors
///
/// Fails if the file can't be written.
pub fn save(catalog: &StopCatalog, path: &Path) -> Result<(), CatalogError> {
    save_at(catalog, path, Utc::now())
}

/// Saves `catalog` to `path` with an explicit timestamp.
///
/// # Errors
///
/// Fails if the file can't be written.
pub fn save_at(
    catalog: &StopCatalog,
    path: &Path,
    saved_at: DateTime<Utc>,
) -> Result<(), CatalogError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(
        &mut writer,
        &CacheFile {
            version: FORMAT_VERSION.to_string(),
            saved_at,
            catalog,
        },
    )?;
    writer.flush()?;

    info!(
        path = %path.display(),
        routes = catalog.route_count(),
        stops = catalog.stop_count(),
        "Saved stop catalog"
    );
    Ok(())
}

/// Loads a cached catalog.
///
/// Returns `Ok(None)` when there is no file at `path`.
///
/// # Errors
///
/// Fails if the file can't be read, isn't a catalog, or was written with another format version.
pub fn load(path: &Path) -> Result<Option<CachedCatalog>, CatalogError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };

    let cached: CacheFile<StopCatalog> = serde_json::from_reader(BufReader::new(file))?;
    if cached.version != FORMAT_VERSION {
        warn!(path = %path.display(), version = %cached.version, "Ignoring catalog with unknown version");
        return Err(CatalogError::UnsupportedVersion(cached.version));
    }

    Ok(Some(CachedCatalog {
        catalog: cached.catalog,
        saved_at: cached.saved_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RouteConfig, RouteStop};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn catalog() -> StopCatalog {
        StopCatalog::from_route_configs([RouteConfig {
            tag: "504".to_string(),
            title: "504-King".to_string(),
            stop: vec![RouteStop {
                tag: "15638".to_string(),
                title: "King St West At Yonge St".to_string(),
                lat: 43.64893,
                lon: -79.37771,
                stop_id: Some("15638".to_string()),
            }],
        }])
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let saved_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        save_at(&catalog(), &path, saved_at).unwrap();
        let cached = load(&path).unwrap().unwrap();

        assert_eq!(cached.catalog, catalog());
        assert_eq!(cached.saved_at, saved_at);
        assert_eq!(cached.age_days(saved_at + Duration::hours(49)), 2);
        assert_eq!(cached.age_days(saved_at - Duration::days(1)), 0);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn rejects_other_versions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{ "version": "0.9", "savedAt": "2025-01-01T00:00:00Z", "catalog": { "routes": {}, "stops": {} } }"#,
        )
        .unwrap();

        assert!(matches!(
            load(&path),
            Err(CatalogError::UnsupportedVersion(version)) if version == "0.9"
        ));
    }

    #[test]
    fn rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(load(&path), Err(CatalogError::Json(_))));
    }
}

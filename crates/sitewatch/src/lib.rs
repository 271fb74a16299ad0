//! Sitewatch - Map-Directory Location Query Engine
//!
//! Sitewatch stores named geographic locations with an operational status
//! (`active`, `inactive`, `alarmed`) and answers the queries a map-based
//! directory UI needs: free-text search across title, description and
//! address, status filtering, and geo-proximity search with
//! haversine-distance ordering. Results are deterministic and come in two
//! projections, a light summary for list/map rendering and a full detail
//! view with derived status badge attributes.
//!
//! # Quick Start
//!
//! ```rust
//! use sitewatch::{
//!     Coordinates, LocationDirectory, LocationDraft, MemoryStore, ProximityRequest, Status,
//! };
//!
//! let mut store = MemoryStore::new();
//! let mut colosseum = LocationDraft::titled("Colosseo");
//! colosseum.coords = Some(Coordinates::new(41.8902, 12.4922)?);
//! colosseum.status = Status::Active;
//! store.insert(colosseum)?;
//!
//! let directory = LocationDirectory::new(store);
//!
//! // Nearest-first proximity search around central Rome.
//! let response = directory.search_nearby(&ProximityRequest {
//!     latitude: Some(41.9028),
//!     longitude: Some(12.4964),
//!     ..ProximityRequest::default()
//! })?;
//! assert_eq!(response.count, 1);
//! println!("Found: {}", response.locations[0].title);
//! # Ok::<(), sitewatch::SitewatchError>(())
//! ```
//!
//! # Design
//!
//! - **Pure predicates**: each filter is a function over a record; filters
//!   compose as a logical AND, independent of any storage technology.
//! - **Storage-agnostic**: the engine reads one [`RecordStore`] snapshot
//!   per call. [`MemoryStore`] ships in-crate; a database store plugs in
//!   behind the same trait.
//! - **Strict validation boundary**: oversize text, unknown statuses,
//!   out-of-range or unpaired coordinates and negative radii are rejected
//!   in [`LocationDirectory`] and never reach the engine.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod directory;
pub mod error;
mod geo;
mod model;
mod query;
mod store;

pub use directory::{
    DirectoryError, ListRequest, ListResponse, LocationDirectory, MAX_TEXT_LEN, PROXIMITY_LIMIT,
    ProximityRequest, ProximityResponse, STATUS_ALL, ValidationError,
};
pub use error::SitewatchError;
pub use geo::{DEFAULT_RADIUS_KM, EARTH_RADIUS_KM, GeoFilter, haversine_km};
pub use model::{
    Coordinates, Location, LocationDetails, LocationDraft, LocationId, LocationSummary,
    ModelError, Status, StatusBadge,
};
pub use query::{
    QueryEngine, QueryError, QueryMatch, QueryOutcome, QuerySpec, QuerySpecBuilder,
};
pub use store::{MemoryStore, RecordStore, StoreError};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Sitewatch library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from Sitewatch operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use sitewatch::init_logging;
/// use tracing::Level;
///
/// // Initialize with info-level logging
/// init_logging(Level::INFO)?;
/// # Ok::<(), sitewatch::SitewatchError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), SitewatchError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    fn seeded_directory() -> LocationDirectory<MemoryStore> {
        let mut store = MemoryStore::new();
        for (title, lat, lng, status) in [
            ("Colosseo", 41.8902, 12.4922, Status::Active),
            ("Duomo di Milano", 45.4641, 9.1919, Status::Alarmed),
            ("Pantheon", 41.8986, 12.4769, Status::Inactive),
        ] {
            let mut draft = LocationDraft::titled(title);
            draft.coords = Some(Coordinates::new(lat, lng).unwrap());
            draft.status = status;
            store.insert(draft).unwrap();
        }
        LocationDirectory::new(store)
    }

    #[test]
    fn test_list_unfiltered() {
        setup_test_env();

        let directory = seeded_directory();
        let response = directory.list(&ListRequest::default()).unwrap();
        assert_eq!(response.total_count, 3);
        assert_eq!(response.filtered_count, 3);
        assert_eq!(response.locations.len(), 3);
    }

    #[test]
    fn test_list_with_search() {
        setup_test_env();

        let directory = seeded_directory();
        let response = directory
            .list(&ListRequest {
                search: Some("duomo".into()),
                status: None,
            })
            .unwrap();
        assert_eq!(response.filtered_count, 1);
        assert_eq!(response.locations[0].title, "Duomo di Milano");
        // The unfiltered total is still reported.
        assert_eq!(response.total_count, 3);
    }

    #[test]
    fn test_proximity_search_orders_nearest_first() {
        setup_test_env();

        let directory = seeded_directory();
        // Central Rome: Pantheon and Colosseo are within a few km, the
        // Duomo is ~480 km away.
        let response = directory
            .search_nearby(&ProximityRequest {
                latitude: Some(41.8986),
                longitude: Some(12.4769),
                ..ProximityRequest::default()
            })
            .unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.locations[0].title, "Pantheon");
        assert_eq!(response.locations[1].title, "Colosseo");
    }

    #[test]
    fn test_details_round_trip() {
        setup_test_env();

        let directory = seeded_directory();
        let listed = directory.list(&ListRequest::default()).unwrap();
        let id = listed.locations[0].id;
        let details = directory.details(id).unwrap();
        assert_eq!(details.id, id);
    }

    #[test]
    fn test_details_not_found() {
        setup_test_env();

        let directory = seeded_directory();
        let err = directory.details(9999).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { id: 9999 }));
    }
}

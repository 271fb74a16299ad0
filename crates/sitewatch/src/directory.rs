//! Request-style entry points over the query engine.
//!
//! [`LocationDirectory`] is the seam a transport layer (HTTP handlers, an
//! RPC surface, a CLI) calls into: it owns the validation contract for
//! client input, translates requests into [`QuerySpec`]s and shapes the
//! results into the serializable response types. Anything that fails
//! validation is rejected here and never reaches the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::{
    geo::GeoFilter,
    model::{Coordinates, LocationDetails, LocationId, LocationSummary, ModelError, Status},
    query::{QueryEngine, QueryError, QuerySpec},
    store::{RecordStore, StoreError},
};

/// Maximum length, in characters, of a free-text filter.
pub const MAX_TEXT_LEN: usize = 255;

/// Result cap for proximity searches.
pub const PROXIMITY_LIMIT: usize = 20;

/// Status filter value that disables status filtering, distinct from every
/// real status.
pub const STATUS_ALL: &str = "all";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Text filter is {len} characters long, the maximum is {max}")]
    TextTooLong { len: usize, max: usize },
    #[error("Latitude and longitude must be provided together")]
    UnpairedCoordinates,
    #[error("Radius must be a non-negative number, got {0}")]
    InvalidRadius(f64),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Malformed or out-of-range client input; a client error.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// Single-record lookup with no matching record.
    #[error("No location with id {id}")]
    NotFound { id: LocationId },
    /// Record store failure, propagated unchanged; a server error.
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

impl DirectoryError {
    /// Whether the caller, rather than the system, is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}

impl From<QueryError> for DirectoryError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Store(err) => Self::Store(err),
        }
    }
}

/// List-with-filters request: optional free text and status, no limit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListRequest {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Proximity search request. `latitude` and `longitude` activate geo
/// filtering and must be present together; `radius_km` defaults to 10.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProximityRequest {
    pub q: Option<String>,
    pub status: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(alias = "radius")]
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse {
    pub locations: Vec<LocationSummary>,
    /// Total records in the store, unfiltered.
    pub total_count: usize,
    /// Records matching the filters, before any limit.
    pub filtered_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResponse {
    /// At most [`PROXIMITY_LIMIT`] matches, nearest first.
    pub locations: Vec<LocationSummary>,
    /// Number of returned records (post-limit).
    pub count: usize,
}

/// The directory service a transport layer talks to.
///
/// # Examples
///
/// ```rust
/// use sitewatch::{ListRequest, LocationDirectory, LocationDraft, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.insert(LocationDraft::titled("Colosseo"))?;
/// store.insert(LocationDraft::titled("Duomo di Milano"))?;
///
/// let directory = LocationDirectory::new(store);
/// let response = directory.list(&ListRequest {
///     search: Some("duomo".into()),
///     status: None,
/// })?;
/// assert_eq!(response.total_count, 2);
/// assert_eq!(response.filtered_count, 1);
/// # Ok::<(), sitewatch::SitewatchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocationDirectory<S> {
    store: S,
}

impl<S: RecordStore> LocationDirectory<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// List summaries of every record matching the optional text and
    /// status filters, plus the unfiltered and filtered counts.
    #[instrument(name = "List Locations", level = "debug", skip(self))]
    pub fn list(&self, request: &ListRequest) -> Result<ListResponse, DirectoryError> {
        let mut builder = QuerySpec::builder();
        if let Some(text) = validate_text(request.search.as_deref())? {
            builder = builder.text(text);
        }
        if let Some(status) = parse_status_filter(request.status.as_deref())? {
            builder = builder.status(status);
        }

        let outcome = QueryEngine::new(&self.store).query(&builder.build())?;
        Ok(ListResponse {
            locations: outcome
                .records
                .iter()
                .map(|m| m.location.summary())
                .collect(),
            total_count: self.store.len()?,
            filtered_count: outcome.matched_count,
        })
    }

    /// Proximity search: summaries of at most [`PROXIMITY_LIMIT`] matching
    /// records, nearest first when a reference point is given.
    #[instrument(name = "Proximity Search", level = "debug", skip(self))]
    pub fn search_nearby(
        &self,
        request: &ProximityRequest,
    ) -> Result<ProximityResponse, DirectoryError> {
        let mut builder = QuerySpec::builder().limit(PROXIMITY_LIMIT);
        if let Some(text) = validate_text(request.q.as_deref())? {
            builder = builder.text(text);
        }
        if let Some(status) = parse_status_filter(request.status.as_deref())? {
            builder = builder.status(status);
        }
        if let Some(geo) = validate_geo(request)? {
            builder = builder.nearby(geo.center, geo.radius_km);
        }

        let outcome = QueryEngine::new(&self.store).query(&builder.build())?;
        let locations: Vec<_> = outcome
            .records
            .iter()
            .map(|m| m.location.summary())
            .collect();
        Ok(ProximityResponse {
            count: locations.len(),
            locations,
        })
    }

    /// Full projection of a single record.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`] when no record has the given id, never
    /// a default record.
    #[instrument(name = "Location Details", level = "debug", skip(self))]
    pub fn details(&self, id: LocationId) -> Result<LocationDetails, DirectoryError> {
        self.store
            .get(id)?
            .map(|location| location.details())
            .ok_or(DirectoryError::NotFound { id })
    }
}

/// Normalize an optional text filter: blank becomes absent, oversize is
/// rejected.
fn validate_text(text: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TextTooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(Some(text.to_string()))
}

/// Parse an optional status filter; the [`STATUS_ALL`] sentinel and blank
/// input both mean "no filter".
fn parse_status_filter(status: Option<&str>) -> Result<Option<Status>, ValidationError> {
    match status.map(str::trim) {
        None | Some("") | Some(STATUS_ALL) => Ok(None),
        Some(status) => Ok(Some(status.parse().map_err(ValidationError::Model)?)),
    }
}

/// Validate the geo half of a proximity request. Coordinates must come as a
/// pair and be in range; the radius must be a finite non-negative number.
fn validate_geo(request: &ProximityRequest) -> Result<Option<GeoFilter>, ValidationError> {
    if let Some(radius_km) = request.radius_km
        && (!radius_km.is_finite() || radius_km < 0.0)
    {
        return Err(ValidationError::InvalidRadius(radius_km));
    }
    let center = match (request.latitude, request.longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude)?,
        (None, None) => return Ok(None),
        _ => return Err(ValidationError::UnpairedCoordinates),
    };
    Ok(Some(GeoFilter::new(center, request.radius_km)))
}

//! The location query engine.
//!
//! A [`QuerySpec`] combines up to three independent filters (free-text,
//! status, geo-proximity) as a logical AND, expressed as plain
//! predicates over [`Location`] records. The engine evaluates them against
//! one snapshot of the record store, orders the matches deterministically
//! and applies an optional limit. It is a pure read: no state is kept
//! between calls and concurrent queries need no coordination.

use std::cmp::Ordering;

use itertools::Itertools;
use tracing::{debug, instrument};

pub use self::error::QueryError;
use crate::{
    geo::GeoFilter,
    model::{Coordinates, Location, Status},
    store::RecordStore,
};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum QueryError {
        #[error("Record store error: {0}")]
        Store(#[from] crate::store::StoreError),
    }
    pub(super) type Result<T> = std::result::Result<T, QueryError>;
}
use error::Result;

/// Filter/search criteria for a single query. All fields are optional and
/// combine as a logical AND.
///
/// The "all" status sentinel of the request boundary never appears here;
/// an absent filter is simply `None`.
///
/// # Examples
///
/// ```rust
/// use sitewatch::{Coordinates, QuerySpec, Status};
///
/// let spec = QuerySpec::builder()
///     .text("museo")
///     .status(Status::Active)
///     .nearby(Coordinates::new(41.9028, 12.4964)?, 5.0)
///     .limit(20)
///     .build();
/// assert_eq!(spec.limit, Some(20));
/// # Ok::<(), sitewatch::ModelError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    /// Case-insensitive substring matched against title, description and
    /// address. Empty or absent matches everything.
    pub text: Option<String>,
    /// Exact status to keep; `None` keeps every status.
    pub status: Option<Status>,
    /// Proximity constraint; records without coordinates never match it.
    pub geo: Option<GeoFilter>,
    /// Cap on the number of returned records, applied after ordering.
    pub limit: Option<usize>,
}

impl QuerySpec {
    #[must_use]
    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::default()
    }
}

/// Fluent builder for [`QuerySpec`].
#[derive(Debug, Clone, Default)]
pub struct QuerySpecBuilder {
    spec: QuerySpec,
}

impl QuerySpecBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text filter.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec.text = Some(text.into());
        self
    }

    /// Keep only records with the given status.
    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.spec.status = Some(status);
        self
    }

    /// Keep only records strictly inside `radius_km` of `center`; pass
    /// `None` for the default radius.
    #[must_use]
    pub fn nearby(mut self, center: Coordinates, radius_km: impl Into<Option<f64>>) -> Self {
        self.spec.geo = Some(GeoFilter::new(center, radius_km));
        self
    }

    /// Cap the number of returned records.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.spec.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn build(self) -> QuerySpec {
        self.spec
    }
}

/// A matching record, with its distance from the query point when a geo
/// filter was active.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    pub location: Location,
    pub distance_km: Option<f64>,
}

/// Ordered result of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Matches in their deterministic order, truncated to the spec's limit.
    pub records: Vec<QueryMatch>,
    /// Number of matches before the limit was applied.
    pub matched_count: usize,
}

/// Executes [`QuerySpec`]s against a [`RecordStore`] snapshot.
///
/// # Examples
///
/// ```rust
/// use sitewatch::{LocationDraft, MemoryStore, QueryEngine, QuerySpec};
///
/// let mut store = MemoryStore::new();
/// store.insert(LocationDraft::titled("Colosseo"))?;
///
/// let engine = QueryEngine::new(&store);
/// let outcome = engine.query(&QuerySpec::builder().text("colo").build())?;
/// assert_eq!(outcome.matched_count, 1);
/// # Ok::<(), sitewatch::SitewatchError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a, S> {
    store: &'a S,
}

impl<'a, S: RecordStore> QueryEngine<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Run a query and return the ordered matches plus the pre-limit match
    /// count.
    ///
    /// Ordering is ascending distance (ties broken by ascending id) when a
    /// geo filter is active, ascending id otherwise; repeated calls over an
    /// unchanged store yield identical output. An empty result is a valid
    /// outcome, never an error.
    #[instrument(name = "Location Query", level = "debug", skip_all)]
    pub fn query(&self, spec: &QuerySpec) -> Result<QueryOutcome> {
        let needle = spec
            .text
            .as_deref()
            .map(str::to_lowercase)
            .filter(|needle| !needle.is_empty());

        let mut matches = Vec::new();
        for location in self.store.snapshot()? {
            if let Some(needle) = &needle
                && !matches_text(&location, needle)
            {
                continue;
            }
            if let Some(status) = spec.status
                && location.status != status
            {
                continue;
            }
            let distance_km = match &spec.geo {
                Some(geo) => {
                    let Some(coords) = location.coords else {
                        continue;
                    };
                    let (inside, distance_km) = geo.admit(coords);
                    if !inside {
                        continue;
                    }
                    Some(distance_km)
                }
                None => None,
            };
            matches.push(QueryMatch {
                location,
                distance_km,
            });
        }

        let matched_count = matches.len();
        let by_distance = spec.geo.is_some();
        let ordered = matches.into_iter().sorted_by(|a, b| {
            let by_id = a.location.id.cmp(&b.location.id);
            if by_distance {
                cmp_distance(a.distance_km, b.distance_km).then(by_id)
            } else {
                by_id
            }
        });
        let records: Vec<_> = match spec.limit {
            Some(limit) => ordered.take(limit).collect(),
            None => ordered.collect(),
        };

        debug!(
            matched_count,
            returned = records.len(),
            text = needle.is_some(),
            status = spec.status.map(|s| s.as_str()),
            geo = by_distance,
            "query complete"
        );
        Ok(QueryOutcome {
            records,
            matched_count,
        })
    }
}

/// Case-insensitive substring match over title, description and address.
fn matches_text(location: &Location, needle_lower: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle_lower);
    hit(&location.title)
        || location.description.as_deref().is_some_and(hit)
        || location.address.as_deref().is_some_and(hit)
}

fn cmp_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    // Both are Some when a geo filter is active; total_cmp keeps the sort
    // well-defined regardless.
    a.unwrap_or(f64::INFINITY).total_cmp(&b.unwrap_or(f64::INFINITY))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{Coordinates, LocationId};

    fn location(id: LocationId, title: &str, status: Status) -> Location {
        let now = Utc::now();
        Location {
            id,
            title: title.into(),
            description: None,
            address: None,
            coords: None,
            status,
            opening_hours: None,
            ticket_price: None,
            website: None,
            phone: None,
            visitor_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_text_match_covers_title_description_and_address() {
        let mut record = location(1, "Colosseo", Status::Active);
        assert!(matches_text(&record, "colosseo"));
        assert!(!matches_text(&record, "anfiteatro"));

        record.description = Some("Anfiteatro Flavio".into());
        assert!(matches_text(&record, "anfiteatro"));

        record.address = Some("Piazza del Colosseo, 1".into());
        assert!(matches_text(&record, "piazza"));
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let record = location(1, "COLOSSEO", Status::Active);
        assert!(matches_text(&record, "colosseo"));
    }

    #[test]
    fn test_builder_composes_all_filters() {
        let center = Coordinates::new(41.9, 12.5).unwrap();
        let spec = QuerySpec::builder()
            .text("museo")
            .status(Status::Alarmed)
            .nearby(center, None)
            .limit(5)
            .build();
        assert_eq!(spec.text.as_deref(), Some("museo"));
        assert_eq!(spec.status, Some(Status::Alarmed));
        assert_eq!(spec.geo, Some(GeoFilter::new(center, None)));
        assert_eq!(spec.limit, Some(5));
    }

    #[test]
    fn test_empty_spec_is_all_none() {
        assert_eq!(QuerySpec::builder().build(), QuerySpec::default());
    }

    #[test]
    fn test_cmp_distance_orders_ascending() {
        assert_eq!(cmp_distance(Some(1.0), Some(2.0)), Ordering::Less);
        assert_eq!(cmp_distance(Some(2.0), Some(1.0)), Ordering::Greater);
        assert_eq!(cmp_distance(Some(0.0), Some(0.0)), Ordering::Equal);
    }
}

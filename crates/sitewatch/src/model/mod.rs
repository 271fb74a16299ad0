//! Data model for the location directory.
//!
//! A [`Location`] is the sole entity: a named point on the map with an
//! operational [`Status`] and optional descriptive fields. Two projections
//! are derived from it: [`LocationSummary`] for list/map rendering and
//! [`LocationDetails`] for the single-record view.

mod coords;
mod status;

use chrono::{DateTime, Utc};
pub use coords::Coordinates;
use serde::{Deserialize, Serialize};
pub use status::{Status, StatusBadge};
use thiserror::Error;

/// Stable identifier of a location, assigned by the store at creation.
pub type LocationId = u64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown status `{0}`, expected one of `active`, `inactive`, `alarmed`")]
    UnknownStatus(String),
    #[error("Latitude {0} is outside the valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is outside the valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Location title must not be empty")]
    EmptyTitle,
}

/// A named geographic location in the directory.
///
/// Records are created and mutated by the record store; the query engine
/// only ever reads them. Coordinates are optional but always present as a
/// pair; a record without them is simply excluded from geo-proximity
/// queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
    pub status: Status,
    pub opening_hours: Option<String>,
    pub ticket_price: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub visitor_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Lightweight projection for list and map rendering.
    #[must_use]
    pub fn summary(&self) -> LocationSummary {
        LocationSummary {
            id: self.id,
            title: self.title.clone(),
            address: self.address.clone(),
            latitude: self.coords.map(Coordinates::latitude),
            longitude: self.coords.map(Coordinates::longitude),
            status: self.status,
        }
    }

    /// Full projection for the single-record view, including the derived
    /// status badge attributes.
    #[must_use]
    pub fn details(&self) -> LocationDetails {
        let badge = self.status.badge();
        LocationDetails {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            latitude: self.coords.map(Coordinates::latitude),
            longitude: self.coords.map(Coordinates::longitude),
            status: self.status,
            status_label: badge.label,
            status_color: badge.color,
            opening_hours: self.opening_hours.clone(),
            ticket_price: self.ticket_price.clone(),
            website: self.website.clone(),
            phone: self.phone.clone(),
            visitor_notes: self.visitor_notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The fields of a [`Location`] a caller provides; id and timestamps are
/// managed by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationDraft {
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub coords: Option<Coordinates>,
    pub status: Status,
    pub opening_hours: Option<String>,
    pub ticket_price: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub visitor_notes: Option<String>,
}

impl LocationDraft {
    /// A minimal draft with just a title; everything else defaults.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        Ok(())
    }
}

/// Summary projection: `{id, title, address, latitude, longitude, status}`.
///
/// Intentionally excludes the long-form text fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    pub id: LocationId,
    pub title: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Status,
}

/// Full projection: every attribute plus the derived status label and color
/// token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetails {
    pub id: LocationId,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Status,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub opening_hours: Option<String>,
    pub ticket_price: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub visitor_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

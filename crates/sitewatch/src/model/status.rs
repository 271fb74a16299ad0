use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Operational status of a location.
///
/// This is a closed set: anything outside the three variants is rejected at
/// the parse boundary and never reaches the query engine.
///
/// # Examples
///
/// ```rust
/// use sitewatch::Status;
///
/// let status: Status = "alarmed".parse()?;
/// assert_eq!(status, Status::Alarmed);
/// assert_eq!(status.badge().label, "In Alarm");
///
/// assert!("broken".parse::<Status>().is_err());
/// # Ok::<(), sitewatch::ModelError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
    Alarmed,
}

impl Status {
    /// All statuses, in canonical order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Alarmed];

    /// Canonical lowercase wire form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Alarmed => "alarmed",
        }
    }

    /// Display attributes for badge/map rendering.
    #[must_use]
    pub const fn badge(self) -> StatusBadge {
        match self {
            Self::Active => StatusBadge {
                label: "Active",
                color: "green",
            },
            Self::Inactive => StatusBadge {
                label: "Inactive",
                color: "gray",
            },
            Self::Alarmed => StatusBadge {
                label: "In Alarm",
                color: "red",
            },
        }
    }
}

impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "alarmed" => Ok(Self::Alarmed),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable label and color token derived from a [`Status`].
///
/// A pure projection of the status, never stored on the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
}

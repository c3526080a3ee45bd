#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crowd density levels and snapshot types.
//!
//! A [`SnapshotSet`] is one full, immutable picture of crowding across the
//! site catalog at an instant. The qualitative [`DensityLevel`] is always a
//! pure function of people-per-square-meter against three fixed thresholds;
//! section levels are classified the same way, never inherited from their
//! parent site.

use chrono::{DateTime, Duration, Utc};
use pilgrim_nav_sites_models::Coordinates;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Density classification thresholds in people per square meter.
///
/// Up to 0.3 is comfortable movement, up to 0.8 moderate, up to 1.5 high
/// but manageable; anything above is critical.
pub const THRESHOLD_LOW: f64 = 0.3;
/// Upper bound of the medium band.
pub const THRESHOLD_MEDIUM: f64 = 0.8;
/// Upper bound of the high band.
pub const THRESHOLD_HIGH: f64 = 1.5;

/// Qualitative crowd density level, from comfortable to dangerous.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DensityLevel {
    /// Comfortable movement, up to 0.3 people/m².
    Low = 1,
    /// Moderate density, 0.3-0.8 people/m².
    Medium = 2,
    /// High but manageable, 0.8-1.5 people/m².
    High = 3,
    /// Difficult movement, above 1.5 people/m².
    Critical = 4,
}

impl DensityLevel {
    /// Classifies a people-per-square-meter figure into a level.
    ///
    /// This is the single source of truth for classification; every
    /// snapshot's `level` field is derived through it.
    #[must_use]
    pub fn classify(density: f64) -> Self {
        if density <= THRESHOLD_LOW {
            Self::Low
        } else if density <= THRESHOLD_MEDIUM {
            Self::Medium
        } else if density <= THRESHOLD_HIGH {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Numeric rank of this level, 1 (low) to 4 (critical).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Edge-cost penalty applied to a route segment entering a site at this
    /// level. Used only for path-cost comparison, never for reported
    /// distance.
    #[must_use]
    pub const fn penalty_multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.8,
            Self::High => 3.0,
            Self::Critical => 5.0,
        }
    }

    /// Walking-speed multiplier for a route whose worst congestion is this
    /// level.
    #[must_use]
    pub const fn speed_multiplier(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 0.7,
            Self::High => 0.5,
            Self::Critical => 0.3,
        }
    }

    /// Returns all levels in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

/// Observed weather, which shifts crowd behavior.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Weather {
    /// Very hot weather reduces outdoor densities.
    Hot,
    /// Rain reduces outdoor densities further.
    Rain,
    /// Pleasant weather increases movement.
    Pleasant,
}

impl Weather {
    /// Density multiplier for this weather.
    #[must_use]
    pub const fn density_modifier(self) -> f64 {
        match self {
            Self::Hot => 0.9,
            Self::Rain => 0.7,
            Self::Pleasant => 1.2,
        }
    }
}

/// Density reading for one section of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    /// Section identifier from the catalog.
    pub id: String,
    /// Section name from the catalog.
    pub name: String,
    /// People per square meter in this section.
    pub density: f64,
    /// Level classified from this section's own density.
    pub density_level: DensityLevel,
    /// Estimated headcount in this section.
    pub crowd_size: u32,
}

/// Density reading for one site at an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensitySnapshot {
    /// Site name from the catalog.
    pub location_name: String,
    /// Display coordinate: the site's base coordinate with a small
    /// perturbation for map variety. Not used for routing.
    pub coordinates: Coordinates,
    /// Fraction of rated capacity occupied. May exceed 1.0 under forced or
    /// extreme scenarios.
    pub occupancy: f64,
    /// People per square meter across the whole site.
    pub density: f64,
    /// Level classified from `density`.
    pub density_level: DensityLevel,
    /// Estimated headcount at the site.
    pub crowd_size: u32,
    /// Rated capacity from the catalog.
    pub capacity: u32,
    /// Per-section readings, classified independently of the site level.
    pub sections: Vec<SectionSnapshot>,
    /// When this reading was produced.
    pub timestamp: DateTime<Utc>,
}

/// One full set of per-site density readings valid at a point in time.
///
/// Immutable once produced: refreshing crowd state means producing a new
/// set and swapping the reference, never mutating fields in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSet {
    /// Identity of this evaluation, for log correlation.
    pub id: Uuid,
    /// Exactly one snapshot per catalog site, in catalog order.
    pub snapshots: Vec<DensitySnapshot>,
    /// When the set was generated.
    pub generated_at: DateTime<Utc>,
    /// Interpolated total pilgrim count the set was distributed against.
    pub total_pilgrims: u32,
}

impl SnapshotSet {
    /// Looks up the snapshot for a site by name.
    #[must_use]
    pub fn get(&self, location_name: &str) -> Option<&DensitySnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.location_name == location_name)
    }

    /// Density level for a site, if the set has a reading for it.
    #[must_use]
    pub fn level_of(&self, location_name: &str) -> Option<DensityLevel> {
        self.get(location_name).map(|s| s.density_level)
    }

    /// Returns `true` if this set is younger than `max_age` as of `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.generated_at) < max_age
    }

    /// Sum of all site headcounts in the set.
    #[must_use]
    pub fn distributed_total(&self) -> u64 {
        self.snapshots.iter().map(|s| u64::from(s.crowd_size)).sum()
    }
}

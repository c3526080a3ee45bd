#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route result types for congestion-aware routing.
//!
//! Serialized to JSON by the API. Separate from the router so the response
//! contract can evolve independently of the search internals.

use pilgrim_nav_crowd_models::DensityLevel;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How strongly crowding affects this route's walking pace.
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
pub enum CrowdImpact {
    /// Walking pace is close to normal.
    Moderate,
    /// Walking pace is substantially reduced (speed multiplier below 0.8).
    Significant,
}

impl CrowdImpact {
    /// Derives the impact from the route's speed multiplier.
    #[must_use]
    pub fn from_speed_multiplier(multiplier: f64) -> Self {
        if multiplier < 0.8 {
            Self::Significant
        } else {
            Self::Moderate
        }
    }
}

/// A computed least-congested route between two sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Route start site name.
    pub start: String,
    /// Route destination site name.
    pub destination: String,
    /// Intermediate sites on the path, excluding start and destination.
    pub via: Vec<String>,
    /// Total static walking distance in kilometers.
    pub distance_km: f64,
    /// Estimated duration in minutes at the crowd-adjusted pace.
    pub duration_minutes: u32,
    /// Worst density level among all sites on the path.
    pub congestion_level: DensityLevel,
    /// Crowd-adjusted walking speed in km/h.
    pub adjusted_speed_kmh: f64,
    /// Qualitative impact of crowding on this route.
    pub crowd_impact: CrowdImpact,
    /// The pilgrim population range the crowd model assumes.
    pub pilgrim_count_range: String,
    /// Ordered, human-readable guidance lines.
    pub directions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_threshold_at_point_eight() {
        assert_eq!(
            CrowdImpact::from_speed_multiplier(1.0),
            CrowdImpact::Moderate
        );
        assert_eq!(
            CrowdImpact::from_speed_multiplier(0.8),
            CrowdImpact::Moderate
        );
        assert_eq!(
            CrowdImpact::from_speed_multiplier(0.7),
            CrowdImpact::Significant
        );
        assert_eq!(
            CrowdImpact::from_speed_multiplier(0.3),
            CrowdImpact::Significant
        );
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static Hajj site catalog types.
//!
//! These types describe the fixed physical characteristics of each site:
//! area, rated capacity, named sections, and base coordinates. They carry no
//! crowd state; live density readings are layered on top by the crowd
//! estimator.

use serde::{Deserialize, Serialize};

/// A geographic point as `lng`/`lat` in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

/// A named sub-section of a site with its fixed share of the site's crowd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Stable section identifier (e.g. "mataf", "tents-a").
    pub id: String,
    /// Human-readable section name.
    pub name: String,
    /// Fraction of the site's population attributed to this section (0..1).
    pub share: f64,
}

/// A catalog entry describing one physical site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique site name, also the node name in the distance graph.
    pub name: String,
    /// Base coordinate used for map display.
    pub coordinates: Coordinates,
    /// Physical area in square meters.
    pub area_sq_m: f64,
    /// Rated capacity in people.
    pub capacity: u32,
    /// Ordered list of sections; shares sum to approximately 1.0.
    pub sections: Vec<Section>,
}

impl Location {
    /// Returns the density in people per square meter for the given
    /// headcount at this site.
    #[must_use]
    pub fn density_for(&self, crowd_size: u32) -> f64 {
        f64::from(crowd_size) / self.area_sq_m
    }
}

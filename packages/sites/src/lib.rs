#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical Hajj site catalog and walking-distance graph.
//!
//! The catalog is the fixed set of sites the system knows about. Five of
//! them are routable nodes in the distance graph; the remaining gate and
//! tent-city entries only appear in density reporting.

pub mod graph;

pub use graph::SiteGraph;
use pilgrim_nav_sites_models::{Coordinates, Location, Section};

/// The fixed site catalog, in canonical order.
///
/// Iteration order is stable across evaluations; the crowd estimator relies
/// on it for its per-index banding rule.
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    /// Builds the canonical eight-site catalog.
    #[must_use]
    pub fn canonical() -> Self {
        let locations = vec![
            site(
                "Masjid al-Haram",
                (39.826_174, 21.422_487),
                356_800.0,
                120_000,
                &[
                    ("mataf", "Mataf Area", 0.15),
                    ("ground", "Ground Floor", 0.45),
                    ("first", "First Floor", 0.25),
                    ("roof", "Roof Area", 0.15),
                ],
            ),
            site(
                "Mina",
                (39.892_966, 21.413_249),
                812_000.0,
                240_000,
                &[
                    ("tents-a", "Tents Area A", 0.3),
                    ("tents-b", "Tents Area B", 0.3),
                    ("tents-c", "Tents Area C", 0.3),
                    ("services", "Services Area", 0.1),
                ],
            ),
            site(
                "Jamaraat Bridge",
                (39.873_485, 21.423_65),
                52_000.0,
                100_000,
                &[
                    ("lower", "Lower Level", 0.3),
                    ("middle", "Middle Level", 0.4),
                    ("upper", "Upper Level", 0.3),
                ],
            ),
            site(
                "Arafat",
                (39.984_687, 21.355_461),
                1_456_000.0,
                300_000,
                &[
                    ("jabal", "Jabal al-Rahmah", 0.2),
                    ("nimrah", "Nimrah", 0.3),
                    ("uranah", "Uranah", 0.25),
                    ("other", "Other Areas", 0.25),
                ],
            ),
            site(
                "Muzdalifah",
                (39.936_322, 21.383_082),
                623_000.0,
                250_000,
                &[
                    ("mash", "Al-Mash'ar al-Haram", 0.3),
                    ("north", "Northern Area", 0.35),
                    ("south", "Southern Area", 0.35),
                ],
            ),
            site(
                "Mina Entrance Gate 1",
                (39.887_235, 21.411_856),
                3_000.0,
                15_000,
                &[
                    ("entry", "Entry Points", 0.4),
                    ("security", "Security Check", 0.3),
                    ("waiting", "Waiting Area", 0.3),
                ],
            ),
            site(
                "Tent City Section A",
                (39.889_124, 21.414_501),
                120_000.0,
                80_000,
                &[
                    ("a1", "Block A1", 0.25),
                    ("a2", "Block A2", 0.25),
                    ("a3", "Block A3", 0.25),
                    ("a4", "Block A4", 0.25),
                ],
            ),
            site(
                "Jamarat Central Access",
                (39.871_952, 21.423_85),
                8_000.0,
                30_000,
                &[
                    ("entry", "Entry Zone", 0.4),
                    ("corridor", "Main Corridor", 0.4),
                    ("exit", "Exit Zone", 0.2),
                ],
            ),
        ];

        log::debug!("Built canonical catalog with {} sites", locations.len());
        Self { locations }
    }

    /// Looks up a site by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    /// Returns `true` if the catalog contains a site with the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates sites in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    /// Number of sites in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the catalog is empty (never the case for the
    /// canonical catalog).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Sum of all rated capacities, used to apportion the total pilgrim
    /// count across sites.
    #[must_use]
    pub fn total_capacity(&self) -> u64 {
        self.locations.iter().map(|l| u64::from(l.capacity)).sum()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn site(
    name: &str,
    (lng, lat): (f64, f64),
    area_sq_m: f64,
    capacity: u32,
    sections: &[(&str, &str, f64)],
) -> Location {
    Location {
        name: name.to_string(),
        coordinates: Coordinates { lng, lat },
        area_sq_m,
        capacity,
        sections: sections
            .iter()
            .map(|(id, section_name, share)| Section {
                id: (*id).to_string(),
                name: (*section_name).to_string(),
                share: *share,
            })
            .collect(),
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Congestion-aware shortest-path router over the Hajj site graph.
//!
//! Edge costs are static distances inflated by a penalty keyed to the
//! destination site's density level, so the search prefers longer but
//! calmer paths. Each call is a pure function of the graph, the snapshot
//! set, and the endpoints; nothing is carried between calls.

mod directions;

use pilgrim_nav_crowd::PILGRIM_COUNT_RANGE;
use pilgrim_nav_crowd_models::{DensityLevel, SnapshotSet};
use pilgrim_nav_routing_models::{CrowdImpact, RouteResult};
use pilgrim_nav_sites::{Catalog, SiteGraph};
use thiserror::Error;

/// Average unimpeded walking speed in km/h.
pub const AVG_WALKING_SPEED_KMH: f64 = 4.0;

/// Edge costs are integer milli-km·penalty units so the search compares
/// exact values; at this scale rounding error is below any real distance
/// difference in the catalog.
const COST_SCALE: f64 = 1000.0;

/// Reasons a route request is invalid. Each case carries a distinct,
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Start and destination name the same site.
    #[error("start and destination are the same location: {name}")]
    SameLocation {
        /// The repeated site name.
        name: String,
    },

    /// A requested site is not in the catalog.
    #[error("unknown location: {name}")]
    UnknownLocation {
        /// The unrecognized name.
        name: String,
    },

    /// The static graph has no path between the two sites.
    #[error("no route exists between {start} and {destination}")]
    NoPath {
        /// Requested start site.
        start: String,
        /// Requested destination site.
        destination: String,
    },
}

/// Computes the least-congested route between two catalog sites.
///
/// Dijkstra runs over the penalty-weighted graph; neighbors expand in
/// lexicographic name order, so among equal-cost paths the first found
/// under that order wins, deterministically. A site missing from the
/// snapshot set is treated as low density (logged, never fatal), so a
/// partial snapshot degrades the answer instead of failing it.
///
/// # Errors
///
/// Returns [`RouteError`] when start equals destination, a name is not in
/// the catalog, or no path exists in the static graph.
pub fn compute_route(
    catalog: &Catalog,
    graph: &SiteGraph,
    snapshots: &SnapshotSet,
    start: &str,
    destination: &str,
) -> Result<RouteResult, RouteError> {
    if start == destination {
        return Err(RouteError::SameLocation {
            name: start.to_string(),
        });
    }
    for name in [start, destination] {
        if !catalog.contains(name) {
            return Err(RouteError::UnknownLocation {
                name: name.to_string(),
            });
        }
    }

    log::debug!(
        "Route calculation: {start} ({}) to {destination} ({})",
        level_or_low(snapshots, start),
        level_or_low(snapshots, destination)
    );

    let path = find_path(graph, snapshots, start, destination).ok_or_else(|| {
        RouteError::NoPath {
            start: start.to_string(),
            destination: destination.to_string(),
        }
    })?;

    let aggregate = path
        .iter()
        .map(|site| level_or_low(snapshots, site))
        .max()
        .unwrap_or(DensityLevel::Low);

    let speed_multiplier = aggregate.speed_multiplier();
    let adjusted_speed = AVG_WALKING_SPEED_KMH * speed_multiplier;
    let distance_km = graph.path_distance(&path);
    let duration_minutes = duration_minutes(distance_km, adjusted_speed);

    let direction_lines = directions::assemble(graph, snapshots, &path, aggregate);

    let via = if path.len() > 2 {
        path[1..path.len() - 1].to_vec()
    } else {
        Vec::new()
    };

    Ok(RouteResult {
        start: start.to_string(),
        destination: destination.to_string(),
        via,
        distance_km,
        duration_minutes,
        congestion_level: aggregate,
        adjusted_speed_kmh: adjusted_speed,
        crowd_impact: CrowdImpact::from_speed_multiplier(speed_multiplier),
        pilgrim_count_range: PILGRIM_COUNT_RANGE.to_string(),
        directions: direction_lines,
    })
}

/// Runs the weighted search; falls back to the direct edge if the search
/// finds nothing but the sites are adjacent.
fn find_path(
    graph: &SiteGraph,
    snapshots: &SnapshotSet,
    start: &str,
    destination: &str,
) -> Option<Vec<String>> {
    let searched = pathfinding::prelude::dijkstra(
        &start,
        |&site| {
            graph
                .neighbors(site)
                .map(|(to, distance)| (to, edge_cost(distance, level_or_low(snapshots, to))))
                .collect::<Vec<_>>()
        },
        |&site| site == destination,
    );

    if let Some((path, _cost)) = searched {
        if path.len() > 1 {
            return Some(path.into_iter().map(ToString::to_string).collect());
        }
    }

    if graph.direct_distance(start, destination).is_some() {
        log::warn!("Weighted search found no path {start} -> {destination}; using direct edge");
        return Some(vec![start.to_string(), destination.to_string()]);
    }

    None
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn edge_cost(distance_km: f64, level: DensityLevel) -> u64 {
    (distance_km * level.penalty_multiplier() * COST_SCALE).round() as u64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn duration_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    (distance_km / speed_kmh * 60.0).ceil() as u32
}

fn level_or_low(snapshots: &SnapshotSet, site: &str) -> DensityLevel {
    snapshots.level_of(site).unwrap_or_else(|| {
        log::warn!("No density reading for {site}; assuming low");
        DensityLevel::Low
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pilgrim_nav_crowd_models::DensitySnapshot;
    use pilgrim_nav_sites_models::Coordinates;
    use uuid::Uuid;

    fn snapshot_at(name: &str, level: DensityLevel) -> DensitySnapshot {
        // Density values chosen inside each band so the classification
        // invariant holds for hand-built fixtures.
        let density = match level {
            DensityLevel::Low => 0.1,
            DensityLevel::Medium => 0.5,
            DensityLevel::High => 1.0,
            DensityLevel::Critical => 2.0,
        };
        DensitySnapshot {
            location_name: name.to_string(),
            coordinates: Coordinates { lng: 0.0, lat: 0.0 },
            occupancy: 0.5,
            density,
            density_level: level,
            crowd_size: 1_000,
            capacity: 10_000,
            sections: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    fn snapshot_set(levels: &[(&str, DensityLevel)]) -> SnapshotSet {
        SnapshotSet {
            id: Uuid::new_v4(),
            snapshots: levels
                .iter()
                .map(|(name, level)| snapshot_at(name, *level))
                .collect(),
            generated_at: Utc::now(),
            total_pilgrims: 300_000,
        }
    }

    fn all_low() -> SnapshotSet {
        snapshot_set(&[
            ("Masjid al-Haram", DensityLevel::Low),
            ("Mina", DensityLevel::Low),
            ("Jamaraat Bridge", DensityLevel::Low),
            ("Arafat", DensityLevel::Low),
            ("Muzdalifah", DensityLevel::Low),
        ])
    }

    #[test]
    fn same_location_is_rejected_before_search() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let err = compute_route(&catalog, &graph, &all_low(), "Mina", "Mina").unwrap_err();
        assert_eq!(
            err,
            RouteError::SameLocation {
                name: "Mina".to_string()
            }
        );
    }

    #[test]
    fn unknown_location_is_rejected() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let err = compute_route(&catalog, &graph, &all_low(), "Mina", "Atlantis").unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownLocation {
                name: "Atlantis".to_string()
            }
        );
    }

    #[test]
    fn catalog_site_without_edges_yields_no_path() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let err = compute_route(&catalog, &graph, &all_low(), "Mina", "Tent City Section A")
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::NoPath {
                start: "Mina".to_string(),
                destination: "Tent City Section A".to_string()
            }
        );
    }

    #[test]
    fn critical_destination_scenario() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let snapshots = snapshot_set(&[
            ("Masjid al-Haram", DensityLevel::Low),
            ("Mina", DensityLevel::Low),
            ("Jamaraat Bridge", DensityLevel::Critical),
            ("Arafat", DensityLevel::Low),
            ("Muzdalifah", DensityLevel::Low),
        ]);

        let route =
            compute_route(&catalog, &graph, &snapshots, "Mina", "Jamaraat Bridge").unwrap();

        assert!(route.via.is_empty());
        assert!((route.distance_km - 1.8).abs() < 1e-9);
        assert_eq!(route.congestion_level, DensityLevel::Critical);
        assert!((route.adjusted_speed_kmh - 1.2).abs() < 1e-9);
        assert_eq!(route.duration_minutes, 90);
        assert_eq!(route.crowd_impact, CrowdImpact::Significant);
        assert!(route.directions.iter().any(|line| {
            line.contains("Extremely high crowd density at your destination (Jamaraat Bridge)")
        }));
        // The known-pair micro-directions pick the congested branch.
        assert!(route
            .directions
            .iter()
            .any(|line| line.contains("Jamarat Bridge Eastern Entrance")));
        assert!(route
            .directions
            .iter()
            .any(|line| line.contains("Stay hydrated")));
    }

    #[test]
    fn all_low_routes_stay_calm() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let snapshots = all_low();

        for (start, destination) in [
            ("Mina", "Jamaraat Bridge"),
            ("Masjid al-Haram", "Arafat"),
            ("Muzdalifah", "Mina"),
        ] {
            let route = compute_route(&catalog, &graph, &snapshots, start, destination).unwrap();
            assert_eq!(route.congestion_level, DensityLevel::Low);
            assert!((route.adjusted_speed_kmh - 4.0).abs() < 1e-9);
            assert_eq!(route.crowd_impact, CrowdImpact::Moderate);
            assert!(route
                .directions
                .iter()
                .any(|line| line == "This route avoids high crowd density areas"));
            assert!(!route.directions.iter().any(|line| line.contains("Warning")));
        }
    }

    #[test]
    fn congestion_diverts_around_crowded_sites() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        // Jamaraat critical: the direct Haram->Jamaraat edge costs
        // 7.1 x 5.0 = 35.5, while Haram->Mina->Jamaraat costs
        // 6.2 x 1.0 + 1.8 x 5.0 = 15.2, so the route goes via Mina.
        let snapshots = snapshot_set(&[
            ("Masjid al-Haram", DensityLevel::Low),
            ("Mina", DensityLevel::Low),
            ("Jamaraat Bridge", DensityLevel::Critical),
            ("Arafat", DensityLevel::Low),
            ("Muzdalifah", DensityLevel::Low),
        ]);

        let route = compute_route(
            &catalog,
            &graph,
            &snapshots,
            "Masjid al-Haram",
            "Jamaraat Bridge",
        )
        .unwrap();

        assert_eq!(route.via, vec!["Mina".to_string()]);
        assert!((route.distance_km - 8.0).abs() < 1e-9);
        // Aggregate is still critical: the path ends at the crowded site.
        assert_eq!(route.congestion_level, DensityLevel::Critical);
        assert!(route
            .directions
            .iter()
            .any(|line| line.contains("Continue to Jamaraat Bridge (critical crowd density)")));
    }

    #[test]
    fn aggregate_is_worst_level_on_path() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let snapshots = snapshot_set(&[
            ("Masjid al-Haram", DensityLevel::Medium),
            ("Mina", DensityLevel::High),
            ("Jamaraat Bridge", DensityLevel::Low),
            ("Arafat", DensityLevel::Low),
            ("Muzdalifah", DensityLevel::Low),
        ]);

        let route = compute_route(&catalog, &graph, &snapshots, "Masjid al-Haram", "Mina").unwrap();
        let worst = [route.start.as_str(), "Mina"]
            .iter()
            .map(|site| snapshots.level_of(site).unwrap())
            .max()
            .unwrap();
        assert_eq!(route.congestion_level, worst);
        assert_eq!(route.congestion_level, DensityLevel::High);
        assert!((route.adjusted_speed_kmh - 2.0).abs() < 1e-9);
    }

    #[test]
    fn identical_inputs_yield_identical_routes() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let snapshots = snapshot_set(&[
            ("Masjid al-Haram", DensityLevel::Medium),
            ("Mina", DensityLevel::Low),
            ("Jamaraat Bridge", DensityLevel::High),
            ("Arafat", DensityLevel::Low),
            ("Muzdalifah", DensityLevel::Medium),
        ]);

        let a = compute_route(&catalog, &graph, &snapshots, "Arafat", "Jamaraat Bridge").unwrap();
        let b = compute_route(&catalog, &graph, &snapshots, "Arafat", "Jamaraat Bridge").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_snapshots_degrade_to_low() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let empty = SnapshotSet {
            id: Uuid::new_v4(),
            snapshots: Vec::new(),
            generated_at: Utc::now(),
            total_pilgrims: 300_000,
        };

        let route = compute_route(&catalog, &graph, &empty, "Mina", "Muzdalifah").unwrap();
        assert_eq!(route.congestion_level, DensityLevel::Low);
        assert_eq!(route.duration_minutes, 53);
    }

    #[test]
    fn direct_hop_duration_rounds_up() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        let route = compute_route(&catalog, &graph, &all_low(), "Arafat", "Muzdalifah").unwrap();
        // 8.2 km at 4 km/h = 123 minutes exactly.
        assert_eq!(route.duration_minutes, 123);
        assert!(route
            .directions
            .iter()
            .any(|line| line == "Exit Arafat via the Western Exit Road"));
        assert!(route
            .directions
            .iter()
            .any(|line| line == "Arrive at Muzdalifah"));
    }

    #[test]
    fn unknown_pair_gets_generic_guidance() {
        let catalog = Catalog::canonical();
        let graph = SiteGraph::canonical();
        // Mina -> Masjid al-Haram is adjacent but only the opposite
        // direction has scripted micro-directions.
        let route =
            compute_route(&catalog, &graph, &all_low(), "Mina", "Masjid al-Haram").unwrap();
        assert!(route.via.is_empty());
        assert!(route.directions.iter().any(|line| {
            line == "Head toward Masjid al-Haram following the main pilgrimage route"
        }));
    }
}

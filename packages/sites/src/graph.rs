//! Static walking-distance graph over the routable sites.
//!
//! Distances are direct-path kilometers between named sites. The graph is
//! undirected and small; adjacency is stored per direction so edge weights
//! can later differ by travel direction without a format change.

use std::collections::BTreeMap;

/// Undirected distance graph over routable site names.
///
/// Adjacency uses `BTreeMap` so neighbor iteration is lexicographic by
/// name. The router depends on that order for deterministic tie-breaking
/// between equal-cost paths.
#[derive(Debug, Clone, Default)]
pub struct SiteGraph {
    edges: BTreeMap<String, BTreeMap<String, f64>>,
}

impl SiteGraph {
    /// Builds the canonical graph over the five routable Hajj sites.
    #[must_use]
    pub fn canonical() -> Self {
        let mut graph = Self::default();
        graph.add_edge("Masjid al-Haram", "Mina", 6.2);
        graph.add_edge("Masjid al-Haram", "Arafat", 20.5);
        graph.add_edge("Masjid al-Haram", "Muzdalifah", 12.8);
        graph.add_edge("Masjid al-Haram", "Jamaraat Bridge", 7.1);
        graph.add_edge("Mina", "Arafat", 14.3);
        graph.add_edge("Mina", "Muzdalifah", 3.5);
        graph.add_edge("Mina", "Jamaraat Bridge", 1.8);
        graph.add_edge("Arafat", "Muzdalifah", 8.2);
        graph.add_edge("Arafat", "Jamaraat Bridge", 16.1);
        graph.add_edge("Muzdalifah", "Jamaraat Bridge", 5.3);

        log::debug!(
            "Built canonical site graph with {} routable nodes",
            graph.edges.len()
        );
        graph
    }

    /// Inserts an undirected edge between two sites.
    pub fn add_edge(&mut self, a: &str, b: &str, distance_km: f64) {
        self.edges
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), distance_km);
        self.edges
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), distance_km);
    }

    /// Returns `true` if the site is a node in the graph.
    #[must_use]
    pub fn has_node(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    /// Direct-edge distance between two sites, if adjacent.
    #[must_use]
    pub fn direct_distance(&self, from: &str, to: &str) -> Option<f64> {
        self.edges.get(from)?.get(to).copied()
    }

    /// Neighbors of a site with edge distances, in lexicographic name order.
    ///
    /// Unknown sites yield an empty iterator.
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.edges
            .get(name)
            .into_iter()
            .flat_map(|adjacent| adjacent.iter().map(|(to, d)| (to.as_str(), *d)))
    }

    /// Total distance along a path of site names, summing consecutive direct
    /// edges. Missing edges contribute zero, matching the tolerant summation
    /// the route builder uses.
    #[must_use]
    pub fn path_distance(&self, path: &[String]) -> f64 {
        path.windows(2)
            .map(|pair| self.direct_distance(&pair[0], &pair[1]).unwrap_or(0.0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_graph_is_symmetric() {
        let graph = SiteGraph::canonical();
        for (from, adjacent) in &graph.edges {
            for (to, distance) in adjacent {
                let back = graph.direct_distance(to, from);
                assert_eq!(back, Some(*distance), "edge {from}->{to} not symmetric");
            }
        }
    }

    #[test]
    fn mina_jamaraat_edge_distance() {
        let graph = SiteGraph::canonical();
        let d = graph.direct_distance("Mina", "Jamaraat Bridge").unwrap();
        assert!((d - 1.8).abs() < f64::EPSILON);
    }

    #[test]
    fn neighbors_iterate_lexicographically() {
        let graph = SiteGraph::canonical();
        let names: Vec<&str> = graph.neighbors("Mina").map(|(n, _)| n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn non_routable_site_has_no_node() {
        let graph = SiteGraph::canonical();
        assert!(!graph.has_node("Tent City Section A"));
        assert_eq!(graph.neighbors("Tent City Section A").count(), 0);
    }

    #[test]
    fn path_distance_sums_consecutive_edges() {
        let graph = SiteGraph::canonical();
        let path = vec![
            "Masjid al-Haram".to_string(),
            "Mina".to_string(),
            "Jamaraat Bridge".to_string(),
        ];
        assert!((graph.path_distance(&path) - 8.0).abs() < 1e-9);
    }
}

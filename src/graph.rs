//! Proximity graph over a location store snapshot.
//!
//! Two locations are connected iff their great-circle distance is below the
//! configured threshold. The graph borrows the store immutably and is never
//! mutated after construction; rebuilding on new data replaces the whole
//! snapshot, so in-flight queries keep reading a consistent graph.

use haversine::{distance, Location as HaversineLocation, Units};

use crate::error::RoutecastError;
use crate::models::Location;
use crate::store::LocationStore;
use crate::Result;

/// Great-circle distance between two locations in kilometers.
#[must_use]
pub fn great_circle_km(from: &Location, to: &Location) -> f64 {
    let from_haversine = HaversineLocation {
        latitude: from.latitude,
        longitude: from.longitude,
    };
    let to_haversine = HaversineLocation {
        latitude: to.latitude,
        longitude: to.longitude,
    };
    distance(from_haversine, to_haversine, Units::Kilometers)
}

/// Weighted connection to a neighboring node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Store position of the neighbor
    pub to: usize,
    /// Great-circle distance in kilometers
    pub weight_km: f64,
}

/// Undirected proximity graph over the locations of one store snapshot.
///
/// Node identity is the location's position in the store's load order;
/// adjacency lists are sorted by neighbor name so traversal order is
/// independent of load order.
#[derive(Debug)]
pub struct Graph<'a> {
    store: &'a LocationStore,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
    threshold_km: f64,
}

impl<'a> Graph<'a> {
    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Proximity threshold this graph was built with.
    #[must_use]
    pub fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    /// The store this graph was built over.
    #[must_use]
    pub fn store(&self) -> &'a LocationStore {
        self.store
    }

    /// Node index for a location name, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.store.index_of(name)
    }

    /// Location record for a node index.
    #[must_use]
    pub fn location(&self, node: usize) -> &'a Location {
        self.store.by_index(node)
    }

    /// Outgoing edges of a node, sorted by neighbor name.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[Edge] {
        &self.adjacency[node]
    }

    /// Number of neighbors of a node.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Whether the two named locations are directly connected.
    #[must_use]
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(from), Some(to)) => self.adjacency[from].iter().any(|edge| edge.to == to),
            _ => false,
        }
    }
}

/// Builds a [`Graph`] by connecting all location pairs within a distance
/// threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityGraphBuilder;

impl ProximityGraphBuilder {
    /// Connect every pair of locations closer than `threshold_km`.
    ///
    /// All-pairs by design, so quadratic in store size; callers with large
    /// datasets should pre-bucket spatially before loading a store. Fails
    /// with `EmptyGraph` when fewer than two locations are available.
    ///
    /// The pair is canonicalized by name order before the distance
    /// computation, so the edge set never depends on load order.
    pub fn build(store: &LocationStore, threshold_km: f64) -> Result<Graph<'_>> {
        if store.len() < 2 {
            return Err(RoutecastError::EmptyGraph { count: store.len() });
        }
        if !threshold_km.is_finite() || threshold_km <= 0.0 {
            return Err(RoutecastError::config(format!(
                "proximity threshold must be positive, got {threshold_km}"
            )));
        }

        let node_count = store.len();
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); node_count];
        let mut edge_count = 0;

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let (first, second) = canonical_pair(store.by_index(i), store.by_index(j));
                let weight_km = great_circle_km(first, second);
                if weight_km < threshold_km {
                    adjacency[i].push(Edge { to: j, weight_km });
                    adjacency[j].push(Edge { to: i, weight_km });
                    edge_count += 1;
                }
            }
        }

        for edges in &mut adjacency {
            edges.sort_by(|a, b| store.by_index(a.to).name.cmp(&store.by_index(b.to).name));
        }

        tracing::debug!(
            nodes = node_count,
            edges = edge_count,
            threshold_km,
            "built proximity graph"
        );

        Ok(Graph {
            store,
            adjacency,
            edge_count,
            threshold_km,
        })
    }
}

/// Order a pair of locations by name so the distance call sees the same
/// argument order no matter how the records were loaded.
fn canonical_pair<'a>(a: &'a Location, b: &'a Location) -> (&'a Location, &'a Location) {
    if a.name <= b.name {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_store() -> LocationStore {
        // Roughly 1.1 km between adjacent latitudes at 0.01 degree spacing
        LocationStore::load(vec![
            Location::new("A", 13.00, 80.20),
            Location::new("B", 13.01, 80.20),
            Location::new("C", 13.02, 80.20),
            Location::new("Far", 13.50, 80.20),
        ])
        .unwrap()
    }

    #[test]
    fn test_great_circle_km_known_distance() {
        let a = Location::new("A", 13.00, 80.20);
        let b = Location::new("B", 13.01, 80.20);
        let d = great_circle_km(&a, &b);
        assert!((1.0..1.2).contains(&d), "expected ~1.1 km, got {d}");
    }

    #[test]
    fn test_edges_within_threshold_only() {
        let store = grid_store();
        let graph = ProximityGraphBuilder::build(&store, 1.5).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert!(graph.contains_edge("A", "B"));
        assert!(graph.contains_edge("B", "C"));
        assert!(!graph.contains_edge("A", "C")); // ~2.2 km apart
        assert!(!graph.contains_edge("C", "Far"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_symmetry_with_identical_weight() {
        let store = grid_store();
        let graph = ProximityGraphBuilder::build(&store, 2.5).unwrap();

        for node in 0..graph.node_count() {
            for edge in graph.neighbors(node) {
                let back = graph
                    .neighbors(edge.to)
                    .iter()
                    .find(|e| e.to == node)
                    .expect("missing reverse edge");
                assert_eq!(back.weight_km, edge.weight_km);
            }
        }
    }

    #[test]
    fn test_no_self_loops() {
        let store = grid_store();
        let graph = ProximityGraphBuilder::build(&store, 10.0).unwrap();

        for node in 0..graph.node_count() {
            assert!(graph.neighbors(node).iter().all(|edge| edge.to != node));
        }
    }

    #[test]
    fn test_deterministic_regardless_of_load_order() {
        let forward = LocationStore::load(vec![
            Location::new("A", 13.00, 80.20),
            Location::new("B", 13.01, 80.20),
            Location::new("C", 13.02, 80.20),
        ])
        .unwrap();
        let reversed = LocationStore::load(vec![
            Location::new("C", 13.02, 80.20),
            Location::new("B", 13.01, 80.20),
            Location::new("A", 13.00, 80.20),
        ])
        .unwrap();

        let g1 = ProximityGraphBuilder::build(&forward, 1.5).unwrap();
        let g2 = ProximityGraphBuilder::build(&reversed, 1.5).unwrap();

        assert_eq!(g1.edge_count(), g2.edge_count());
        for (a, b) in [("A", "B"), ("B", "C"), ("A", "C")] {
            assert_eq!(g1.contains_edge(a, b), g2.contains_edge(a, b));
        }

        // Identical weights for the shared edges
        let w1 = g1.neighbors(g1.index_of("A").unwrap())[0].weight_km;
        let w2 = g2.neighbors(g2.index_of("A").unwrap())[0].weight_km;
        assert_eq!(w1, w2);
    }

    #[test]
    fn test_isolated_node_keeps_zero_edges() {
        let store = LocationStore::load(vec![
            Location::new("A", 13.00, 80.20),
            Location::new("Remote", 14.50, 81.00),
        ])
        .unwrap();
        let graph = ProximityGraphBuilder::build(&store, 5.0).unwrap();

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(graph.index_of("Remote").unwrap()), 0);
    }

    #[test]
    fn test_too_few_locations_rejected() {
        let store = LocationStore::load(vec![Location::new("Lonely", 13.0, 80.2)]).unwrap();
        let err = ProximityGraphBuilder::build(&store, 5.0).unwrap_err();
        match err {
            RoutecastError::EmptyGraph { count } => assert_eq!(count, 1),
            other => panic!("expected EmptyGraph, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let store = grid_store();
        assert!(ProximityGraphBuilder::build(&store, 0.0).is_err());
        assert!(ProximityGraphBuilder::build(&store, f64::NAN).is_err());
    }

    #[test]
    fn test_neighbors_sorted_by_name() {
        let store = LocationStore::load(vec![
            Location::new("Hub", 13.000, 80.20),
            Location::new("Zeta", 13.005, 80.20),
            Location::new("Alpha", 12.995, 80.20),
        ])
        .unwrap();
        let graph = ProximityGraphBuilder::build(&store, 2.0).unwrap();

        let hub = graph.index_of("Hub").unwrap();
        let names: Vec<&str> = graph
            .neighbors(hub)
            .iter()
            .map(|edge| graph.location(edge.to).name.as_str())
            .collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
    }
}

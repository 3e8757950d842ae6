//! Shortest-path planning over a proximity graph.
//!
//! `primary_path` runs Dijkstra over the full graph. `alternative_path`
//! re-runs it on a filtered view with the avoidance set removed, falling back
//! to the primary route when the filtered view is disconnected. The planner
//! keeps no state between calls; any number of queries may run concurrently
//! against one graph snapshot.
//!
//! Among equal-weight paths the planner prefers the lexicographically
//! smallest name sequence. Weights are compared with a small epsilon so that
//! geometrically equal alternatives count as ties despite floating-point
//! rounding.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::RoutecastError;
use crate::graph::Graph;
use crate::models::TrafficLevel;
use crate::Result;

/// Accumulated weights within this margin are treated as equal when
/// tie-breaking. Roughly a micron, far above f64 rounding noise at city
/// scale and far below any real distance difference.
const WEIGHT_EPSILON: f64 = 1e-9;

/// How the alternative-path query selects locations to avoid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidancePolicy {
    /// Avoid every location whose current traffic level is High
    #[default]
    HighTraffic,
    /// Avoid exactly the named locations; unknown names are ignored
    Explicit(BTreeSet<String>),
}

/// Whether a result answers the primary or the traffic-avoiding query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    Primary,
    Alternative,
}

/// A computed route between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Location names from start to destination, inclusive
    pub locations: Vec<String>,
    /// Total path weight in kilometers
    pub total_km: f64,
    /// Which query produced this result
    pub kind: PathKind,
    /// True when the avoiding query had no answer and the primary route was
    /// returned instead
    pub fell_back: bool,
}

impl PathResult {
    /// Number of locations on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// A path always contains at least the start location.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Compute the minimum-weight path between two named locations.
///
/// Fails with `NotFound` if either name is absent from the graph, or
/// `NoPath` if the two are not connected.
#[instrument(skip(graph))]
pub fn primary_path(graph: &Graph<'_>, start: &str, destination: &str) -> Result<PathResult> {
    let (start_node, goal_node) = resolve(graph, start, destination)?;
    let blocked = vec![false; graph.node_count()];

    let (path, total_km) = shortest_path(graph, start_node, goal_node, &blocked)
        .ok_or_else(|| RoutecastError::no_path(start, destination))?;

    Ok(PathResult {
        locations: path_names(graph, &path),
        total_km,
        kind: PathKind::Primary,
        fell_back: false,
    })
}

/// Compute the minimum-weight path that avoids the locations selected by
/// `policy`.
///
/// Start and destination are exempt from removal so the query stays
/// answerable. When the filtered view is disconnected — including when an
/// endpoint loses all its edges — the primary route is returned with
/// `fell_back` set.
#[instrument(skip(graph))]
pub fn alternative_path(
    graph: &Graph<'_>,
    start: &str,
    destination: &str,
    policy: &AvoidancePolicy,
) -> Result<PathResult> {
    let (start_node, goal_node) = resolve(graph, start, destination)?;

    let mut blocked = avoidance_mask(graph, policy);
    blocked[start_node] = false;
    blocked[goal_node] = false;

    if let Some((path, total_km)) = shortest_path(graph, start_node, goal_node, &blocked) {
        return Ok(PathResult {
            locations: path_names(graph, &path),
            total_km,
            kind: PathKind::Alternative,
            fell_back: false,
        });
    }

    tracing::debug!(start, destination, "no avoiding path, falling back to primary");

    let unblocked = vec![false; graph.node_count()];
    let (path, total_km) = shortest_path(graph, start_node, goal_node, &unblocked)
        .ok_or_else(|| RoutecastError::no_path(start, destination))?;

    Ok(PathResult {
        locations: path_names(graph, &path),
        total_km,
        kind: PathKind::Alternative,
        fell_back: true,
    })
}

fn resolve(graph: &Graph<'_>, start: &str, destination: &str) -> Result<(usize, usize)> {
    let start_node = graph
        .index_of(start)
        .ok_or_else(|| RoutecastError::not_found(start))?;
    let goal_node = graph
        .index_of(destination)
        .ok_or_else(|| RoutecastError::not_found(destination))?;
    Ok((start_node, goal_node))
}

/// Per-node removal mask for the avoidance policy. The graph itself is
/// untouched; blocked nodes are simply never relaxed during the search.
fn avoidance_mask(graph: &Graph<'_>, policy: &AvoidancePolicy) -> Vec<bool> {
    match policy {
        AvoidancePolicy::HighTraffic => (0..graph.node_count())
            .map(|node| graph.location(node).traffic == TrafficLevel::High)
            .collect(),
        AvoidancePolicy::Explicit(names) => {
            let mut blocked = vec![false; graph.node_count()];
            for name in names {
                if let Some(node) = graph.index_of(name) {
                    blocked[node] = true;
                }
            }
            blocked
        }
    }
}

fn path_names(graph: &Graph<'_>, path: &[usize]) -> Vec<String> {
    path.iter()
        .map(|&node| graph.location(node).name.clone())
        .collect()
}

/// Frontier entry carrying its whole path so equal-cost candidates can be
/// ordered by name sequence. `rank_path` mirrors `path` through the
/// name-rank table, giving a cheap total lexicographic order.
struct Candidate {
    cost: f64,
    rank_path: Vec<usize>,
    path: Vec<usize>,
    node: usize,
}

impl Candidate {
    fn ordering(&self, other: &Self) -> Ordering {
        if (self.cost - other.cost).abs() > WEIGHT_EPSILON {
            self.cost.total_cmp(&other.cost)
        } else {
            self.rank_path
                .cmp(&other.rank_path)
                .then_with(|| self.cost.total_cmp(&other.cost))
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.ordering(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.ordering(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering(other)
    }
}

/// Dijkstra over the graph minus `blocked` nodes.
///
/// Candidates are ordered by (cost, name sequence), so the first time the
/// goal is settled its path is the minimum-weight one and, among ties, the
/// lexicographically smallest. Edge weights are non-negative, so every
/// prefix of an optimal path is settled before the path itself.
fn shortest_path(
    graph: &Graph<'_>,
    start: usize,
    goal: usize,
    blocked: &[bool],
) -> Option<(Vec<usize>, f64)> {
    let node_count = graph.node_count();
    let ranks = name_ranks(graph);
    let mut settled = vec![false; node_count];
    let mut heap = BinaryHeap::new();

    heap.push(Reverse(Candidate {
        cost: 0.0,
        rank_path: vec![ranks[start]],
        path: vec![start],
        node: start,
    }));

    while let Some(Reverse(candidate)) = heap.pop() {
        if settled[candidate.node] {
            continue;
        }
        settled[candidate.node] = true;

        if candidate.node == goal {
            return Some((candidate.path, candidate.cost));
        }

        for edge in graph.neighbors(candidate.node) {
            if settled[edge.to] || blocked[edge.to] {
                continue;
            }
            let mut path = candidate.path.clone();
            path.push(edge.to);
            let mut rank_path = candidate.rank_path.clone();
            rank_path.push(ranks[edge.to]);

            heap.push(Reverse(Candidate {
                cost: candidate.cost + edge.weight_km,
                rank_path,
                path,
                node: edge.to,
            }));
        }
    }

    None
}

/// Rank of each node's name in the sorted name order. Names are unique, so
/// comparing rank sequences equals comparing name sequences.
fn name_ranks(graph: &Graph<'_>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.sort_by(|&a, &b| graph.location(a).name.cmp(&graph.location(b).name));

    let mut ranks = vec![0; graph.node_count()];
    for (rank, node) in order.into_iter().enumerate() {
        ranks[node] = rank;
    }
    ranks
}

//! Nearest-waypoint snapping and shortest-path search.

use crate::error::RouteError;
use crate::geometry::{distance, Point};
use crate::graph::WaypointGraph;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Ordered waypoint ids from start to end, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<String>,
    /// Sum of segment lengths between consecutive nodes, in map units.
    pub length: f64,
}

impl Path {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }
}

/// Closest waypoint to `point` and its distance.
///
/// Scans nodes in configured order and only replaces the candidate on a
/// strictly smaller distance, so the first node wins ties.
pub fn nearest_with_distance<'g>(
    graph: &'g WaypointGraph,
    point: Point,
) -> Result<(&'g str, f64), RouteError> {
    let mut best: Option<(&str, f64)> = None;
    for node in graph.nodes() {
        let d = distance(point, node.position);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((node.id.as_str(), d)),
        }
    }
    best.ok_or(RouteError::NoNodesDefined)
}

/// Closest waypoint to `point`. Never applies a distance threshold.
pub fn nearest(graph: &WaypointGraph, point: Point) -> Result<&str, RouteError> {
    nearest_with_distance(graph, point).map(|(id, _)| id)
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    dist: FloatOrd,
    node: usize,
}

/// Dijkstra search from `start` to `end` over the configured adjacency.
///
/// Stops as soon as `end` is finalized. Neighbors that are not defined
/// waypoints are skipped.
pub fn shortest_path(graph: &WaypointGraph, start: &str, end: &str) -> Result<Path, RouteError> {
    let start_idx = graph
        .index_of(start)
        .ok_or_else(|| RouteError::UnknownNode(start.to_string()))?;
    let end_idx = graph
        .index_of(end)
        .ok_or_else(|| RouteError::UnknownNode(end.to_string()))?;

    if start_idx == end_idx {
        return Ok(Path {
            nodes: vec![start.to_string()],
            length: 0.0,
        });
    }

    let mut dist = vec![f64::INFINITY; graph.len()];
    let mut prev: Vec<Option<usize>> = vec![None; graph.len()];
    let mut finalized = vec![false; graph.len()];
    let mut open_set = BinaryHeap::new();

    dist[start_idx] = 0.0;
    open_set.push(Reverse(OpenNode {
        dist: FloatOrd(0.0),
        node: start_idx,
    }));

    let mut nodes_visited = 0usize;
    let mut reached = false;

    while let Some(Reverse(current)) = open_set.pop() {
        // Stale entry from an earlier, worse relaxation.
        if finalized[current.node] {
            continue;
        }
        finalized[current.node] = true;
        nodes_visited += 1;

        if current.node == end_idx {
            reached = true;
            break;
        }

        let current_pos = graph.node_at(current.node).position;
        for &next in graph.edges_from(current.node) {
            if finalized[next] {
                continue;
            }
            let candidate = current.dist.0 + distance(current_pos, graph.node_at(next).position);
            if candidate < dist[next] {
                dist[next] = candidate;
                prev[next] = Some(current.node);
                open_set.push(Reverse(OpenNode {
                    dist: FloatOrd(candidate),
                    node: next,
                }));
            }
        }
    }

    tracing::debug!(
        from = start,
        to = end,
        nodes_visited,
        reached,
        "waypoint search finished"
    );

    if !reached {
        return Err(RouteError::NoRouteFound {
            from: start.to_string(),
            to: end.to_string(),
        });
    }

    let mut indices = vec![end_idx];
    let mut cursor = end_idx;
    while let Some(previous) = prev[cursor] {
        indices.push(previous);
        cursor = previous;
    }
    indices.reverse();

    if indices.first() != Some(&start_idx) {
        return Err(RouteError::NoRouteFound {
            from: start.to_string(),
            to: end.to_string(),
        });
    }

    Ok(Path {
        nodes: indices
            .into_iter()
            .map(|idx| graph.node_at(idx).id.clone())
            .collect(),
        length: dist[end_idx],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WaypointNode;

    fn graph(nodes: &[(&str, f64, f64)], edges: &[(&str, &str)]) -> WaypointGraph {
        let mut adjacency: Vec<(String, Vec<String>)> = Vec::new();
        for (a, b) in edges {
            for (from, to) in [(a, b), (b, a)] {
                match adjacency.iter_mut().find(|(key, _)| *key == **from) {
                    Some((_, list)) => list.push(to.to_string()),
                    None => adjacency.push((from.to_string(), vec![to.to_string()])),
                }
            }
        }
        WaypointGraph::new(
            nodes
                .iter()
                .map(|(id, x, y)| WaypointNode::new(*id, Point::new(*x, *y)))
                .collect(),
            adjacency,
        )
        .unwrap()
    }

    #[test]
    fn nearest_picks_closest_node() {
        let g = graph(&[("A", 0.0, 0.0), ("B", 100.0, 0.0)], &[]);
        assert_eq!(nearest(&g, Point::new(80.0, 5.0)).unwrap(), "B");
        // No threshold: a far-away query still snaps somewhere.
        assert_eq!(nearest(&g, Point::new(-1e6, 0.0)).unwrap(), "A");
    }

    #[test]
    fn nearest_tie_goes_to_first_configured_node() {
        let g = graph(&[("B", 10.0, 0.0), ("A", -10.0, 0.0)], &[]);
        for _ in 0..5 {
            assert_eq!(nearest(&g, Point::new(0.0, 0.0)).unwrap(), "B");
        }
    }

    #[test]
    fn nearest_on_empty_graph_fails() {
        let g = WaypointGraph::default();
        assert_eq!(
            nearest(&g, Point::new(0.0, 0.0)),
            Err(RouteError::NoNodesDefined)
        );
    }

    #[test]
    fn shortest_path_prefers_shorter_detour() {
        // A-B-D is 20 + 20, A-C-D is 15 + 15 + a long leg.
        let g = graph(
            &[
                ("A", 0.0, 0.0),
                ("B", 20.0, 0.0),
                ("C", 0.0, 15.0),
                ("E", 0.0, 30.0),
                ("D", 40.0, 0.0),
            ],
            &[("A", "B"), ("B", "D"), ("A", "C"), ("C", "E"), ("E", "D")],
        );
        let path = shortest_path(&g, "A", "D").unwrap();
        assert_eq!(path.nodes, ["A", "B", "D"]);
        assert!((path.length - 40.0).abs() < 1e-9);
    }

    #[test]
    fn tentative_distance_is_improved_by_later_relaxation() {
        // P is settled first and offers A at ~11.05; the Q1-Q2 chain later
        // improves A to 10 and the stale heap entry is ignored.
        let g = graph(
            &[
                ("S", 0.0, 0.0),
                ("P", 0.0, 1.0),
                ("Q1", 3.0, 0.0),
                ("Q2", 6.0, 0.0),
                ("A", 10.0, 0.0),
            ],
            &[("S", "P"), ("P", "A"), ("S", "Q1"), ("Q1", "Q2"), ("Q2", "A")],
        );
        let path = shortest_path(&g, "S", "A").unwrap();
        assert_eq!(path.nodes, ["S", "Q1", "Q2", "A"]);
        assert!((path.length - 10.0).abs() < 1e-9);
    }

    #[test]
    fn same_start_and_end_is_single_node() {
        let g = graph(&[("A", 0.0, 0.0), ("B", 1.0, 0.0)], &[("A", "B")]);
        let path = shortest_path(&g, "A", "A").unwrap();
        assert_eq!(path.nodes, ["A"]);
        assert_eq!(path.length, 0.0);
    }

    #[test]
    fn disconnected_pair_is_no_route() {
        let g = graph(
            &[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 5.0, 5.0), ("D", 6.0, 5.0)],
            &[("A", "B"), ("C", "D")],
        );
        assert_eq!(
            shortest_path(&g, "A", "D"),
            Err(RouteError::NoRouteFound {
                from: "A".to_string(),
                to: "D".to_string(),
            })
        );
    }

    #[test]
    fn one_way_adjacency_is_followed_as_configured() {
        let g = WaypointGraph::new(
            vec![
                WaypointNode::new("A", Point::new(0.0, 0.0)),
                WaypointNode::new("B", Point::new(1.0, 0.0)),
            ],
            [("A", vec!["B"])],
        )
        .unwrap();
        assert!(shortest_path(&g, "A", "B").is_ok());
        assert!(matches!(
            shortest_path(&g, "B", "A"),
            Err(RouteError::NoRouteFound { .. })
        ));
    }

    #[test]
    fn dangling_neighbors_are_skipped() {
        let g = WaypointGraph::new(
            vec![
                WaypointNode::new("A", Point::new(0.0, 0.0)),
                WaypointNode::new("B", Point::new(3.0, 4.0)),
            ],
            [("A", vec!["GHOST", "B"]), ("B", vec!["A", "ALSO_GHOST"])],
        )
        .unwrap();
        let path = shortest_path(&g, "A", "B").unwrap();
        assert_eq!(path.nodes, ["A", "B"]);
        assert!((path.length - 5.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let g = graph(&[("A", 0.0, 0.0)], &[]);
        assert_eq!(
            shortest_path(&g, "A", "Z"),
            Err(RouteError::UnknownNode("Z".to_string()))
        );
        assert_eq!(
            shortest_path(&g, "Z", "A"),
            Err(RouteError::UnknownNode("Z".to_string()))
        );
    }
}

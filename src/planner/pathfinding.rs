//! Point-to-point route search over the transport graph
//!
//! Four interchangeable strategies share one result type. An unreachable
//! target is reported as [`PathOutcome::NotFound`], never as an error.

use log::debug;
use ordered_float::OrderedFloat;
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::error::{PlannerError, PlannerResult};
use super::graph::TransportGraph;
use super::types::{NodeId, Road, WeightSelector};

/// Hours (inclusive) during which road traffic multipliers apply
pub const RUSH_HOURS: [(u32, u32); 2] = [(7, 9), (16, 18)];

/// Result of a route query
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    /// Ordered node ids from source to target, both included
    Found { path: Vec<NodeId>, cost: f64 },
    NotFound,
}

impl PathOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found { .. })
    }

    /// Total cost, or `f64::INFINITY` when no path exists
    pub fn cost(&self) -> f64 {
        match self {
            PathOutcome::Found { cost, .. } => *cost,
            PathOutcome::NotFound => f64::INFINITY,
        }
    }

    /// The node sequence, empty when no path exists
    pub fn path(&self) -> &[NodeId] {
        match self {
            PathOutcome::Found { path, .. } => path,
            PathOutcome::NotFound => &[],
        }
    }

    fn from_indices(graph: &TransportGraph, found: Option<(f64, Vec<NodeIndex>)>) -> Self {
        match found {
            Some((cost, nodes)) => PathOutcome::Found {
                path: nodes
                    .into_iter()
                    .map(|index| graph.node_at(index).id.clone())
                    .collect(),
                cost,
            },
            None => PathOutcome::NotFound,
        }
    }
}

/// Search strategy selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    Dijkstra,
    AStar,
    Greedy,
    TimeDependent { hour: u32 },
}

impl PathStrategy {
    /// Parses a strategy name. `hour` is only used by `time_dependent`.
    pub fn from_name(name: &str, hour: u32) -> PlannerResult<Self> {
        match name {
            "dijkstra" => Ok(PathStrategy::Dijkstra),
            "astar" | "a_star" => Ok(PathStrategy::AStar),
            "greedy" => Ok(PathStrategy::Greedy),
            "time_dependent" => Ok(PathStrategy::TimeDependent { hour }),
            other => Err(PlannerError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Runs the chosen strategy
pub fn find_path(
    graph: &TransportGraph,
    strategy: PathStrategy,
    source: impl Into<NodeId>,
    target: impl Into<NodeId>,
    selector: WeightSelector,
) -> PlannerResult<PathOutcome> {
    match strategy {
        PathStrategy::Dijkstra => dijkstra(graph, source, target, selector),
        PathStrategy::AStar => a_star(graph, source, target, selector),
        PathStrategy::Greedy => greedy(graph, source, target, selector),
        PathStrategy::TimeDependent { hour } => {
            time_dependent(graph, source, target, selector, hour)
        }
    }
}

/// Classic Dijkstra over the selected edge weight
pub fn dijkstra(
    graph: &TransportGraph,
    source: impl Into<NodeId>,
    target: impl Into<NodeId>,
    selector: WeightSelector,
) -> PlannerResult<PathOutcome> {
    let (source, target) = (source.into(), target.into());
    let start = graph.resolve(&source)?;
    let goal = graph.resolve(&target)?;

    let found = lowest_cost_path(graph, start, goal, |road| road.weight(selector));
    let outcome = PathOutcome::from_indices(graph, found);
    debug!(
        "dijkstra {} -> {} by {}: cost {}",
        source,
        target,
        selector,
        outcome.cost()
    );
    Ok(outcome)
}

/// A* guided by straight-line distance between node positions.
///
/// The heuristic is only admissible for [`WeightSelector::Distance`]. With
/// travel time it can overestimate, and the returned route may then cost
/// more than the optimum.
pub fn a_star(
    graph: &TransportGraph,
    source: impl Into<NodeId>,
    target: impl Into<NodeId>,
    selector: WeightSelector,
) -> PlannerResult<PathOutcome> {
    let (source, target) = (source.into(), target.into());
    let start = graph.resolve(&source)?;
    let goal = graph.resolve(&target)?;
    let goal_position = graph.node_at(goal).position;

    let found = astar(
        graph.inner(),
        start,
        |node| node == goal,
        |edge| edge.weight().weight(selector),
        |node| graph.node_at(node).position.distance(&goal_position),
    );

    let outcome = PathOutcome::from_indices(graph, found);
    debug!(
        "a* {} -> {} by {}: cost {}",
        source,
        target,
        selector,
        outcome.cost()
    );
    Ok(outcome)
}

/// Always steps to the unvisited neighbor behind the cheapest road.
///
/// There is no backtracking: reaching a node whose neighbors are all
/// visited ends the search with `NotFound`, even if another route exists.
pub fn greedy(
    graph: &TransportGraph,
    source: impl Into<NodeId>,
    target: impl Into<NodeId>,
    selector: WeightSelector,
) -> PlannerResult<PathOutcome> {
    let (source, target) = (source.into(), target.into());
    let start = graph.resolve(&source)?;
    let goal = graph.resolve(&target)?;

    let mut current = start;
    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    let mut cost = 0.0;

    while current != goal {
        let mut best: Option<(NodeIndex, f64)> = None;
        for (_, next, road) in graph.incident(current) {
            if visited.contains(&next) {
                continue;
            }
            let weight = road.weight(selector);
            match best {
                Some((_, lowest)) if weight >= lowest => {}
                _ => best = Some((next, weight)),
            }
        }

        let Some((next, weight)) = best else {
            debug!(
                "greedy {} -> {} stuck at {}",
                source,
                target,
                graph.node_at(current).id
            );
            return Ok(PathOutcome::NotFound);
        };

        visited.insert(next);
        path.push(next);
        cost += weight;
        current = next;
    }

    Ok(PathOutcome::from_indices(graph, Some((cost, path))))
}

/// Dijkstra with rush-hour weights.
///
/// During the rush-hour windows each road costs its selected weight times
/// its static traffic multiplier; otherwise the plain weight is used. The
/// hour is fixed for the whole query.
pub fn time_dependent(
    graph: &TransportGraph,
    source: impl Into<NodeId>,
    target: impl Into<NodeId>,
    selector: WeightSelector,
    hour: u32,
) -> PlannerResult<PathOutcome> {
    if hour > 23 {
        return Err(PlannerError::InvalidHour(hour));
    }
    let (source, target) = (source.into(), target.into());
    let start = graph.resolve(&source)?;
    let goal = graph.resolve(&target)?;

    let rush = is_rush_hour(hour);
    let found = lowest_cost_path(graph, start, goal, |road| {
        let base = road.weight(selector);
        if rush {
            base * road.traffic_multiplier
        } else {
            base
        }
    });

    let outcome = PathOutcome::from_indices(graph, found);
    debug!(
        "time-dependent {} -> {} at {}h (rush: {}): cost {}",
        source,
        target,
        hour,
        rush,
        outcome.cost()
    );
    Ok(outcome)
}

pub fn is_rush_hour(hour: u32) -> bool {
    RUSH_HOURS
        .iter()
        .any(|(first, last)| (*first..=*last).contains(&hour))
}

/// Heap-based Dijkstra between two node indices.
///
/// Roads are relaxed in insertion order and entries with equal cost pop in
/// push order. Returns the total cost
/// and the node sequence, start and goal included.
pub(crate) fn lowest_cost_path<F>(
    graph: &TransportGraph,
    start: NodeIndex,
    goal: NodeIndex,
    weight: F,
) -> Option<(f64, Vec<NodeIndex>)>
where
    F: Fn(&Road) -> f64,
{
    let mut dist = vec![f64::INFINITY; graph.node_count()];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut heap = BinaryHeap::new();
    let mut sequence: u64 = 0;

    dist[start.index()] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), sequence, start)));

    while let Some(Reverse((OrderedFloat(cost), _, node))) = heap.pop() {
        if node == goal {
            return Some((cost, reconstruct(&prev, start, goal)));
        }

        // Skip stale heap entries
        if cost > dist[node.index()] {
            continue;
        }

        for (_, next, road) in graph.incident(node) {
            let next_cost = cost + weight(road);

            if next_cost < dist[next.index()] {
                dist[next.index()] = next_cost;
                prev[next.index()] = Some(node);
                sequence += 1;
                heap.push(Reverse((OrderedFloat(next_cost), sequence, next)));
            }
        }
    }

    None
}

fn reconstruct(prev: &[Option<NodeIndex>], start: NodeIndex, goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match prev[current.index()] {
            Some(previous) => {
                path.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Memoized Dijkstra results for one graph.
///
/// The cache borrows the graph it serves, so it cannot outlive that graph or
/// be pointed at a rebuilt one; a new graph needs a new cache.
pub struct RouteCache<'g> {
    graph: &'g TransportGraph,
    entries: HashMap<(NodeId, NodeId, WeightSelector), PathOutcome>,
}

impl<'g> RouteCache<'g> {
    pub fn new(graph: &'g TransportGraph) -> Self {
        Self {
            graph,
            entries: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &'g TransportGraph {
        self.graph
    }

    /// Dijkstra, answered from the cache when the same query ran before
    pub fn dijkstra(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        selector: WeightSelector,
    ) -> PlannerResult<PathOutcome> {
        let key = (source.into(), target.into(), selector);
        if let Some(outcome) = self.entries.get(&key) {
            debug!("route cache hit for {} -> {} by {}", key.0, key.1, key.2);
            return Ok(outcome.clone());
        }

        let outcome = dijkstra(self.graph, &key.0, &key.1, selector)?;
        self.entries.insert(key, outcome.clone());
        Ok(outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//! Minimum-cost road network design
//!
//! Kruskal over population-adjusted road costs, followed by an optional pass
//! that tries to attach every facility to the resulting network.

use log::{debug, warn};
use ordered_float::OrderedFloat;
use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use super::graph::TransportGraph;
use super::pathfinding::lowest_cost_path;
use super::types::{NodeId, Road};

/// Road attribute the designer minimises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesignCriteria {
    #[default]
    Distance,
    TravelTime,
    /// Average traffic divided by capacity
    Congestion,
}

impl DesignCriteria {
    /// Parses a criteria name; anything unrecognised means distance
    pub fn parse_lenient(name: &str) -> Self {
        match name {
            "travel_time" => DesignCriteria::TravelTime,
            "congestion" => DesignCriteria::Congestion,
            _ => DesignCriteria::Distance,
        }
    }

    pub fn raw_cost(&self, road: &Road) -> f64 {
        match self {
            DesignCriteria::Distance => road.distance,
            DesignCriteria::TravelTime => road.travel_time,
            DesignCriteria::Congestion => road.congestion(),
        }
    }
}

impl From<&str> for DesignCriteria {
    fn from(name: &str) -> Self {
        DesignCriteria::parse_lenient(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DesignWarning {
    /// No road path joins the facility to the designed network
    FacilityUnreachable(NodeId),
}

/// The designed network plus bookkeeping about how it was built
#[derive(Debug, Clone)]
pub struct SpanningNetwork {
    /// Every input node, with only the selected roads
    pub graph: TransportGraph,
    /// Sum of adjusted costs over the spanning forest roads
    pub total_adjusted_cost: f64,
    /// Roads added by the facility pass
    pub spliced_edge_count: usize,
    pub warnings: Vec<DesignWarning>,
}

/// Raw cost damped by `ln(average endpoint population + 1)`.
///
/// Facilities count as population 0. When neither endpoint has a
/// population the damping factor is 0 and the raw cost is returned.
pub fn adjusted_cost(graph: &TransportGraph, road: &Road, criteria: DesignCriteria) -> f64 {
    let population = |id: &NodeId| {
        graph
            .node(id)
            .and_then(|node| node.population)
            .unwrap_or(0.0)
    };
    let average = (population(&road.from) + population(&road.to)) / 2.0;
    let damping = (average + 1.0).ln();
    let raw = criteria.raw_cost(road);

    if damping > 0.0 {
        raw / damping
    } else {
        raw
    }
}

/// Builds a minimum adjusted-cost spanning forest over `graph`.
///
/// With `include_facilities`, each facility that is not connected to the
/// first node of the graph is joined to it along the cheapest original
/// route; facilities with no such route are reported as warnings. The
/// input graph is never modified.
pub fn design_network(
    graph: &TransportGraph,
    criteria: DesignCriteria,
    include_facilities: bool,
) -> SpanningNetwork {
    let inner = graph.inner();
    let mut network = graph.without_roads();

    let mut candidates: Vec<_> = inner
        .edge_references()
        .map(|edge| {
            let cost = adjusted_cost(graph, edge.weight(), criteria);
            (OrderedFloat(cost), edge.source(), edge.target(), edge.weight())
        })
        .collect();
    candidates.sort_by_key(|(cost, _, _, _)| *cost);

    let mut components = UnionFind::<usize>::new(inner.node_count());
    let mut total_adjusted_cost = 0.0;
    for (cost, a, b, road) in candidates {
        if components.union(a.index(), b.index()) {
            network.insert_road(a, b, road.clone());
            total_adjusted_cost += cost.0;
        }
    }

    let mut spliced_edge_count = 0;
    let mut warnings = Vec::new();
    if include_facilities && !graph.is_empty() {
        let reference = NodeIndex::new(0);
        for facility in inner.node_indices() {
            if !inner[facility].is_facility() || facility == reference {
                continue;
            }
            if has_path_connecting(network.inner(), facility, reference, None) {
                continue;
            }

            match lowest_cost_path(graph, facility, reference, |road| criteria.raw_cost(road)) {
                Some((_, path)) => {
                    for pair in path.windows(2) {
                        let (u, v) = (pair[0], pair[1]);
                        if network.inner().find_edge(u, v).is_some() {
                            continue;
                        }
                        if let Some(edge) = inner.find_edge(u, v) {
                            network.insert_road(u, v, inner[edge].clone());
                            spliced_edge_count += 1;
                        }
                    }
                }
                None => {
                    let id = inner[facility].id.clone();
                    warn!("No path connects facility {} to the designed network", id);
                    warnings.push(DesignWarning::FacilityUnreachable(id));
                }
            }
        }
    }

    debug!(
        "Designed network by {:?}: {} of {} roads, adjusted cost {:.3}, {} spliced",
        criteria,
        network.road_count(),
        graph.road_count(),
        total_adjusted_cost,
        spliced_edge_count
    );

    SpanningNetwork {
        graph: network,
        total_adjusted_cost,
        spliced_edge_count,
        warnings,
    }
}

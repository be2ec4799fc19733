//! Transport network graph
//!
//! Nodes are neighborhoods and facilities, edges are undirected roads with
//! traffic-derived travel times. The graph is built once from raw records
//! and is read-only afterwards.

use log::{debug, warn};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::error::{PlannerError, PlannerResult};
use super::records::{
    ExistingRoadRecord, FacilityRecord, NeighborhoodRecord, NetworkData, ProposedRoadRecord,
    TrafficPatternRecord,
};
use super::types::{
    CityNode, NodeId, NodeKind, Position, Road, RoadKind, TrafficSample, DEFAULT_TRAFFIC,
    FACILITY_IMPORTANCE,
};

/// Non-fatal conditions noticed while building a graph
#[derive(Debug, Clone, PartialEq)]
pub enum BuildWarning {
    /// No traffic pattern matched either direction of the road
    DefaultTraffic { from: NodeId, to: NodeId },
    /// A later road record replaced an earlier one between the same nodes
    DuplicateRoad { from: NodeId, to: NodeId },
}

/// Undirected transport network
#[derive(Debug, Clone, Default)]
pub struct TransportGraph {
    /// The underlying petgraph undirected graph
    graph: UnGraph<CityNode, Road>,

    /// Maps node IDs to their indices in the graph
    id_to_node: HashMap<NodeId, NodeIndex>,

    /// Warnings collected while the graph was built
    warnings: Vec<BuildWarning>,
}

impl TransportGraph {
    /// Builds a graph from all five record lists. Any malformed record
    /// aborts the build.
    pub fn build(
        neighborhoods: &[NeighborhoodRecord],
        facilities: &[FacilityRecord],
        existing_roads: &[ExistingRoadRecord],
        new_roads: &[ProposedRoadRecord],
        traffic_patterns: &[TrafficPatternRecord],
    ) -> PlannerResult<Self> {
        let mut builder = GraphBuilder::new(traffic_patterns)?;
        for record in neighborhoods {
            builder.add_neighborhood(record)?;
        }
        for record in facilities {
            builder.add_facility(record)?;
        }
        for record in existing_roads {
            builder.add_existing_road(record)?;
        }
        for record in new_roads {
            builder.add_proposed_road(record)?;
        }
        Ok(builder.finish())
    }

    /// Builds a graph from a bundled data set
    pub fn from_data(data: &NetworkData) -> PlannerResult<Self> {
        Self::build(
            &data.neighborhoods,
            &data.facilities,
            &data.existing_roads,
            &data.new_roads,
            &data.traffic_patterns,
        )
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.id_to_node.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&CityNode> {
        self.id_to_node.get(id).map(|index| &self.graph[*index])
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &CityNode> {
        self.graph.node_weights()
    }

    /// All roads in insertion order
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.graph.edge_weights()
    }

    pub fn facilities(&self) -> impl Iterator<Item = &CityNode> {
        self.nodes().filter(|node| node.is_facility())
    }

    /// Finds the road connecting two nodes, in either direction
    pub fn road_between(&self, a: &NodeId, b: &NodeId) -> Option<&Road> {
        let a = self.id_to_node.get(a)?;
        let b = self.id_to_node.get(b)?;
        self.graph
            .find_edge(*a, *b)
            .map(|edge| &self.graph[edge])
    }

    /// Neighbors of a node with the road leading to each, in road insertion order
    pub fn neighbors(&self, id: &NodeId) -> Option<Vec<(&NodeId, &Road)>> {
        let index = self.id_to_node.get(id)?;
        Some(
            self.incident(*index)
                .into_iter()
                .map(|(_, next, road)| (&self.graph[next].id, road))
                .collect(),
        )
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Resolves a node id, failing with an input error when it is not in the graph
    pub(crate) fn resolve(&self, id: &NodeId) -> PlannerResult<NodeIndex> {
        self.id_to_node
            .get(id)
            .copied()
            .ok_or_else(|| PlannerError::UnknownNode(id.clone()))
    }

    pub(crate) fn inner(&self) -> &UnGraph<CityNode, Road> {
        &self.graph
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &CityNode {
        &self.graph[index]
    }

    /// Roads touching `index` as (edge, other endpoint, road), ordered by
    /// edge index so iteration follows road insertion order.
    pub(crate) fn incident(&self, index: NodeIndex) -> Vec<(EdgeIndex, NodeIndex, &Road)> {
        let mut edges: Vec<_> = self
            .graph
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), other, edge.weight())
            })
            .collect();
        edges.sort_by_key(|(edge, _, _)| *edge);
        edges
    }

    /// A graph with the same nodes (and node indices) but no roads
    pub(crate) fn without_roads(&self) -> Self {
        let mut graph = UnGraph::with_capacity(self.graph.node_count(), 0);
        for node in self.graph.node_weights() {
            graph.add_node(node.clone());
        }
        Self {
            graph,
            id_to_node: self.id_to_node.clone(),
            warnings: Vec::new(),
        }
    }

    /// Adds a copy of a road between two existing node indices
    pub(crate) fn insert_road(&mut self, a: NodeIndex, b: NodeIndex, road: Road) {
        self.graph.update_edge(a, b, road);
    }
}

/// Incremental builder behind [`TransportGraph::build`]
pub struct GraphBuilder<'t> {
    graph: UnGraph<CityNode, Road>,
    id_to_node: HashMap<NodeId, NodeIndex>,
    /// First pattern for each road label
    traffic: HashMap<&'t str, (usize, TrafficSample)>,
    warnings: Vec<BuildWarning>,
}

impl<'t> GraphBuilder<'t> {
    /// Creates a builder, validating and indexing the traffic patterns
    pub fn new(traffic_patterns: &'t [TrafficPatternRecord]) -> PlannerResult<Self> {
        let mut traffic = HashMap::new();
        for (position, pattern) in traffic_patterns.iter().enumerate() {
            let sample = TrafficSample {
                morning: pattern.morning,
                afternoon: pattern.afternoon,
                evening: pattern.evening,
                night: pattern.night,
            };
            for (field, value) in [
                ("morning", sample.morning),
                ("afternoon", sample.afternoon),
                ("evening", sample.evening),
                ("night", sample.night),
            ] {
                non_negative(&pattern.road, field, value)?;
            }
            traffic
                .entry(pattern.road.as_str())
                .or_insert((position, sample));
        }

        Ok(Self {
            graph: UnGraph::default(),
            id_to_node: HashMap::new(),
            traffic,
            warnings: Vec::new(),
        })
    }

    pub fn add_neighborhood(&mut self, record: &NeighborhoodRecord) -> PlannerResult<()> {
        let label = record.id.to_string();
        finite(&label, "population", record.population)?;
        if record.population <= 0.0 {
            return Err(PlannerError::InvalidRecord {
                record: label,
                reason: format!("population must be positive (got {})", record.population),
            });
        }
        finite(&label, "x", record.x)?;
        finite(&label, "y", record.y)?;

        self.add_node(CityNode {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: NodeKind::Neighborhood,
            category: record.category.clone(),
            position: Position::new(record.x, record.y),
            population: Some(record.population),
            importance: record.population.ln(),
        })
    }

    pub fn add_facility(&mut self, record: &FacilityRecord) -> PlannerResult<()> {
        let label = record.id.to_string();
        finite(&label, "longitude", record.longitude)?;
        finite(&label, "latitude", record.latitude)?;

        self.add_node(CityNode {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: NodeKind::Facility,
            category: record.category.clone(),
            position: Position::new(record.longitude, record.latitude),
            population: None,
            importance: FACILITY_IMPORTANCE,
        })
    }

    pub fn add_existing_road(&mut self, record: &ExistingRoadRecord) -> PlannerResult<()> {
        let label = format!("{}-{}", record.from_id, record.to_id);
        finite(&label, "condition", record.condition)?;
        self.add_road(
            &label,
            &record.from_id,
            &record.to_id,
            record.distance_km,
            record.capacity,
            record.traffic_multiplier,
            RoadKind::Existing {
                condition: record.condition,
            },
        )
    }

    pub fn add_proposed_road(&mut self, record: &ProposedRoadRecord) -> PlannerResult<()> {
        let label = format!("{}-{}", record.from, record.to);
        non_negative(&label, "cost", record.cost)?;
        self.add_road(
            &label,
            &record.from,
            &record.to,
            record.distance,
            record.capacity,
            record.traffic_multiplier,
            RoadKind::Proposed {
                construction_cost: record.cost,
            },
        )
    }

    pub fn finish(self) -> TransportGraph {
        debug!(
            "Built transport graph: {} nodes, {} roads, {} warnings",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.warnings.len()
        );
        TransportGraph {
            graph: self.graph,
            id_to_node: self.id_to_node,
            warnings: self.warnings,
        }
    }

    fn add_node(&mut self, node: CityNode) -> PlannerResult<()> {
        if node.id.as_str().is_empty() {
            return Err(PlannerError::InvalidRecord {
                record: node.name.clone(),
                reason: "node id is empty".to_string(),
            });
        }
        if self.id_to_node.contains_key(&node.id) {
            return Err(PlannerError::DuplicateNode(node.id));
        }

        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.id_to_node.insert(id, index);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn add_road(
        &mut self,
        label: &str,
        from: &NodeId,
        to: &NodeId,
        distance: f64,
        capacity: f64,
        traffic_multiplier: f64,
        kind: RoadKind,
    ) -> PlannerResult<()> {
        non_negative(label, "distance", distance)?;
        non_negative(label, "capacity", capacity)?;
        non_negative(label, "traffic_multiplier", traffic_multiplier)?;
        if capacity == 0.0 {
            return Err(PlannerError::InvalidRecord {
                record: label.to_string(),
                reason: "capacity must be greater than zero".to_string(),
            });
        }
        if from == to {
            return Err(PlannerError::SelfLoop(from.clone()));
        }

        let endpoint = |id: &NodeId| {
            self.id_to_node
                .get(id)
                .copied()
                .ok_or_else(|| PlannerError::UnknownRoadEndpoint {
                    from: from.clone(),
                    to: to.clone(),
                    missing: id.clone(),
                })
        };
        let start = endpoint(from)?;
        let end = endpoint(to)?;

        let traffic = match self.traffic_for(from, to) {
            Some(sample) => sample,
            None => {
                warn!("No traffic pattern for road {}, using default sample", label);
                self.warnings.push(BuildWarning::DefaultTraffic {
                    from: from.clone(),
                    to: to.clone(),
                });
                DEFAULT_TRAFFIC
            }
        };

        if self.graph.find_edge(start, end).is_some() {
            warn!("Road {} was defined more than once, keeping the last record", label);
            self.warnings.push(BuildWarning::DuplicateRoad {
                from: from.clone(),
                to: to.clone(),
            });
        }

        let road = Road::new(
            from.clone(),
            to.clone(),
            distance,
            capacity,
            traffic,
            kind,
            traffic_multiplier,
        );
        self.graph.update_edge(start, end, road);
        Ok(())
    }

    /// Looks up both directed labels; the pattern listed first wins
    fn traffic_for(&self, from: &NodeId, to: &NodeId) -> Option<TrafficSample> {
        let forward = self.traffic.get(format!("{}-{}", from, to).as_str());
        let backward = self.traffic.get(format!("{}-{}", to, from).as_str());
        match (forward, backward) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a.1 } else { b.1 }),
            (Some(a), None) => Some(a.1),
            (None, Some(b)) => Some(b.1),
            (None, None) => None,
        }
    }
}

fn finite(record: &str, field: &'static str, value: f64) -> PlannerResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlannerError::InvalidRecord {
            record: record.to_string(),
            reason: format!("{} is not a finite number", field),
        })
    }
}

fn non_negative(record: &str, field: &'static str, value: f64) -> PlannerResult<()> {
    finite(record, field, value)?;
    if value < 0.0 {
        return Err(PlannerError::NegativeValue {
            record: record.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

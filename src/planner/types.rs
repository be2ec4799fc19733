//! Core types for the transport network
//!
//! Node and road attributes plus the small enums used to pick edge weights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PlannerError;

/// Importance assigned to every facility node
pub const FACILITY_IMPORTANCE: f64 = 3.0;

/// Traffic sample used when no pattern matches a road
pub const DEFAULT_TRAFFIC: TrafficSample = TrafficSample {
    morning: 1000.0,
    afternoon: 800.0,
    evening: 900.0,
    night: 500.0,
};

/// A node identifier. Source data mixes numeric and string ids, so
/// everything is normalised to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl From<&String> for NodeId {
    fn from(value: &String) -> Self {
        NodeId(value.clone())
    }
}

impl From<&NodeId> for NodeId {
    fn from(value: &NodeId) -> Self {
        value.clone()
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        NodeId(value.to_string())
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        NodeId(value.to_string())
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId(value.to_string())
    }
}

/// A 2D map position (x/y for neighborhoods, longitude/latitude for facilities)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// What a node represents in the city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Neighborhood,
    Facility,
}

/// A neighborhood or facility in the network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Free-form label from the source data (e.g. "Residential", "Medical")
    pub category: String,
    pub position: Position,
    /// Only neighborhoods carry a population
    pub population: Option<f64>,
    pub importance: f64,
}

impl CityNode {
    pub fn is_facility(&self) -> bool {
        self.kind == NodeKind::Facility
    }
}

/// Vehicle counts for the four time-of-day buckets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub night: f64,
}

impl TrafficSample {
    pub fn average(&self) -> f64 {
        (self.morning + self.afternoon + self.evening + self.night) / 4.0
    }
}

/// Whether a road exists today or is a construction proposal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RoadKind {
    Existing { condition: f64 },
    Proposed { construction_cost: f64 },
}

/// An undirected road between two nodes.
///
/// `avg_traffic` and `travel_time` are derived once when the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
    pub capacity: f64,
    pub traffic: TrafficSample,
    pub avg_traffic: f64,
    pub travel_time: f64,
    pub kind: RoadKind,
    /// Static weight multiplier applied during rush hours
    pub traffic_multiplier: f64,
}

impl Road {
    pub fn new(
        from: NodeId,
        to: NodeId,
        distance: f64,
        capacity: f64,
        traffic: TrafficSample,
        kind: RoadKind,
        traffic_multiplier: f64,
    ) -> Self {
        let avg_traffic = traffic.average();
        let travel_time = distance * (1.0 + avg_traffic / capacity);

        Self {
            from,
            to,
            distance,
            capacity,
            traffic,
            avg_traffic,
            travel_time,
            kind,
            traffic_multiplier,
        }
    }

    /// Congestion ratio used by the network designer
    pub fn congestion(&self) -> f64 {
        self.avg_traffic / self.capacity
    }

    pub fn weight(&self, selector: WeightSelector) -> f64 {
        match selector {
            WeightSelector::Distance => self.distance,
            WeightSelector::TravelTime => self.travel_time,
        }
    }

    pub fn is_proposed(&self) -> bool {
        matches!(self.kind, RoadKind::Proposed { .. })
    }
}

/// Edge attribute used as the cost of a path query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightSelector {
    Distance,
    TravelTime,
}

impl FromStr for WeightSelector {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(WeightSelector::Distance),
            "travel_time" => Ok(WeightSelector::TravelTime),
            other => Err(PlannerError::UnknownWeightSelector(other.to_string())),
        }
    }
}

impl fmt::Display for WeightSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightSelector::Distance => f.write_str("distance"),
            WeightSelector::TravelTime => f.write_str("travel_time"),
        }
    }
}

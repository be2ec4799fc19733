//! Raw input records consumed by the graph builder
//!
//! Field names follow the city data files; a record is only validated when
//! it is turned into a graph node or road.

use serde::{Deserialize, Deserializer};

use super::types::NodeId;

fn default_multiplier() -> f64 {
    1.0
}

/// Ids appear as JSON numbers for neighborhoods and as strings elsewhere
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn node_id<'de, D>(deserializer: D) -> Result<NodeId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => NodeId(text),
        RawId::Number(number) => NodeId::from(number),
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeighborhoodRecord {
    #[serde(rename = "ID", deserialize_with = "node_id")]
    pub id: NodeId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Population")]
    pub population: f64,
    #[serde(rename = "Type")]
    pub category: String,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacilityRecord {
    #[serde(deserialize_with = "node_id")]
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExistingRoadRecord {
    #[serde(deserialize_with = "node_id")]
    pub from_id: NodeId,
    #[serde(deserialize_with = "node_id")]
    pub to_id: NodeId,
    pub distance_km: f64,
    pub capacity: f64,
    pub condition: f64,
    #[serde(default = "default_multiplier")]
    pub traffic_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProposedRoadRecord {
    #[serde(deserialize_with = "node_id")]
    pub from: NodeId,
    #[serde(deserialize_with = "node_id")]
    pub to: NodeId,
    pub distance: f64,
    pub capacity: f64,
    pub cost: f64,
    #[serde(default = "default_multiplier")]
    pub traffic_multiplier: f64,
}

/// Traffic counts for one directed road label such as `"3-F1"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrafficPatternRecord {
    pub road: String,
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub night: f64,
}

/// Every record list needed to build a network, as stored in one data file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkData {
    pub neighborhoods: Vec<NeighborhoodRecord>,
    pub facilities: Vec<FacilityRecord>,
    pub existing_roads: Vec<ExistingRoadRecord>,
    pub new_roads: Vec<ProposedRoadRecord>,
    pub traffic_patterns: Vec<TrafficPatternRecord>,
}

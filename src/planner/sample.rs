//! Built-in sample data: a small slice of the Greater Cairo network

use std::collections::BTreeMap;

use super::allocation::{MaintenanceCandidate, TransitLine};
use super::records::{
    ExistingRoadRecord, FacilityRecord, NeighborhoodRecord, NetworkData, ProposedRoadRecord,
    TrafficPatternRecord,
};
use super::signal::Direction;
use super::types::NodeId;

fn neighborhood(
    id: u32,
    name: &str,
    population: f64,
    category: &str,
    x: f64,
    y: f64,
) -> NeighborhoodRecord {
    NeighborhoodRecord {
        id: NodeId::from(id),
        name: name.to_string(),
        population,
        category: category.to_string(),
        x,
        y,
    }
}

fn facility(
    id: &str,
    name: &str,
    category: &str,
    longitude: f64,
    latitude: f64,
) -> FacilityRecord {
    FacilityRecord {
        id: NodeId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        longitude,
        latitude,
    }
}

fn existing(
    from: &str,
    to: &str,
    distance_km: f64,
    capacity: f64,
    condition: f64,
) -> ExistingRoadRecord {
    ExistingRoadRecord {
        from_id: NodeId::from(from),
        to_id: NodeId::from(to),
        distance_km,
        capacity,
        condition,
        traffic_multiplier: 1.0,
    }
}

fn proposed(from: &str, to: &str, distance: f64, capacity: f64, cost: f64) -> ProposedRoadRecord {
    ProposedRoadRecord {
        from: NodeId::from(from),
        to: NodeId::from(to),
        distance,
        capacity,
        cost,
        traffic_multiplier: 1.0,
    }
}

fn pattern(
    road: &str,
    morning: f64,
    afternoon: f64,
    evening: f64,
    night: f64,
) -> TrafficPatternRecord {
    TrafficPatternRecord {
        road: road.to_string(),
        morning,
        afternoon,
        evening,
        night,
    }
}

/// Six neighborhoods, three facilities, existing and proposed roads
pub fn sample_network() -> NetworkData {
    let mut data = NetworkData {
        neighborhoods: vec![
            neighborhood(1, "Maadi", 250_000.0, "Residential", 31.25, 29.96),
            neighborhood(2, "Nasr City", 500_000.0, "Mixed", 31.34, 30.06),
            neighborhood(3, "Downtown Cairo", 100_000.0, "Business", 31.24, 30.04),
            neighborhood(4, "New Cairo", 300_000.0, "Residential", 31.47, 30.03),
            neighborhood(5, "Heliopolis", 200_000.0, "Mixed", 31.32, 30.09),
            neighborhood(6, "Zamalek", 50_000.0, "Residential", 31.22, 30.06),
        ],
        facilities: vec![
            facility("F1", "Cairo International Airport", "Airport", 31.41, 30.11),
            facility("F2", "Ramses Railway Station", "Transit Hub", 31.25, 30.06),
            facility("F9", "Qasr El Aini Hospital", "Medical", 31.23, 30.03),
        ],
        existing_roads: vec![
            existing("1", "3", 8.5, 3000.0, 7.0),
            existing("2", "3", 5.9, 2500.0, 8.0),
            existing("2", "5", 4.0, 2800.0, 9.0),
            existing("3", "5", 6.1, 3200.0, 7.0),
            existing("3", "6", 3.2, 2000.0, 8.0),
            existing("4", "2", 15.2, 3800.0, 9.0),
            existing("5", "F1", 7.5, 3500.0, 9.0),
            existing("3", "F2", 2.5, 2500.0, 7.0),
            existing("6", "F2", 3.3, 2200.0, 8.0),
            existing("3", "F9", 1.5, 2000.0, 6.0),
        ],
        new_roads: vec![
            proposed("1", "4", 22.8, 4000.0, 450.0),
            proposed("6", "5", 7.5, 3000.0, 280.0),
        ],
        traffic_patterns: vec![
            pattern("1-3", 2800.0, 1500.0, 2600.0, 800.0),
            pattern("2-3", 2300.0, 1800.0, 2200.0, 700.0),
            pattern("5-2", 2000.0, 1600.0, 1900.0, 600.0),
            pattern("3-6", 1800.0, 1200.0, 1700.0, 500.0),
            pattern("4-2", 3000.0, 2000.0, 2800.0, 900.0),
            pattern("5-F1", 2500.0, 1900.0, 2300.0, 1000.0),
            pattern("1-4", 1200.0, 900.0, 1100.0, 400.0),
        ],
    };

    // Downtown roads slow down sharply during rush hours
    for road in data.existing_roads.iter_mut() {
        if road.from_id.as_str() == "1" && road.to_id.as_str() == "3" {
            road.traffic_multiplier = 2.5;
        }
        if road.from_id.as_str() == "2" && road.to_id.as_str() == "3" {
            road.traffic_multiplier = 1.8;
        }
    }

    data
}

/// Metro lines competing for the same operating window
pub fn sample_transit_lines() -> Vec<TransitLine> {
    vec![
        TransitLine::new("M1", 6, 22, 1_500_000),
        TransitLine::new("M2", 7, 23, 1_200_000),
        TransitLine::new("B14", 5, 9, 300_000),
        TransitLine::new("B22", 16, 20, 420_000),
    ]
}

/// Roads awaiting repair, labelled by the node pair they connect
pub fn sample_maintenance_candidates() -> Vec<MaintenanceCandidate> {
    vec![
        MaintenanceCandidate::new("1-3", 500, 7),
        MaintenanceCandidate::new("2-5", 300, 9),
        MaintenanceCandidate::new("3-6", 200, 5),
    ]
}

/// Waiting cars at a busy intersection
pub fn sample_car_counts() -> BTreeMap<Direction, u64> {
    BTreeMap::from([
        (Direction::North, 50),
        (Direction::South, 30),
        (Direction::East, 70),
        (Direction::West, 20),
    ])
}

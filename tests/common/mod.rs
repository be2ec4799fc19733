//! Shared builders for hand-crafted and random test networks

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use transit_planner::planner::{
    ExistingRoadRecord, FacilityRecord, NeighborhoodRecord, NodeId, ProposedRoadRecord,
    TrafficPatternRecord, TransportGraph,
};

pub fn neighborhood(id: &str, population: f64, x: f64, y: f64) -> NeighborhoodRecord {
    NeighborhoodRecord {
        id: NodeId::from(id),
        name: format!("Area {}", id),
        population,
        category: "Residential".to_string(),
        x,
        y,
    }
}

pub fn facility(id: &str, x: f64, y: f64) -> FacilityRecord {
    FacilityRecord {
        id: NodeId::from(id),
        name: format!("Facility {}", id),
        category: "Medical".to_string(),
        longitude: x,
        latitude: y,
    }
}

pub fn road(from: &str, to: &str, distance_km: f64, capacity: f64) -> ExistingRoadRecord {
    ExistingRoadRecord {
        from_id: NodeId::from(from),
        to_id: NodeId::from(to),
        distance_km,
        capacity,
        condition: 7.0,
        traffic_multiplier: 1.0,
    }
}

pub fn proposed(
    from: &str,
    to: &str,
    distance: f64,
    capacity: f64,
    cost: f64,
) -> ProposedRoadRecord {
    ProposedRoadRecord {
        from: NodeId::from(from),
        to: NodeId::from(to),
        distance,
        capacity,
        cost,
        traffic_multiplier: 1.0,
    }
}

pub fn pattern(label: &str, counts: [f64; 4]) -> TrafficPatternRecord {
    TrafficPatternRecord {
        road: label.to_string(),
        morning: counts[0],
        afternoon: counts[1],
        evening: counts[2],
        night: counts[3],
    }
}

/// Graph of neighborhoods and existing roads only
pub fn simple_graph(
    neighborhoods: &[NeighborhoodRecord],
    roads: &[ExistingRoadRecord],
) -> TransportGraph {
    TransportGraph::build(neighborhoods, &[], roads, &[], &[]).expect("test graph should build")
}

/// Diamond with a cheap-looking first step that leads the long way round.
///
/// ```text
///        B --10-- D
///       /          \
///  A --1            1-- E
///       \          /
///        C --2----
/// ```
pub fn diamond_graph() -> TransportGraph {
    simple_graph(
        &[
            neighborhood("A", 1000.0, 0.0, 0.0),
            neighborhood("B", 1000.0, 1.0, 1.0),
            neighborhood("C", 1000.0, 1.0, -1.0),
            neighborhood("D", 1000.0, 2.0, 1.0),
            neighborhood("E", 1000.0, 3.0, 0.0),
        ],
        &[
            road("A", "B", 1.0, 1000.0),
            road("A", "C", 2.0, 1000.0),
            road("B", "D", 10.0, 1000.0),
            road("D", "E", 1.0, 1000.0),
            road("C", "E", 2.0, 1000.0),
        ],
    )
}

/// A random connected-or-not network whose road lengths are never shorter
/// than the straight line between their endpoints.
pub fn random_graph(seed: u64, node_count: usize) -> TransportGraph {
    let mut rng = StdRng::seed_from_u64(seed);

    let neighborhoods: Vec<NeighborhoodRecord> = (0..node_count)
        .map(|i| {
            neighborhood(
                &format!("n{}", i),
                rng.random_range(1_000.0..1_000_000.0),
                rng.random_range(0.0..10.0),
                rng.random_range(0.0..10.0),
            )
        })
        .collect();

    let mut roads = Vec::new();
    let mut patterns = Vec::new();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if !rng.random_bool(0.5) {
                continue;
            }
            let (a, b) = (&neighborhoods[i], &neighborhoods[j]);
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let straight = (dx * dx + dy * dy).sqrt();
            let from = format!("n{}", i);
            let to = format!("n{}", j);
            roads.push(road(
                &from,
                &to,
                straight * rng.random_range(1.0..2.0),
                rng.random_range(500.0..4000.0),
            ));
            patterns.push(pattern(
                &format!("{}-{}", from, to),
                [
                    rng.random_range(0.0..3000.0),
                    rng.random_range(0.0..3000.0),
                    rng.random_range(0.0..3000.0),
                    rng.random_range(0.0..3000.0),
                ],
            ));
        }
    }

    TransportGraph::build(&neighborhoods, &[], &roads, &[], &patterns)
        .expect("random graph should build")
}

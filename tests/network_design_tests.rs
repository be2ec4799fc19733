//! Network design validation
//!
//! Small random networks are checked against every possible spanning
//! selection.

mod common;

use common::{facility, neighborhood, random_graph, road, simple_graph};
use petgraph::unionfind::UnionFind;
use transit_planner::planner::{
    adjusted_cost, design_network, dijkstra, sample_network, DesignCriteria, DesignWarning,
    NodeId, Road, TransportGraph, WeightSelector,
};

const EPSILON: f64 = 1e-9;

fn node_position(graph: &TransportGraph, id: &NodeId) -> usize {
    graph
        .nodes()
        .position(|node| &node.id == id)
        .expect("road endpoint must be a node")
}

/// Number of connected components, via union-find over the roads
fn component_count(graph: &TransportGraph) -> usize {
    let mut components = UnionFind::<usize>::new(graph.node_count());
    let mut merges = 0;
    for road in graph.roads() {
        if components.union(node_position(graph, &road.from), node_position(graph, &road.to)) {
            merges += 1;
        }
    }
    graph.node_count() - merges
}

/// Cheapest total adjusted cost over every maximal acyclic road selection
fn brute_force_forest_cost(graph: &TransportGraph, criteria: DesignCriteria) -> f64 {
    let roads: Vec<&Road> = graph.roads().collect();
    let target_size = graph.node_count() - component_count(graph);
    let mut best = f64::INFINITY;

    for mask in 0u32..(1 << roads.len()) {
        if mask.count_ones() as usize != target_size {
            continue;
        }
        let mut components = UnionFind::<usize>::new(graph.node_count());
        let mut acyclic = true;
        let mut cost = 0.0;
        for (i, road) in roads.iter().enumerate() {
            if mask & (1 << i) == 0 {
                continue;
            }
            let a = node_position(graph, &road.from);
            let b = node_position(graph, &road.to);
            if !components.union(a, b) {
                acyclic = false;
                break;
            }
            cost += adjusted_cost(graph, road, criteria);
        }
        if acyclic {
            best = best.min(cost);
        }
    }
    best
}

#[test]
fn test_design_matches_brute_force() {
    for seed in 0..30 {
        let graph = random_graph(seed, 6);
        for criteria in [
            DesignCriteria::Distance,
            DesignCriteria::TravelTime,
            DesignCriteria::Congestion,
        ] {
            let network = design_network(&graph, criteria, false);
            let expected = brute_force_forest_cost(&graph, criteria);
            let total: f64 = network
                .graph
                .roads()
                .map(|road| adjusted_cost(&graph, road, criteria))
                .sum();

            assert!(
                (network.total_adjusted_cost - expected).abs() < 1e-6,
                "seed {} {:?}: got {} expected {}",
                seed,
                criteria,
                network.total_adjusted_cost,
                expected
            );
            assert!((total - network.total_adjusted_cost).abs() < 1e-6);
        }
    }
}

#[test]
fn test_design_is_acyclic_and_spans_components() {
    for seed in 50..80 {
        let graph = random_graph(seed, 6);
        let network = design_network(&graph, DesignCriteria::Distance, true);

        assert_eq!(network.graph.node_count(), graph.node_count());
        assert_eq!(component_count(&network.graph), component_count(&graph));
        assert_eq!(
            network.graph.road_count(),
            graph.node_count() - component_count(&graph)
        );

        let ids: Vec<NodeId> = graph.nodes().map(|node| node.id.clone()).collect();
        for a in &ids {
            for b in &ids {
                let original = dijkstra(&graph, a, b, WeightSelector::Distance).unwrap();
                let designed = dijkstra(&network.graph, a, b, WeightSelector::Distance).unwrap();
                assert_eq!(original.is_found(), designed.is_found());
            }
        }
    }
}

#[test]
fn test_population_damping_prefers_busy_areas() {
    // Both routes to "c" cost the same raw distance, but "big" is far more
    // populous, so its road is the cheaper one after adjustment.
    let graph = simple_graph(
        &[
            neighborhood("hub", 1000.0, 0.0, 0.0),
            neighborhood("big", 900_000.0, 1.0, 0.0),
            neighborhood("small", 2000.0, 0.0, 1.0),
            neighborhood("c", 1000.0, 1.0, 1.0),
        ],
        &[
            road("hub", "big", 5.0, 1000.0),
            road("hub", "small", 5.0, 1000.0),
            road("big", "c", 6.0, 1000.0),
            road("small", "c", 5.5, 1000.0),
        ],
    );

    let network = design_network(&graph, DesignCriteria::Distance, false);
    assert_eq!(network.graph.road_count(), 3);
    assert!(network
        .graph
        .road_between(&NodeId::from("big"), &NodeId::from("c"))
        .is_some());
    assert!(network
        .graph
        .road_between(&NodeId::from("small"), &NodeId::from("c"))
        .is_none());
}

#[test]
fn test_adjusted_cost_formula() {
    let graph = TransportGraph::build(
        &[
            neighborhood("a", 1000.0, 0.0, 0.0),
            neighborhood("b", 3000.0, 1.0, 0.0),
        ],
        &[facility("F", 2.0, 0.0), facility("G", 3.0, 0.0)],
        &[
            road("a", "b", 10.0, 1000.0),
            road("b", "F", 4.0, 1000.0),
            road("F", "G", 2.0, 1000.0),
        ],
        &[],
        &[],
    )
    .unwrap();

    let between = |x: &str, y: &str| {
        graph
            .road_between(&NodeId::from(x), &NodeId::from(y))
            .unwrap()
    };

    let cost = adjusted_cost(&graph, between("a", "b"), DesignCriteria::Distance);
    assert!((cost - 10.0 / 2001f64.ln()).abs() < EPSILON);

    // Facilities count as zero population
    let cost = adjusted_cost(&graph, between("b", "F"), DesignCriteria::Distance);
    assert!((cost - 4.0 / 1501f64.ln()).abs() < EPSILON);

    // Two facilities leave the raw cost untouched
    let cost = adjusted_cost(&graph, between("F", "G"), DesignCriteria::Distance);
    assert!((cost - 2.0).abs() < EPSILON);

    let road = between("a", "b");
    let cost = adjusted_cost(&graph, road, DesignCriteria::Congestion);
    assert!((cost - road.congestion() / 2001f64.ln()).abs() < EPSILON);
}

#[test]
fn test_unknown_criteria_falls_back_to_distance() {
    assert_eq!(DesignCriteria::parse_lenient("congestion"), DesignCriteria::Congestion);
    assert_eq!(DesignCriteria::parse_lenient("travel_time"), DesignCriteria::TravelTime);
    assert_eq!(DesignCriteria::parse_lenient("scenic"), DesignCriteria::Distance);
    assert_eq!(DesignCriteria::from("anything"), DesignCriteria::Distance);
}

#[test]
fn test_isolated_facility_is_a_warning() {
    let graph = TransportGraph::build(
        &[
            neighborhood("1", 1000.0, 0.0, 0.0),
            neighborhood("2", 2000.0, 1.0, 0.0),
        ],
        &[facility("F1", 5.0, 5.0), facility("F2", 2.0, 0.0)],
        &[road("1", "2", 1.0, 1000.0), road("2", "F2", 1.0, 1000.0)],
        &[],
        &[],
    )
    .unwrap();

    let network = design_network(&graph, DesignCriteria::Distance, true);
    assert_eq!(
        network.warnings,
        vec![DesignWarning::FacilityUnreachable(NodeId::from("F1"))]
    );
    assert_eq!(network.spliced_edge_count, 0);
    assert_eq!(network.graph.road_count(), 2);
    assert!(network.graph.contains(&NodeId::from("F1")));

    let without = design_network(&graph, DesignCriteria::Distance, false);
    assert!(without.warnings.is_empty());
}

#[test]
fn test_design_leaves_input_untouched() {
    let graph = TransportGraph::from_data(&sample_network()).unwrap();
    let roads_before: Vec<Road> = graph.roads().cloned().collect();

    let network = design_network(&graph, DesignCriteria::TravelTime, true);

    let roads_after: Vec<Road> = graph.roads().cloned().collect();
    assert_eq!(roads_before, roads_after);
    assert_eq!(network.graph.road_count(), graph.node_count() - 1);
    assert!(network.warnings.is_empty());

    // Selected roads keep their original attributes
    for road in network.graph.roads() {
        assert_eq!(graph.road_between(&road.from, &road.to), Some(road));
    }
}

#[test]
fn test_design_is_idempotent() {
    let graph = TransportGraph::from_data(&sample_network()).unwrap();
    let first = design_network(&graph, DesignCriteria::Congestion, true);
    let second = design_network(&graph, DesignCriteria::Congestion, true);

    let first_roads: Vec<&Road> = first.graph.roads().collect();
    let second_roads: Vec<&Road> = second.graph.roads().collect();
    assert_eq!(first_roads, second_roads);
    assert_eq!(
        first.total_adjusted_cost.to_bits(),
        second.total_adjusted_cost.to_bits()
    );
}

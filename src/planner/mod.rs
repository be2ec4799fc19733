//! City transport planning core
//!
//! Graph model, route search, network design, resource allocation and signal
//! timing. Everything here is synchronous and free of I/O, so it can be
//! driven from tests or from any application shell.

mod allocation;
mod error;
mod graph;
mod network_design;
mod pathfinding;
mod records;
mod sample;
mod signal;
mod types;

pub use allocation::{
    optimize_maintenance, schedule_transit, Allocation, MaintenanceCandidate, TransitLine,
};
pub use error::{PlannerError, PlannerResult};
pub use graph::{BuildWarning, GraphBuilder, TransportGraph};
pub use network_design::{
    adjusted_cost, design_network, DesignCriteria, DesignWarning, SpanningNetwork,
};
pub use pathfinding::{
    a_star, dijkstra, find_path, greedy, is_rush_hour, time_dependent, PathOutcome, PathStrategy,
    RouteCache, RUSH_HOURS,
};
pub use records::{
    ExistingRoadRecord, FacilityRecord, NeighborhoodRecord, NetworkData, ProposedRoadRecord,
    TrafficPatternRecord,
};
pub use sample::{
    sample_car_counts, sample_maintenance_candidates, sample_network, sample_transit_lines,
};
pub use signal::{
    adjust_for_emergency, optimize_signal, Direction, SignalPlan, EMERGENCY_BOOST,
    EMERGENCY_MAX_SHARE,
};
pub use types::{
    CityNode, NodeId, NodeKind, Position, Road, RoadKind, TrafficSample, WeightSelector,
    DEFAULT_TRAFFIC, FACILITY_IMPORTANCE,
};

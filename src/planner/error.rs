//! Planner error type.
//!
//! Only input errors live here. An unreachable target or an unreachable
//! facility is a normal outcome and is carried inside the query result.

use thiserror::Error;

use super::types::NodeId;

/// Input errors produced by the planner core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("unknown weight selector {0:?} (expected \"distance\" or \"travel_time\")")]
    UnknownWeightSelector(String),

    #[error("unknown path strategy {0:?}")]
    UnknownStrategy(String),

    #[error("hour {0} is outside 0..=23")]
    InvalidHour(u32),

    #[error("node {0} not found in network")]
    UnknownNode(NodeId),

    #[error("unknown signal direction {0:?}")]
    UnknownDirection(String),

    #[error("{field} must not be negative (got {value}) in record {record}")]
    NegativeValue {
        record: String,
        field: &'static str,
        value: f64,
    },

    #[error("invalid record {record}: {reason}")]
    InvalidRecord { record: String, reason: String },

    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("road {0} connects a node to itself")]
    SelfLoop(NodeId),

    #[error("road {from}-{to} references unknown node {missing}")]
    UnknownRoadEndpoint {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    #[error("transit line {line_id} ends ({end}) before it starts ({start})")]
    InvalidInterval { line_id: String, start: i64, end: i64 },

    #[error("{what} total does not fit in a u64")]
    TotalOverflow { what: &'static str },

    #[error("maintenance table for {candidates} candidates and budget {budget} is too large")]
    TableTooLarge { candidates: usize, budget: i64 },
}

pub type PlannerResult<T> = Result<T, PlannerError>;

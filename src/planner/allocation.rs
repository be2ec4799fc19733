//! Bounded resource allocation
//!
//! Two independent dynamic programs over plain record lists: transit line
//! scheduling (weighted interval scheduling) and road maintenance selection
//! (0/1 knapsack). Neither touches the transport graph.

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::{PlannerError, PlannerResult};

/// A bus or metro line operating over a half-open time interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitLine {
    pub line_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub passenger_demand: u64,
}

impl TransitLine {
    pub fn new(line_id: &str, start_time: i64, end_time: i64, passenger_demand: u64) -> Self {
        Self {
            line_id: line_id.to_string(),
            start_time,
            end_time,
            passenger_demand,
        }
    }
}

/// A road that could be repaired this cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceCandidate {
    pub road_id: String,
    pub repair_cost: i64,
    pub urgency: u64,
}

impl MaintenanceCandidate {
    pub fn new(road_id: &str, repair_cost: i64, urgency: u64) -> Self {
        Self {
            road_id: road_id.to_string(),
            repair_cost,
            urgency,
        }
    }
}

/// Selected records, in input order, and the value they add up to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation<T> {
    pub selected: Vec<T>,
    pub total: u64,
}

/// Picks non-overlapping lines with the highest total passenger demand.
///
/// Two lines are compatible when one ends no later than the other starts.
/// `max_buses` is accepted for interface compatibility; it does not cap the
/// number of selected lines.
pub fn schedule_transit(
    lines: &[TransitLine],
    max_buses: usize,
) -> PlannerResult<Allocation<TransitLine>> {
    for line in lines {
        if line.end_time < line.start_time {
            return Err(PlannerError::InvalidInterval {
                line_id: line.line_id.clone(),
                start: line.start_time,
                end: line.end_time,
            });
        }
    }

    // Stable sort keeps input order among lines ending together
    let mut order: Vec<usize> = (0..lines.len()).collect();
    order.sort_by_key(|&index| lines[index].end_time);
    let n = order.len();

    // predecessor[i]: number of sorted lines before i that end by its start,
    // i.e. the dp prefix that stays compatible when line i is taken
    let predecessor: Vec<usize> = (0..n)
        .map(|i| {
            let start = lines[order[i]].start_time;
            order[..i].partition_point(|&earlier| lines[earlier].end_time <= start)
        })
        .collect();

    let mut best = vec![0u64; n + 1];
    for i in 1..=n {
        let include = lines[order[i - 1]]
            .passenger_demand
            .checked_add(best[predecessor[i - 1]])
            .ok_or(PlannerError::TotalOverflow { what: "passenger demand" })?;
        best[i] = best[i - 1].max(include);
    }

    let mut chosen = Vec::new();
    let mut i = n;
    while i > 0 {
        if best[i] != best[i - 1] {
            chosen.push(order[i - 1]);
            i = predecessor[i - 1];
        } else {
            i -= 1;
        }
    }
    chosen.sort_unstable();

    debug!(
        "Scheduled {} of {} transit lines (demand {}, {} buses available)",
        chosen.len(),
        lines.len(),
        best[n],
        max_buses
    );

    Ok(Allocation {
        selected: chosen.into_iter().map(|index| lines[index].clone()).collect(),
        total: best[n],
    })
}

/// Picks the repairs with the highest total urgency that fit the budget
pub fn optimize_maintenance(
    candidates: &[MaintenanceCandidate],
    budget: i64,
) -> PlannerResult<Allocation<MaintenanceCandidate>> {
    if budget < 0 {
        return Err(PlannerError::NegativeValue {
            record: "maintenance budget".to_string(),
            field: "budget",
            value: budget as f64,
        });
    }
    for candidate in candidates {
        if candidate.repair_cost < 0 {
            return Err(PlannerError::NegativeValue {
                record: candidate.road_id.clone(),
                field: "repair_cost",
                value: candidate.repair_cost as f64,
            });
        }
    }

    // No selection can spend more than the repairs that individually fit
    let spendable = candidates
        .iter()
        .filter(|candidate| candidate.repair_cost <= budget)
        .fold(0i64, |sum, candidate| sum.saturating_add(candidate.repair_cost));
    let too_large = || PlannerError::TableTooLarge {
        candidates: candidates.len(),
        budget,
    };
    let capacity = usize::try_from(budget.min(spendable)).map_err(|_| too_large())?;
    let width = capacity.checked_add(1).ok_or_else(too_large)?;
    let cells = candidates.len().checked_mul(width).ok_or_else(too_large)?;

    let mut best = vec![0u64; width];
    // keep[i * width + w]: candidate i improves the best value at budget w
    let mut keep = vec![false; cells];

    for (i, candidate) in candidates.iter().enumerate() {
        let cost = candidate.repair_cost as usize;
        if cost > capacity {
            continue;
        }
        for w in (cost..=capacity).rev() {
            let with = best[w - cost]
                .checked_add(candidate.urgency)
                .ok_or(PlannerError::TotalOverflow { what: "urgency" })?;
            if with > best[w] {
                best[w] = with;
                keep[i * width + w] = true;
            }
        }
    }

    let mut chosen = Vec::new();
    let mut remaining = capacity;
    for i in (0..candidates.len()).rev() {
        if keep[i * width + remaining] {
            chosen.push(i);
            remaining -= candidates[i].repair_cost as usize;
        }
    }
    chosen.reverse();

    debug!(
        "Selected {} of {} repairs within budget {} (urgency {})",
        chosen.len(),
        candidates.len(),
        budget,
        best[capacity]
    );

    Ok(Allocation {
        selected: chosen
            .into_iter()
            .map(|index| candidates[index].clone())
            .collect(),
        total: best[capacity],
    })
}

//! Traffic signal timing
//!
//! Green time is split in proportion to waiting cars. An emergency vehicle
//! can claim a boosted share for its approach.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::{PlannerError, PlannerResult};

/// Upper bound on the green share given to an emergency approach
pub const EMERGENCY_MAX_SHARE: f64 = 60.0;

/// Factor applied to the emergency approach's normal share
pub const EMERGENCY_BOOST: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl FromStr for Direction {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            _ => Err(PlannerError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Percentage of the signal cycle given to each direction
pub type SignalPlan = BTreeMap<Direction, f64>;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Splits the cycle in proportion to car counts, rounded to two decimals.
/// With no cars at all every direction gets an equal share.
pub fn optimize_signal(car_counts: &BTreeMap<Direction, u64>) -> SignalPlan {
    let total: u64 = car_counts.values().sum();
    if total == 0 {
        let share = round2(100.0 / car_counts.len() as f64);
        return car_counts.keys().map(|direction| (*direction, share)).collect();
    }

    car_counts
        .iter()
        .map(|(direction, count)| {
            (*direction, round2(*count as f64 / total as f64 * 100.0))
        })
        .collect()
}

/// Gives `emergency` up to [`EMERGENCY_MAX_SHARE`] percent and splits the
/// rest across the other directions by their raw car counts.
pub fn adjust_for_emergency(
    car_counts: &BTreeMap<Direction, u64>,
    emergency: Direction,
) -> PlannerResult<SignalPlan> {
    let baseline = optimize_signal(car_counts);
    let normal_share = baseline
        .get(&emergency)
        .copied()
        .ok_or_else(|| PlannerError::UnknownDirection(emergency.to_string()))?;

    let emergency_share = EMERGENCY_MAX_SHARE.min(normal_share * EMERGENCY_BOOST);
    let remaining = 100.0 - emergency_share;

    let others: Vec<(Direction, u64)> = car_counts
        .iter()
        .filter(|(direction, _)| **direction != emergency)
        .map(|(direction, count)| (*direction, *count))
        .collect();
    let others_total: u64 = others.iter().map(|(_, count)| count).sum();

    let mut plan = SignalPlan::new();
    plan.insert(emergency, round2(emergency_share));
    for (direction, count) in &others {
        let portion = if others_total > 0 {
            *count as f64 / others_total as f64
        } else {
            1.0 / others.len() as f64
        };
        plan.insert(*direction, round2(portion * remaining));
    }
    Ok(plan)
}

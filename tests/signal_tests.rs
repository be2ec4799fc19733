//! Signal timing validation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use transit_planner::planner::{
    adjust_for_emergency, optimize_signal, sample_car_counts, Direction, PlannerError,
    EMERGENCY_MAX_SHARE,
};

const EPSILON: f64 = 1e-9;

fn counts(entries: &[(Direction, u64)]) -> BTreeMap<Direction, u64> {
    entries.iter().copied().collect()
}

fn assert_share(plan: &BTreeMap<Direction, f64>, direction: Direction, expected: f64) {
    let actual = plan[&direction];
    assert!(
        (actual - expected).abs() < EPSILON,
        "{}: got {} expected {}",
        direction,
        actual,
        expected
    );
}

#[test]
fn test_signal_shares_follow_car_counts() {
    let plan = optimize_signal(&sample_car_counts());

    assert_eq!(plan.len(), 4);
    assert_share(&plan, Direction::North, 29.41);
    assert_share(&plan, Direction::South, 17.65);
    assert_share(&plan, Direction::East, 41.18);
    assert_share(&plan, Direction::West, 11.76);
}

#[test]
fn test_signal_shares_sum_to_full_cycle() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let counts = counts(&[
            (Direction::North, rng.random_range(0..500)),
            (Direction::South, rng.random_range(0..500)),
            (Direction::East, rng.random_range(0..500)),
            (Direction::West, rng.random_range(1..500)),
        ]);
        let total: f64 = optimize_signal(&counts).values().sum();
        assert!((total - 100.0).abs() <= 0.05, "total {}", total);
    }
}

#[test]
fn test_no_cars_splits_evenly() {
    let plan = optimize_signal(&counts(&[
        (Direction::North, 0),
        (Direction::South, 0),
        (Direction::East, 0),
        (Direction::West, 0),
    ]));
    for share in plan.values() {
        assert_eq!(*share, 25.0);
    }

    let plan = optimize_signal(&counts(&[
        (Direction::North, 0),
        (Direction::East, 0),
        (Direction::West, 0),
    ]));
    assert_eq!(plan.len(), 3);
    assert_share(&plan, Direction::East, 33.33);
}

#[test]
fn test_emergency_share_is_capped() {
    let plan = adjust_for_emergency(&sample_car_counts(), Direction::East).unwrap();

    assert_share(&plan, Direction::East, EMERGENCY_MAX_SHARE);
    assert_share(&plan, Direction::North, 20.0);
    assert_share(&plan, Direction::South, 12.0);
    assert_share(&plan, Direction::West, 8.0);
}

#[test]
fn test_emergency_boost_below_cap() {
    let plan = adjust_for_emergency(
        &counts(&[
            (Direction::North, 10),
            (Direction::South, 45),
            (Direction::East, 45),
        ]),
        Direction::North,
    )
    .unwrap();

    assert_share(&plan, Direction::North, 15.0);
    assert_share(&plan, Direction::South, 42.5);
    assert_share(&plan, Direction::East, 42.5);
}

#[test]
fn test_emergency_with_idle_cross_traffic() {
    let plan = adjust_for_emergency(
        &counts(&[
            (Direction::North, 0),
            (Direction::South, 0),
            (Direction::East, 10),
        ]),
        Direction::East,
    )
    .unwrap();

    assert_share(&plan, Direction::East, 60.0);
    assert_share(&plan, Direction::North, 20.0);
    assert_share(&plan, Direction::South, 20.0);
}

#[test]
fn test_emergency_single_direction() {
    let plan = adjust_for_emergency(&counts(&[(Direction::East, 5)]), Direction::East).unwrap();
    assert_eq!(plan.len(), 1);
    assert_share(&plan, Direction::East, 60.0);
}

#[test]
fn test_emergency_direction_must_be_counted() {
    let result = adjust_for_emergency(&counts(&[(Direction::North, 5)]), Direction::East);
    assert_eq!(
        result,
        Err(PlannerError::UnknownDirection("east".to_string()))
    );
}

#[test]
fn test_direction_parsing() {
    assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
    assert_eq!("West".parse::<Direction>(), Ok(Direction::West));
    assert_eq!("EAST".parse::<Direction>(), Ok(Direction::East));
    assert_eq!(
        "up".parse::<Direction>(),
        Err(PlannerError::UnknownDirection("up".to_string()))
    );
    assert_eq!(Direction::South.to_string(), "south");
}

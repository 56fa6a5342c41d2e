//! State invariants that must hold after any sequence of operations.

use std::time::Duration;

use proptest::prelude::*;

use rover_scout::game::rules::{hazard_count, level_time_budget, resource_count, EDGE_MARGIN};
use rover_scout::{Action, DeterministicRng, GameEngine, MoveDirection};

#[derive(Clone, Debug)]
enum Op {
    Act(Action),
    Tick,
    Hazard,
    Advance(u64),
}

fn direction() -> impl Strategy<Value = Option<MoveDirection>> {
    prop_oneof![
        Just(None),
        Just(Some(MoveDirection::Forward)),
        Just(Some(MoveDirection::Backward)),
        Just(Some(MoveDirection::Left)),
        Just(Some(MoveDirection::Right)),
        Just(Some(MoveDirection::Stationary)),
    ]
}

fn sensor_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![Just("Camera"), Just("Temperature"), Just("Lidar")].prop_map(String::from),
        0..3,
    )
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => direction().prop_map(|direction| Op::Act(Action::Move { direction })),
        1 => sensor_names().prop_map(|sensors| Op::Act(Action::ToggleSensor { sensors })),
        1 => Just(Op::Act(Action::Sleep)),
        2 => Just(Op::Tick),
        2 => Just(Op::Hazard),
        1 => (0u64..3000).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn test_invariants_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..200)) {
        let mut engine = GameEngine::new(DeterministicRng::new(seed));

        for op in ops {
            match op {
                Op::Act(action) => {
                    let before = engine.state().clone();
                    if engine.apply_action(&action).is_err() {
                        // Rejected actions do not mutate
                        prop_assert_eq!(engine.state().x, before.x);
                        prop_assert_eq!(engine.state().y, before.y);
                        prop_assert_eq!(engine.state().battery_percentage, before.battery_percentage);
                    }
                }
                Op::Tick => {
                    engine.tick();
                }
                Op::Hazard => {
                    engine.check_hazards();
                }
                Op::Advance(ms) => {
                    engine.advance_clock(Duration::from_millis(ms));
                }
            }

            let state = engine.state();
            prop_assert!(state.battery_percentage <= 100);
            prop_assert!(state.x >= EDGE_MARGIN && state.x <= state.map_size - EDGE_MARGIN);
            prop_assert!(state.y >= EDGE_MARGIN && state.y <= state.map_size - EDGE_MARGIN);
            prop_assert!(state.level >= 1);
            prop_assert!(state.map_size <= 800);
            prop_assert_eq!(state.resource_nodes.len(), resource_count(state.level) as usize);
            prop_assert_eq!(state.hazard_zones.len(), hazard_count(state.level) as usize);
            prop_assert!(state.time_remaining <= level_time_budget(state.base_time, state.level));
            prop_assert!(state.timer_started || state.time_remaining == 0);
            prop_assert!([0, 90, 180, 270].contains(&state.direction));

            let discovered = state.resource_nodes.iter().filter(|n| n.discovered).count();
            prop_assert_eq!(state.found_resources.len(), discovered);
        }
    }
}

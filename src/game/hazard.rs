//! Hazard Damage
//!
//! Damage from every zone the rover is inside stacks additively. The check
//! only applies damage; deciding whether the game is over is left to the
//! tick that drives it.

use crate::core::geometry::distance;
use crate::game::events::GameEvent;
use crate::game::state::GameState;

/// Apply one round of hazard damage at the rover's current position.
///
/// Sets `in_hazard` to whether any zone contains the rover and returns the
/// total damage dealt, which has already been taken off the battery (floored
/// at zero).
pub fn check_hazards(state: &mut GameState) -> u32 {
    let total_damage: u32 = state
        .hazard_zones
        .iter()
        .filter(|zone| distance(state.x, state.y, f64::from(zone.x), f64::from(zone.y)) < zone.radius)
        .map(|zone| zone.damage)
        .fold(0u32, u32::saturating_add);

    if total_damage == 0 {
        state.in_hazard = false;
        return 0;
    }

    state.in_hazard = true;
    state.drain_battery(total_damage);
    state.push_event(GameEvent::HazardDamage {
        damage: total_damage,
        battery: state.battery_percentage,
    });

    total_damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use crate::game::state::HazardZone;

    fn state_with_hazards(zones: Vec<HazardZone>) -> GameState {
        let mut rng = DeterministicRng::new(11);
        let mut state = GameState::new(&mut rng);
        state.hazard_zones = zones;
        state.take_events();
        state
    }

    fn zone(x: i32, y: i32, radius: f64, damage: u32) -> HazardZone {
        HazardZone { x, y, radius, damage }
    }

    #[test]
    fn test_no_hazard_in_range() {
        let mut state = state_with_hazards(vec![zone(50, 50, 40.0, 3)]);
        state.in_hazard = true;

        assert_eq!(check_hazards(&mut state), 0);
        assert!(!state.in_hazard);
        assert_eq!(state.battery_percentage, 100);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_single_hazard_damage() {
        let mut state = state_with_hazards(vec![zone(210, 200, 40.0, 3)]);

        assert_eq!(check_hazards(&mut state), 3);
        assert!(state.in_hazard);
        assert_eq!(state.battery_percentage, 97);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::HazardDamage { damage: 3, battery: 97 }]
        );
    }

    #[test]
    fn test_overlapping_hazards_stack() {
        let mut state = state_with_hazards(vec![
            zone(200, 200, 40.0, 3),
            zone(220, 220, 45.0, 4),
            zone(380, 380, 40.0, 9),
        ]);

        assert_eq!(check_hazards(&mut state), 7);
        assert_eq!(state.battery_percentage, 93);
    }

    #[test]
    fn test_edge_of_radius_is_outside() {
        // Exactly on the boundary does not count
        let mut state = state_with_hazards(vec![zone(240, 200, 40.0, 3)]);

        assert_eq!(check_hazards(&mut state), 0);
        assert!(!state.in_hazard);
    }

    #[test]
    fn test_damage_floors_battery_at_zero() {
        let mut state = state_with_hazards(vec![zone(200, 200, 50.0, 8)]);
        state.battery_percentage = 5;

        assert_eq!(check_hazards(&mut state), 8);
        assert_eq!(state.battery_percentage, 0);
    }
}

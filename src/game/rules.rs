//! Gameplay Constants
//!
//! Every tunable number of the game in one place.

use crate::game::state::ResourceType;

// =============================================================================
// MAP
// =============================================================================

/// Map size at level 1.
pub const BASE_MAP_SIZE: i32 = 400;

/// Map size growth per level.
pub const MAP_GROWTH_PER_LEVEL: i32 = 50;

/// Largest map the game will generate.
pub const MAX_MAP_SIZE: i32 = 800;

/// The rover is kept at least this far from the map edge.
pub const EDGE_MARGIN: i32 = 20;

/// Resource nodes spawn at least this far from the edge.
pub const NODE_MARGIN: i32 = 40;

/// Hazard centers spawn at least this far from the edge.
pub const HAZARD_MARGIN: i32 = 50;

/// Map size for a given level.
pub fn map_size_for_level(level: u32) -> i32 {
    let growth = i64::from(level.saturating_sub(1)) * i64::from(MAP_GROWTH_PER_LEVEL);
    (i64::from(BASE_MAP_SIZE) + growth).min(i64::from(MAX_MAP_SIZE)) as i32
}

// =============================================================================
// ROVER
// =============================================================================

/// Battery capacity (percent).
pub const MAX_BATTERY: u32 = 100;

/// Distance covered by one move.
pub const MOVE_SPEED: i32 = 30;

/// Battery cost of a move before sensors are counted.
pub const BASE_MOVE_DRAIN: u32 = 2;

/// Battery restored by one sleep.
pub const SLEEP_RECHARGE: u32 = 15;

/// Discovery range of the camera sensor.
pub const DISCOVERY_RANGE: f64 = 50.0;

/// Sensor that reveals resource nodes.
pub const SENSOR_CAMERA: &str = "Camera";

/// Sensor used by the client to draw hazard zones.
pub const SENSOR_TEMPERATURE: &str = "Temperature";

/// Sensors switched on in a fresh game.
pub const DEFAULT_SENSORS: [&str; 2] = [SENSOR_TEMPERATURE, SENSOR_CAMERA];

/// Battery drained by one move with `sensor_count` active sensors.
pub fn move_drain(sensor_count: usize) -> u32 {
    BASE_MOVE_DRAIN.saturating_add(u32::try_from(sensor_count).unwrap_or(u32::MAX))
}

// =============================================================================
// LEVELS
// =============================================================================

/// Level time budget before per-level bonus (seconds).
pub const BASE_TIME: u32 = 60;

/// Extra seconds granted per level above 1.
pub const TIME_BONUS_PER_LEVEL: u32 = 5;

/// Resource nodes on level 0; each level adds one.
pub const BASE_RESOURCE_COUNT: u32 = 3;

/// Hazard zones on level 0; one more every second level.
pub const BASE_HAZARD_COUNT: u32 = 2;

/// Smallest hazard radius.
pub const HAZARD_MIN_RADIUS: f64 = 40.0;

/// Width of the hazard radius range.
pub const HAZARD_RADIUS_SPREAD: f64 = 20.0;

/// Hazard damage on level 0; each level adds one.
pub const BASE_HAZARD_DAMAGE: u32 = 2;

/// Resource catalog, ordered from common to rare.
pub const RESOURCE_CATALOG: [ResourceType; 7] = [
    ResourceType::Iron,
    ResourceType::Copper,
    ResourceType::Silver,
    ResourceType::Gold,
    ResourceType::Platinum,
    ResourceType::Titanium,
    ResourceType::Diamond,
];

/// Countdown for a level.
pub fn level_time_budget(base_time: u32, level: u32) -> u32 {
    base_time.saturating_add(level.saturating_sub(1).saturating_mul(TIME_BONUS_PER_LEVEL))
}

/// Number of resource nodes on a level.
pub fn resource_count(level: u32) -> u32 {
    BASE_RESOURCE_COUNT.saturating_add(level)
}

/// How many catalog entries a level may draw from.
pub fn unlocked_resource_types(level: u32) -> u32 {
    resource_count(level).min(RESOURCE_CATALOG.len() as u32)
}

/// Number of hazard zones on a level.
pub fn hazard_count(level: u32) -> u32 {
    BASE_HAZARD_COUNT.saturating_add(level / 2)
}

/// Damage per hazard check on a level.
pub fn hazard_damage(level: u32) -> u32 {
    BASE_HAZARD_DAMAGE.saturating_add(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_size_growth() {
        assert_eq!(map_size_for_level(1), 400);
        assert_eq!(map_size_for_level(2), 450);
        assert_eq!(map_size_for_level(8), 750);
        assert_eq!(map_size_for_level(9), 800);
        assert_eq!(map_size_for_level(50), 800);
    }

    #[test]
    fn test_level_counts() {
        assert_eq!(resource_count(1), 4);
        assert_eq!(resource_count(5), 8);
        assert_eq!(hazard_count(1), 2);
        assert_eq!(hazard_count(2), 3);
        assert_eq!(hazard_count(5), 4);
        assert_eq!(hazard_damage(1), 3);
    }

    #[test]
    fn test_unlocked_types() {
        assert_eq!(unlocked_resource_types(1), 4);
        assert_eq!(unlocked_resource_types(4), 7);
        assert_eq!(unlocked_resource_types(10), 7);
    }

    #[test]
    fn test_time_budget() {
        assert_eq!(level_time_budget(BASE_TIME, 1), 60);
        assert_eq!(level_time_budget(BASE_TIME, 3), 70);
    }

    #[test]
    fn test_move_drain() {
        assert_eq!(move_drain(0), 2);
        assert_eq!(move_drain(2), 4);
    }
}

//! Level Generation
//!
//! Lays out resource nodes and hazard zones for a level. Both functions are
//! pure apart from consuming the random source; installing the result into
//! the state is the caller's job.

use crate::core::rng::RandomSource;
use crate::game::rules::{
    hazard_count, hazard_damage, resource_count, unlocked_resource_types,
    HAZARD_MARGIN, HAZARD_MIN_RADIUS, HAZARD_RADIUS_SPREAD, NODE_MARGIN, RESOURCE_CATALOG,
};
use crate::game::state::{HazardZone, ResourceNode};

/// Generate the resource nodes for `level`.
///
/// Produces `3 + level` undiscovered nodes inside `[40, map_size - 40]`, each
/// typed from the first `min(7, 3 + level)` catalog entries.
pub fn generate_level<R: RandomSource + ?Sized>(
    rng: &mut R,
    level: u32,
    map_size: i32,
) -> Vec<ResourceNode> {
    let unlocked = unlocked_resource_types(level);

    (0..resource_count(level))
        .map(|_| {
            let x = random_coordinate(rng, map_size, NODE_MARGIN);
            let y = random_coordinate(rng, map_size, NODE_MARGIN);
            let kind = RESOURCE_CATALOG[rng.next_below(unlocked) as usize];
            ResourceNode::new(x, y, kind)
        })
        .collect()
}

/// Generate the hazard zones for `level`.
///
/// Produces `2 + level / 2` zones centered inside `[50, map_size - 50]` with a
/// radius in `[40, 60)` and `2 + level` damage.
pub fn generate_hazards<R: RandomSource + ?Sized>(
    rng: &mut R,
    level: u32,
    map_size: i32,
) -> Vec<HazardZone> {
    let damage = hazard_damage(level);

    (0..hazard_count(level))
        .map(|_| {
            let x = random_coordinate(rng, map_size, HAZARD_MARGIN);
            let y = random_coordinate(rng, map_size, HAZARD_MARGIN);
            let radius = HAZARD_MIN_RADIUS + rng.next_unit() * HAZARD_RADIUS_SPREAD;
            HazardZone { x, y, radius, damage }
        })
        .collect()
}

/// Uniform coordinate in `[margin, map_size - margin)`.
fn random_coordinate<R: RandomSource + ?Sized>(rng: &mut R, map_size: i32, margin: i32) -> i32 {
    let span = (map_size - 2 * margin).max(0) as u32;
    margin + rng.next_below(span) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use crate::game::state::ResourceType;

    /// Replays a fixed list of unit values, cycling when exhausted.
    struct Scripted {
        values: Vec<f64>,
        cursor: usize,
    }

    impl Scripted {
        fn new(values: &[f64]) -> Self {
            Self { values: values.to_vec(), cursor: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        }
    }

    #[test]
    fn test_level_node_count_and_bounds() {
        let mut rng = DeterministicRng::new(42);
        for level in 1..=12 {
            let map_size = crate::game::rules::map_size_for_level(level);
            let nodes = generate_level(&mut rng, level, map_size);

            assert_eq!(nodes.len(), 3 + level as usize);
            for node in &nodes {
                assert!(node.x >= 40 && node.x <= map_size - 40);
                assert!(node.y >= 40 && node.y <= map_size - 40);
                assert!(!node.discovered);
                assert!((node.kind as u32) < (3 + level).min(7));
            }
        }
    }

    #[test]
    fn test_level_one_never_unlocks_rare_types() {
        let mut rng = DeterministicRng::new(7);
        for _ in 0..200 {
            for node in generate_level(&mut rng, 1, 400) {
                assert!(node.kind <= ResourceType::Gold);
            }
        }
    }

    #[test]
    fn test_hazard_count_and_bounds() {
        let mut rng = DeterministicRng::new(99);
        for level in 1..=12 {
            let map_size = crate::game::rules::map_size_for_level(level);
            let hazards = generate_hazards(&mut rng, level, map_size);

            assert_eq!(hazards.len(), 2 + (level / 2) as usize);
            for hazard in &hazards {
                assert!(hazard.x >= 50 && hazard.x <= map_size - 50);
                assert!(hazard.y >= 50 && hazard.y <= map_size - 50);
                assert!(hazard.radius >= 40.0 && hazard.radius < 60.0);
                assert_eq!(hazard.damage, 2 + level);
            }
        }
    }

    #[test]
    fn test_exact_node_placement() {
        // x, y, type for each node
        let mut rng = Scripted::new(&[0.5, 0.0, 0.99]);
        let nodes = generate_level(&mut rng, 1, 400);

        assert_eq!(nodes.len(), 4);
        // floor(0.5 * 320) + 40, floor(0 * 320) + 40, floor(0.99 * 4)
        assert_eq!(nodes[0], ResourceNode::new(200, 40, ResourceType::Gold));
    }

    #[test]
    fn test_exact_hazard_placement() {
        let mut rng = Scripted::new(&[0.25, 0.75, 0.5]);
        let hazards = generate_hazards(&mut rng, 3, 500);

        assert_eq!(hazards.len(), 3);
        // floor(0.25 * 400) + 50, floor(0.75 * 400) + 50
        assert_eq!(hazards[0].x, 150);
        assert_eq!(hazards[0].y, 350);
        assert_eq!(hazards[0].radius, 50.0);
        assert_eq!(hazards[0].damage, 5);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = DeterministicRng::new(2024);
        let mut b = DeterministicRng::new(2024);
        assert_eq!(generate_level(&mut a, 3, 500), generate_level(&mut b, 3, 500));
        assert_eq!(generate_hazards(&mut a, 3, 500), generate_hazards(&mut b, 3, 500));
    }
}

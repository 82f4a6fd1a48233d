#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that populates the arena before play begins.

use katorga_core::{Command, Direction, Position, Rules, Size};
use rand::Rng;

/// Produces the commands that place the initial monsters.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Emits one spawn command per configured monster.
    ///
    /// Positions are drawn uniformly from the whole window and redrawn while
    /// the top-left corner falls inside the protected centre square. Each
    /// monster gets a uniformly random heading.
    pub fn place_monsters<R: Rng + ?Sized>(
        &self,
        rules: &Rules,
        monster: Size,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        let max_x = rules.window.width().saturating_sub(monster.width());
        let max_y = rules.window.height().saturating_sub(monster.height());

        for _ in 0..rules.monster_count {
            let (x, y) = loop {
                let x = rng.gen_range(0..=max_x);
                let y = rng.gen_range(0..=max_y);
                if !rules.in_safe_zone(x, y) {
                    break (x, y);
                }
            };

            out.push(Command::SpawnMonster {
                position: Position::new(x as f32, y as f32),
                heading: Direction::random(rng),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const MONSTER: Size = Size::new(40, 40);

    fn placed(rules: &Rules, seed: u64) -> Vec<Command> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut commands = Vec::new();
        Bootstrap.place_monsters(rules, MONSTER, &mut rng, &mut commands);
        commands
    }

    #[test]
    fn places_configured_number_of_monsters() {
        let rules = Rules::default();
        assert_eq!(placed(&rules, 1).len(), rules.monster_count);
    }

    #[test]
    fn monsters_avoid_safe_zone_and_stay_in_window() {
        let rules = Rules::default();
        for seed in 0..64 {
            for command in placed(&rules, seed) {
                let Command::SpawnMonster { position, .. } = command else {
                    panic!("unexpected command {command:?}");
                };
                let (x, y) = (position.x() as u32, position.y() as u32);
                assert!(!rules.in_safe_zone(x, y), "seed {seed} placed {position:?}");
                assert!(x <= 600 && y <= 600, "seed {seed} placed {position:?}");
            }
        }
    }

    #[test]
    fn placement_is_reproducible_for_a_seed() {
        let rules = Rules::default();
        assert_eq!(placed(&rules, 0xfeed), placed(&rules, 0xfeed));
    }

    #[test]
    fn zero_monsters_emit_nothing() {
        let rules = Rules {
            monster_count: 0,
            ..Rules::default()
        };
        assert!(placed(&rules, 3).is_empty());
    }
}

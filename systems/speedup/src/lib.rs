#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Speed-up system that rewards figures for gathering coins.

use katorga_core::{Command, FigureSnapshot};

/// Configuration parameters required to construct the speed-up system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    player_threshold: u32,
    monster_threshold: u32,
}

impl Config {
    /// Creates a configuration with separate thresholds for player and monsters.
    #[must_use]
    pub const fn new(player_threshold: u32, monster_threshold: u32) -> Self {
        Self {
            player_threshold,
            monster_threshold,
        }
    }
}

/// Pure system that emits a speed-up once a figure's counter hits its threshold.
#[derive(Debug)]
pub struct SpeedUp {
    config: Config,
}

impl SpeedUp {
    /// Creates a new speed-up system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Checks the player first, then each monster in order.
    pub fn handle(
        &self,
        player: &FigureSnapshot,
        monsters: &[FigureSnapshot],
        out: &mut Vec<Command>,
    ) {
        push_if_due(player, self.config.player_threshold, out);
        for monster in monsters {
            push_if_due(monster, self.config.monster_threshold, out);
        }
    }
}

fn push_if_due(figure: &FigureSnapshot, threshold: u32, out: &mut Vec<Command>) {
    if figure.score_since_last_speedup >= threshold {
        out.push(Command::SpeedUp { figure: figure.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use katorga_core::{FigureId, FigureKind, Intent, Rect};

    fn snapshot(id: u32, kind: FigureKind, since_speedup: u32) -> FigureSnapshot {
        FigureSnapshot {
            id: FigureId::new(id),
            kind,
            rect: Rect::default(),
            score: since_speedup,
            score_since_last_speedup: since_speedup,
            speed: 1,
            intent: Intent::IDLE,
        }
    }

    fn speedups(player: u32, monsters: &[u32]) -> Vec<Command> {
        let monsters: Vec<_> = monsters
            .iter()
            .enumerate()
            .map(|(index, since)| snapshot(index as u32 + 1, FigureKind::Monster, *since))
            .collect();
        let mut commands = Vec::new();
        SpeedUp::new(Config::new(10, 5)).handle(
            &snapshot(0, FigureKind::Player, player),
            &monsters,
            &mut commands,
        );
        commands
    }

    #[test]
    fn player_speeds_up_at_threshold() {
        assert!(speedups(9, &[]).is_empty());
        assert_eq!(
            speedups(10, &[]),
            vec![Command::SpeedUp {
                figure: FigureId::new(0)
            }]
        );
    }

    #[test]
    fn monsters_use_their_own_threshold() {
        assert_eq!(
            speedups(5, &[4, 5, 7]),
            vec![
                Command::SpeedUp {
                    figure: FigureId::new(2)
                },
                Command::SpeedUp {
                    figure: FigureId::new(3)
                },
            ]
        );
    }
}

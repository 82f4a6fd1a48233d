#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that steers the player and patrols the monsters.

use katorga_core::{Chance, Command, Direction, FigureSnapshot, Rect, Size};
use rand::Rng;

/// Configuration parameters required to construct the movement system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    bounds: Size,
    redirect_chance: Chance,
}

impl Config {
    /// Creates a configuration for an arena of `bounds` with the given turn chance.
    #[must_use]
    pub const fn new(bounds: Size, redirect_chance: Chance) -> Self {
        Self {
            bounds,
            redirect_chance,
        }
    }
}

/// Pure system that turns intent into movement commands.
#[derive(Debug)]
pub struct Movement {
    bounds: Size,
    redirect_chance: Chance,
}

impl Movement {
    /// Creates a new movement system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            bounds: config.bounds,
            redirect_chance: config.redirect_chance,
        }
    }

    /// Emits one move per raised intent flag, in right, left, up, down order.
    ///
    /// Each move travels the player's full speed and is clamped on its own,
    /// so opposing flags cancel in open space but not against an edge.
    pub fn steer_player(&self, player: &FigureSnapshot, out: &mut Vec<Command>) {
        let _ = self.push_moves(player, out);
    }

    /// Moves every monster along its heading and decides where it turns.
    ///
    /// A monster that ends its move against an edge draws a new random
    /// heading. Independently, each monster may turn at random with the
    /// configured redirect chance.
    pub fn patrol<R: Rng + ?Sized>(
        &self,
        monsters: &[FigureSnapshot],
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        for monster in monsters {
            let destination = self.push_moves(monster, out);

            if destination.is_at_boundary(self.bounds) {
                out.push(Command::SetHeading {
                    figure: monster.id,
                    direction: Direction::random(rng),
                });
            }

            if self.redirect_chance.roll(rng) {
                out.push(Command::SetHeading {
                    figure: monster.id,
                    direction: Direction::random(rng),
                });
            }
        }
    }

    /// Pushes the figure's moves and returns where the world will place it.
    fn push_moves(&self, figure: &FigureSnapshot, out: &mut Vec<Command>) -> Rect {
        let distance = figure.speed as f32;
        figure.intent.active().fold(figure.rect, |rect, direction| {
            let (dx, dy) = direction.delta(distance);
            out.push(Command::MoveFigure {
                figure: figure.id,
                dx,
                dy,
            });
            rect.translated(dx, dy).clamped(self.bounds)
        })
    }
}

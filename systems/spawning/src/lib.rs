#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for emitting coin spawn commands.

use katorga_core::{Chance, Command, Position, Size};
use rand::Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    bounds: Size,
    coin: Size,
    spawn_chance: Chance,
    max_coins: usize,
}

impl Config {
    /// Creates a new configuration for coins of size `coin` inside `bounds`.
    #[must_use]
    pub const fn new(bounds: Size, coin: Size, spawn_chance: Chance, max_coins: usize) -> Self {
        Self {
            bounds,
            coin,
            spawn_chance,
            max_coins,
        }
    }
}

/// Pure system that occasionally drops a coin somewhere in the arena.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Rolls the spawn chance once and, if it succeeds while below the cap,
    /// emits a coin at a uniformly random position.
    ///
    /// The chance is rolled even at the cap so the random stream advances the
    /// same way regardless of how many coins are present.
    pub fn handle<R: Rng + ?Sized>(&self, coin_count: usize, rng: &mut R, out: &mut Vec<Command>) {
        if !self.config.spawn_chance.roll(rng) || coin_count >= self.config.max_coins {
            return;
        }

        let position = self.random_position(rng);
        out.push(Command::SpawnCoin { position });
    }

    fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let max_x = self.config.bounds.width().saturating_sub(self.config.coin.width());
        let max_y = self
            .config
            .bounds
            .height()
            .saturating_sub(self.config.coin.height());
        let x = rng.gen_range(0..=max_x);
        let y = rng.gen_range(0..=max_y);
        Position::new(x as f32, y as f32)
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick orchestration for KaToRga.
//!
//! [`Simulation`] owns the authoritative world, the pure systems and the
//! random source. Each tick runs the systems in a fixed order, applying the
//! commands of one phase before the next phase reads the world again.

mod clock;

pub use clock::TickClock;

use katorga_core::{Command, Direction, Event, FigureSizes, GameStatus, Rules, RulesError};
use katorga_system_bootstrap::Bootstrap;
use katorga_system_collection::Collection;
use katorga_system_movement::{self as movement, Movement};
use katorga_system_spawning::{self as spawning, Spawning};
use katorga_system_speedup::{self as speedup, SpeedUp};
use katorga_world::{self as world, query, World};
use rand::Rng;

/// Owns the game for the lifetime of the host process.
#[derive(Debug)]
pub struct Simulation<R> {
    world: World,
    rng: R,
    movement: Movement,
    spawning: Spawning,
    collection: Collection,
    speedup: SpeedUp,
    last_status: GameStatus,
}

impl<R: Rng> Simulation<R> {
    /// Builds the world, places the monsters and waits for the start key.
    pub fn new(rules: Rules, sizes: FigureSizes, mut rng: R) -> Result<Self, RulesError> {
        let mut world = World::new(rules, sizes)?;

        let mut commands = Vec::new();
        Bootstrap.place_monsters(&rules, sizes.monster, &mut rng, &mut commands);
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        log::debug!("placed {} monsters", query::monsters(&world).len());

        Ok(Self {
            movement: Movement::new(movement::Config::new(rules.window, rules.redirect_chance)),
            spawning: Spawning::new(spawning::Config::new(
                rules.window,
                sizes.coin,
                rules.coin_spawn_chance,
                rules.max_coins,
            )),
            collection: Collection,
            speedup: SpeedUp::new(speedup::Config::new(
                rules.player_speedup_threshold,
                rules.monster_speedup_threshold,
            )),
            last_status: query::status(&world),
            world,
            rng,
        })
    }

    /// Read-only access to the world for presentation.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current phase of the game.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// Applies an arbitrary command on behalf of the host.
    pub fn submit(&mut self, command: Command, out_events: &mut Vec<Event>) {
        world::apply(&mut self.world, command, out_events);
        self.observe_status();
    }

    /// Leaves the waiting phase. Further calls have no effect.
    pub fn start(&mut self, out_events: &mut Vec<Event>) {
        self.submit(Command::Start, out_events);
    }

    /// Raises or clears the player's intent flag for a direction key.
    pub fn key_changed(&mut self, direction: Direction, pressed: bool, out_events: &mut Vec<Event>) {
        let player = query::player(&self.world).id;
        self.submit(
            Command::SetIntent {
                figure: player,
                direction,
                active: pressed,
            },
            out_events,
        );
    }

    /// Advances the game by one tick if it is active.
    ///
    /// Returns `false` without touching the world when the game is waiting
    /// or already decided.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) -> bool {
        self.observe_status();
        if self.last_status != GameStatus::Active {
            return false;
        }

        let first_event = out_events.len();
        let mut commands = Vec::new();

        self.movement
            .steer_player(&query::player(&self.world), &mut commands);
        self.flush(&mut commands, out_events);

        self.spawning
            .handle(query::coin_count(&self.world), &mut self.rng, &mut commands);
        self.flush(&mut commands, out_events);

        self.collection.handle(
            &query::player(&self.world),
            &query::monsters(&self.world),
            &query::coins(&self.world),
            &mut commands,
        );
        self.flush(&mut commands, out_events);

        self.movement
            .patrol(&query::monsters(&self.world), &mut self.rng, &mut commands);
        self.flush(&mut commands, out_events);

        self.speedup.handle(
            &query::player(&self.world),
            &query::monsters(&self.world),
            &mut commands,
        );
        commands.push(Command::Tick);
        self.flush(&mut commands, out_events);

        log_notable(&out_events[first_event..]);
        self.observe_status();
        true
    }

    fn flush(&mut self, commands: &mut Vec<Command>, out_events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, out_events);
        }
    }

    fn observe_status(&mut self) {
        let status = query::status(&self.world);
        if status == self.last_status {
            return;
        }

        let player = query::player(&self.world);
        let points_to_win = query::rules(&self.world).points_to_win;
        match status {
            GameStatus::Waiting => {}
            GameStatus::Active => log::info!("game started"),
            GameStatus::Won => log::info!(
                "player won with {}/{} points after {} ticks",
                player.score,
                points_to_win,
                query::tick_index(&self.world)
            ),
            GameStatus::Lost => log::info!(
                "player caught by a monster with {}/{} points after {} ticks",
                player.score,
                points_to_win,
                query::tick_index(&self.world)
            ),
        }
        self.last_status = status;
    }
}

fn log_notable(events: &[Event]) {
    for event in events {
        match event {
            Event::CoinCollected {
                coin,
                collector,
                score,
            } => log::debug!(
                "figure {} collected coin {} (score {score})",
                collector.get(),
                coin.get()
            ),
            Event::SpeedIncreased { figure, speed } => {
                log::debug!("figure {} sped up to {speed}", figure.get());
            }
            _ => {}
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for KaToRga.

mod figure;

pub use figure::Figure;

use katorga_core::{
    Command, Event, FigureId, FigureKind, FigureSizes, Position, Rules, RulesError, SpawnError,
};

const PLAYER_ID: FigureId = FigureId::new(0);

/// Represents the authoritative KaToRga world state.
#[derive(Debug)]
pub struct World {
    rules: Rules,
    sizes: FigureSizes,
    player: Figure,
    monsters: Vec<Figure>,
    coins: Vec<Figure>,
    started: bool,
    next_figure_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world holding only the player, centred in the window.
    ///
    /// Monsters are added afterwards through [`Command::SpawnMonster`].
    pub fn new(rules: Rules, sizes: FigureSizes) -> Result<Self, RulesError> {
        rules.validate(&sizes)?;

        let player = Figure::new(
            PLAYER_ID,
            FigureKind::Player,
            rules.player_start(),
            sizes.player,
            rules.window,
            rules.initial_speed,
        );

        Ok(Self {
            rules,
            sizes,
            player,
            monsters: Vec::with_capacity(rules.monster_count),
            coins: Vec::with_capacity(rules.max_coins),
            started: false,
            next_figure_id: PLAYER_ID.get() + 1,
            tick_index: 0,
        })
    }

    fn allocate_id(&mut self) -> FigureId {
        let id = FigureId::new(self.next_figure_id);
        self.next_figure_id = self.next_figure_id.saturating_add(1);
        id
    }

    fn spawn(&mut self, kind: FigureKind, position: Position) -> Figure {
        let id = self.allocate_id();
        Figure::new(
            id,
            kind,
            position,
            self.sizes.of(kind),
            self.rules.window,
            self.rules.initial_speed,
        )
    }

    fn figure_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        if id == self.player.id() {
            return Some(&mut self.player);
        }
        self.monsters
            .iter_mut()
            .chain(self.coins.iter_mut())
            .find(|figure| figure.id() == id)
    }

    fn scorer_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        if id == self.player.id() {
            return Some(&mut self.player);
        }
        self.monsters.iter_mut().find(|monster| monster.id() == id)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            if !world.started {
                world.started = true;
                out_events.push(Event::GameStarted);
            }
        }
        Command::SetIntent {
            figure,
            direction,
            active,
        } => {
            if let Some(target) = world.figure_mut(figure) {
                let before = target.intent();
                target.set_intent(direction, active);
                if target.intent() != before {
                    out_events.push(Event::IntentChanged {
                        figure,
                        intent: target.intent(),
                    });
                }
            }
        }
        Command::SetHeading { figure, direction } => {
            if let Some(target) = world.figure_mut(figure) {
                target.set_heading(direction);
                out_events.push(Event::HeadingChanged { figure, direction });
            }
        }
        Command::MoveFigure { figure, dx, dy } => {
            if let Some(target) = world.figure_mut(figure) {
                let from = target.position();
                target.move_by(dx, dy);
                let to = target.position();
                if from != to {
                    out_events.push(Event::FigureMoved { figure, from, to });
                }
            }
        }
        Command::SpawnMonster { position, heading } => {
            let cap = world.rules.monster_count;
            if world.monsters.len() >= cap {
                out_events.push(Event::SpawnRejected {
                    kind: FigureKind::Monster,
                    reason: SpawnError::CapReached { cap },
                });
                return;
            }

            let mut monster = world.spawn(FigureKind::Monster, position);
            monster.set_heading(heading);
            out_events.push(Event::MonsterSpawned {
                figure: monster.id(),
                position: monster.position(),
            });
            world.monsters.push(monster);
        }
        Command::SpawnCoin { position } => {
            let cap = world.rules.max_coins;
            if world.coins.len() >= cap {
                out_events.push(Event::SpawnRejected {
                    kind: FigureKind::Coin,
                    reason: SpawnError::CapReached { cap },
                });
                return;
            }

            let coin = world.spawn(FigureKind::Coin, position);
            out_events.push(Event::CoinSpawned {
                figure: coin.id(),
                position: coin.position(),
            });
            world.coins.push(coin);
        }
        Command::CollectCoin { coin, collector } => {
            let Some(index) = world.coins.iter().position(|figure| figure.id() == coin) else {
                return;
            };
            let Some(scorer) = world.scorer_mut(collector) else {
                return;
            };

            scorer.add_points(1);
            let score = scorer.score();
            let _ = world.coins.remove(index);
            out_events.push(Event::CoinCollected {
                coin,
                collector,
                score,
            });
        }
        Command::SpeedUp { figure } => {
            if let Some(target) = world.scorer_mut(figure) {
                target.increment_speed();
                target.reset_speedup_counter();
                out_events.push(Event::SpeedIncreased {
                    figure,
                    speed: target.speed(),
                });
            }
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TickAdvanced {
                tick: world.tick_index,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use katorga_core::{FigureSizes, FigureSnapshot, GameStatus, Rules};

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Sprite-derived sizes of every figure kind.
    #[must_use]
    pub fn figure_sizes(world: &World) -> FigureSizes {
        world.sizes
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> FigureSnapshot {
        world.player.snapshot()
    }

    /// Captures every monster in insertion order.
    #[must_use]
    pub fn monsters(world: &World) -> Vec<FigureSnapshot> {
        world.monsters.iter().map(|monster| monster.snapshot()).collect()
    }

    /// Captures every coin in insertion order.
    #[must_use]
    pub fn coins(world: &World) -> Vec<FigureSnapshot> {
        world.coins.iter().map(|coin| coin.snapshot()).collect()
    }

    /// Number of coins currently in the arena.
    #[must_use]
    pub fn coin_count(world: &World) -> usize {
        world.coins.len()
    }

    /// Reports whether the start key has been pressed.
    #[must_use]
    pub fn started(world: &World) -> bool {
        world.started
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports whether the player gathered enough points to win.
    #[must_use]
    pub fn is_won(world: &World) -> bool {
        world.player.score() >= world.rules.points_to_win
    }

    /// Reports whether any monster touches the player.
    #[must_use]
    pub fn is_lost(world: &World) -> bool {
        let player = world.player.rect();
        world
            .monsters
            .iter()
            .any(|monster| monster.rect().overlaps(&player))
    }

    /// Derives the phase of the game from the current state.
    ///
    /// Waiting takes precedence over the outcome, and a win takes precedence
    /// over a simultaneous loss.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        if !world.started {
            GameStatus::Waiting
        } else if is_won(world) {
            GameStatus::Won
        } else if is_lost(world) {
            GameStatus::Lost
        } else {
            GameStatus::Active
        }
    }
}

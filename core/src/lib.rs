#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the KaToRga engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what changed. Systems read immutable [`FigureSnapshot`] values
//! and respond exclusively with new command batches.

use rand::Rng;
use thiserror::Error;

/// Title used by the window hosting the game.
pub const WINDOW_TITLE: &str = "KaToRga";

/// Number of simulation ticks executed per second of wall-clock time.
pub const TICKS_PER_SECOND: u32 = 120;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Transitions the game from the waiting phase into active play.
    Start,
    /// Sets or clears a single directional intent flag on a figure.
    SetIntent {
        /// Figure whose intent changes.
        figure: FigureId,
        /// Direction flag being toggled.
        direction: Direction,
        /// Whether the flag should be raised.
        active: bool,
    },
    /// Replaces a figure's intent with exactly one heading.
    SetHeading {
        /// Figure that receives the new heading.
        figure: FigureId,
        /// Direction the figure should travel in from now on.
        direction: Direction,
    },
    /// Displaces a figure, clamping the result into the window.
    MoveFigure {
        /// Figure being moved.
        figure: FigureId,
        /// Horizontal displacement in pixels.
        dx: f32,
        /// Vertical displacement in pixels.
        dy: f32,
    },
    /// Requests that a monster enters the arena.
    SpawnMonster {
        /// Top-left corner of the new monster.
        position: Position,
        /// Initial heading of the new monster.
        heading: Direction,
    },
    /// Requests that a coin appears in the arena.
    SpawnCoin {
        /// Top-left corner of the new coin.
        position: Position,
    },
    /// Awards a coin to a collector and removes it from the arena.
    CollectCoin {
        /// Coin being picked up.
        coin: FigureId,
        /// Player or monster that touched the coin.
        collector: FigureId,
    },
    /// Raises a figure's speed by one and resets its speed-up counter.
    SpeedUp {
        /// Figure that earned the speed-up.
        figure: FigureId,
    },
    /// Advances the tick counter.
    Tick,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The game left the waiting phase.
    GameStarted,
    /// A directional intent flag changed.
    IntentChanged {
        /// Figure whose intent changed.
        figure: FigureId,
        /// Intent after the change.
        intent: Intent,
    },
    /// A figure received a new exclusive heading.
    HeadingChanged {
        /// Figure that turned.
        figure: FigureId,
        /// Heading now in effect.
        direction: Direction,
    },
    /// A figure changed position.
    FigureMoved {
        /// Figure that moved.
        figure: FigureId,
        /// Position before the move.
        from: Position,
        /// Position after clamping.
        to: Position,
    },
    /// A monster entered the arena.
    MonsterSpawned {
        /// Identifier assigned to the monster.
        figure: FigureId,
        /// Position the monster occupies.
        position: Position,
    },
    /// A coin appeared in the arena.
    CoinSpawned {
        /// Identifier assigned to the coin.
        figure: FigureId,
        /// Position the coin occupies.
        position: Position,
    },
    /// A spawn request was refused.
    SpawnRejected {
        /// Kind of figure that was requested.
        kind: FigureKind,
        /// Reason the request failed.
        reason: SpawnError,
    },
    /// A coin was picked up and removed.
    CoinCollected {
        /// Coin that disappeared.
        coin: FigureId,
        /// Figure credited with the point.
        collector: FigureId,
        /// Collector's score after the pickup.
        score: u32,
    },
    /// A figure became faster.
    SpeedIncreased {
        /// Figure that sped up.
        figure: FigureId,
        /// Speed now in effect.
        speed: u32,
    },
    /// The tick counter advanced.
    TickAdvanced {
        /// Index of the tick that just completed.
        tick: u64,
    },
}

/// Reasons a spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SpawnError {
    /// The arena already holds the maximum number of figures of this kind.
    #[error("figure cap of {cap} reached")]
    CapReached {
        /// Configured maximum.
        cap: usize,
    },
}

/// Unique identifier assigned to a figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FigureId(u32);

impl FigureId {
    /// Creates a new figure identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Role a figure plays in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FigureKind {
    /// Keyboard-controlled figure.
    Player,
    /// Autonomous roaming figure that ends the game on contact.
    Monster,
    /// Stationary pickup worth one point.
    Coin,
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing x.
    Left,
    /// Toward increasing x.
    Right,
    /// Toward decreasing y.
    Up,
    /// Toward increasing y.
    Down,
}

impl Direction {
    /// Every direction, in the order used for uniform random selection.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Draws a uniformly random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Displacement produced by travelling `distance` pixels in this direction.
    #[must_use]
    pub fn delta(self, distance: f32) -> (f32, f32) {
        match self {
            Self::Left => (-distance, 0.0),
            Self::Right => (distance, 0.0),
            Self::Up => (0.0, -distance),
            Self::Down => (0.0, distance),
        }
    }
}

/// Directions a figure is currently trying to move in.
///
/// Flags are independent so several may be raised at once; diagonal motion is
/// the composition of the individual axis moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Intent {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Intent {
    /// Intent with no flags raised.
    pub const IDLE: Intent = Intent {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Order in which raised flags are applied when moving a figure.
    pub const APPLICATION_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Intent that heads exclusively in `direction`.
    #[must_use]
    pub fn only(direction: Direction) -> Self {
        Self::IDLE.with(direction, true)
    }

    /// Returns a copy with the flag for `direction` set to `active`.
    #[must_use]
    pub fn with(mut self, direction: Direction, active: bool) -> Self {
        self.set(direction, active);
        self
    }

    /// Raises or clears the flag for `direction`.
    pub fn set(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Left => self.left = active,
            Direction::Right => self.right = active,
            Direction::Up => self.up = active,
            Direction::Down => self.down = active,
        }
    }

    /// Reports whether the flag for `direction` is raised.
    #[must_use]
    pub const fn is_set(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Raised flags in application order.
    pub fn active(self) -> impl Iterator<Item = Direction> {
        Self::APPLICATION_ORDER
            .into_iter()
            .filter(move |direction| self.is_set(*direction))
    }

    /// The single raised direction, if exactly one flag is set.
    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        let mut active = self.active();
        match (active.next(), active.next()) {
            (Some(direction), None) => Some(direction),
            _ => None,
        }
    }
}

/// Top-left corner of a figure in window pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Position displaced by the provided delta.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Clamps each axis so that a figure of `size` stays inside `bounds`.
    ///
    /// The lower bound is applied before the upper bound, so a figure larger
    /// than the bounds is pinned to a negative upper limit rather than zero.
    #[must_use]
    pub fn clamped(self, size: Size, bounds: Size) -> Self {
        let (max_x, max_y) = max_corner(size, bounds);
        Self::new(self.x.max(0.0).min(max_x), self.y.max(0.0).min(max_y))
    }
}

fn max_corner(size: Size, bounds: Size) -> (f32, f32) {
    (
        bounds.width as f32 - size.width as f32,
        bounds.height as f32 - size.height as f32,
    )
}

/// Width and height in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether either extent is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reports whether `self` fits inside `bounds` on both axes.
    #[must_use]
    pub const fn fits_within(&self, bounds: Size) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

/// Axis-aligned rectangle covering `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    position: Position,
    size: Size,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Extent of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Rectangle displaced by the provided delta.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.position.translated(dx, dy), self.size)
    }

    /// Rectangle with its position clamped inside `bounds`.
    #[must_use]
    pub fn clamped(self, bounds: Size) -> Self {
        Self::new(self.position.clamped(self.size, bounds), self.size)
    }

    /// Reports whether the half-open rectangles intersect on both axes.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.size.is_empty() || other.size.is_empty() {
            return false;
        }

        let (ax, ay) = (self.position.x, self.position.y);
        let (bx, by) = (other.position.x, other.position.y);
        ax < bx + other.size.width as f32
            && bx < ax + self.size.width as f32
            && ay < by + other.size.height as f32
            && by < ay + self.size.height as f32
    }

    /// Reports whether the rectangle touches the edge of `bounds` on either axis.
    #[must_use]
    pub fn is_at_boundary(&self, bounds: Size) -> bool {
        let (max_x, max_y) = max_corner(self.size, bounds);
        let Position { x, y } = self.position;
        x <= 0.0 || x >= max_x || y <= 0.0 || y >= max_y
    }
}

/// Sprite dimensions that fix the size of every figure kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FigureSizes {
    /// Size of the player figure.
    pub player: Size,
    /// Size of every monster.
    pub monster: Size,
    /// Size of every coin.
    pub coin: Size,
}

impl FigureSizes {
    /// Size used by figures of the provided kind.
    #[must_use]
    pub const fn of(&self, kind: FigureKind) -> Size {
        match kind {
            FigureKind::Player => self.player,
            FigureKind::Monster => self.monster,
            FigureKind::Coin => self.coin,
        }
    }
}

/// Probability expressed in parts per ten thousand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Chance {
    per_ten_thousand: u32,
}

impl Chance {
    const SCALE: u32 = 10_000;

    /// Creates a chance that succeeds `per_ten_thousand` times out of 10 000.
    #[must_use]
    pub const fn per_ten_thousand(per_ten_thousand: u32) -> Self {
        Self { per_ten_thousand }
    }

    /// Numerator of the probability over 10 000.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.per_ten_thousand
    }

    /// Draws a number in `1..=10_000` and succeeds when it lands in the top slice.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let draw = rng.gen_range(1..=Self::SCALE);
        draw > Self::SCALE.saturating_sub(self.per_ten_thousand)
    }
}

/// Fixed game balance and arena parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Size of the window the figures are confined to.
    pub window: Size,
    /// Number of monsters placed at game start.
    pub monster_count: usize,
    /// Maximum number of coins present at once.
    pub max_coins: usize,
    /// Score at which the player wins.
    pub points_to_win: u32,
    /// Speed every figure starts with.
    pub initial_speed: u32,
    /// Per-tick chance of a coin appearing.
    pub coin_spawn_chance: Chance,
    /// Per-tick chance of a monster picking a new heading.
    pub redirect_chance: Chance,
    /// Points the player must gather to earn one speed-up.
    pub player_speedup_threshold: u32,
    /// Points a monster must gather to earn one speed-up.
    pub monster_speedup_threshold: u32,
    /// Half the side of the square around the window centre kept free of monsters.
    pub safe_zone_half_extent: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            window: Size::new(640, 640),
            monster_count: 4,
            max_coins: 5,
            points_to_win: 50,
            initial_speed: 1,
            coin_spawn_chance: Chance::per_ten_thousand(100),
            redirect_chance: Chance::per_ten_thousand(50),
            player_speedup_threshold: 10,
            monster_speedup_threshold: 5,
            safe_zone_half_extent: 100,
        }
    }
}

impl Rules {
    /// Position of the player's top-left corner at game start.
    #[must_use]
    pub fn player_start(&self) -> Position {
        Position::new(
            (self.window.width / 2) as f32,
            (self.window.height / 2) as f32,
        )
    }

    /// Reports whether a monster corner lies inside the protected centre square.
    #[must_use]
    pub fn in_safe_zone(&self, x: u32, y: u32) -> bool {
        let (cx, cy) = (self.window.width / 2, self.window.height / 2);
        let half = self.safe_zone_half_extent;
        let x_range = cx.saturating_sub(half)..cx.saturating_add(half);
        let y_range = cy.saturating_sub(half)..cy.saturating_add(half);
        x_range.contains(&x) && y_range.contains(&y)
    }

    /// Confirms that figures of the provided sizes can be simulated under these rules.
    pub fn validate(&self, sizes: &FigureSizes) -> Result<(), RulesError> {
        if self.initial_speed == 0 {
            return Err(RulesError::ZeroSpeed);
        }

        for kind in [FigureKind::Player, FigureKind::Monster, FigureKind::Coin] {
            let size = sizes.of(kind);
            if size.is_empty() {
                return Err(RulesError::EmptySprite { kind });
            }
            if !size.fits_within(self.window) {
                return Err(RulesError::SpriteExceedsWindow {
                    kind,
                    size,
                    window: self.window,
                });
            }
        }

        if self.monster_count > 0 {
            let monster = sizes.monster;
            let max_x = self.window.width - monster.width;
            let max_y = self.window.height - monster.height;
            let blocked = self.in_safe_zone(0, 0)
                && self.in_safe_zone(max_x, 0)
                && self.in_safe_zone(0, max_y)
                && self.in_safe_zone(max_x, max_y);
            if blocked {
                return Err(RulesError::NoMonsterSpawnArea);
            }
        }

        Ok(())
    }
}

/// Reasons a rule set cannot be simulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Figures would never move.
    #[error("initial speed must be at least 1")]
    ZeroSpeed,
    /// A sprite has no area, so its figure could never collide.
    #[error("{kind:?} sprite has zero width or height")]
    EmptySprite {
        /// Figure kind using the sprite.
        kind: FigureKind,
    },
    /// A sprite does not fit inside the window.
    #[error("{kind:?} sprite of {size:?} does not fit the {window:?} window")]
    SpriteExceedsWindow {
        /// Figure kind using the sprite.
        kind: FigureKind,
        /// Offending sprite size.
        size: Size,
        /// Window the sprite must fit into.
        window: Size,
    },
    /// The protected centre square covers every possible monster position.
    #[error("safe zone leaves no room to place monsters")]
    NoMonsterSpawnArea,
}

/// Current phase of the game as seen by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Waiting for the start key.
    Waiting,
    /// Ticks are being simulated.
    Active,
    /// The player reached the winning score.
    Won,
    /// A monster caught the player.
    Lost,
}

impl GameStatus {
    /// Reports whether the game reached a final outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Immutable representation of a single figure used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureSnapshot {
    /// Unique identifier assigned to the figure.
    pub id: FigureId,
    /// Role of the figure.
    pub kind: FigureKind,
    /// Area currently occupied by the figure.
    pub rect: Rect,
    /// Points gathered so far.
    pub score: u32,
    /// Points gathered since the last speed-up.
    pub score_since_last_speedup: u32,
    /// Pixels moved per tick.
    pub speed: u32,
    /// Directions the figure is trying to move in.
    pub intent: Intent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rect(x: f32, y: f32, width: u32, height: u32) -> Rect {
        Rect::new(Position::new(x, y), Size::new(width, height))
    }

    fn sizes() -> FigureSizes {
        FigureSizes {
            player: Size::new(32, 32),
            monster: Size::new(40, 40),
            coin: Size::new(16, 16),
        }
    }

    #[test]
    fn player_and_coin_overlap_until_coin_moves_away() {
        let player = rect(100.0, 100.0, 32, 32);
        let coin = rect(110.0, 110.0, 16, 16);
        assert!(player.overlaps(&coin));

        let moved = rect(200.0, 200.0, 16, 16);
        assert!(!player.overlaps(&moved));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (rect(0.0, 0.0, 10, 10), rect(9.0, 9.0, 4, 4)),
            (rect(0.0, 0.0, 10, 10), rect(10.0, 0.0, 4, 4)),
            (rect(5.0, 5.0, 1, 30), rect(0.0, 10.0, 30, 1)),
            (rect(50.0, 50.0, 8, 8), rect(0.0, 0.0, 8, 8)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let left = rect(0.0, 0.0, 10, 10);
        let right = rect(10.0, 0.0, 10, 10);
        let below = rect(0.0, 10.0, 10, 10);
        assert!(!left.overlaps(&right));
        assert!(!left.overlaps(&below));
    }

    #[test]
    fn empty_rectangles_never_overlap() {
        let solid = rect(0.0, 0.0, 10, 10);
        let empty = rect(5.0, 5.0, 0, 4);
        assert!(!solid.overlaps(&empty));
        assert!(!empty.overlaps(&solid));
    }

    #[test]
    fn clamping_keeps_figure_inside_bounds() {
        let bounds = Size::new(640, 640);
        let size = Size::new(32, 32);
        let clamped = Position::new(-12.0, 700.0).clamped(size, bounds);
        assert_eq!(clamped, Position::new(0.0, 608.0));
    }

    #[test]
    fn boundary_detection_covers_all_edges() {
        let bounds = Size::new(100, 100);
        assert!(rect(0.0, 50.0, 10, 10).is_at_boundary(bounds));
        assert!(rect(90.0, 50.0, 10, 10).is_at_boundary(bounds));
        assert!(rect(50.0, 0.0, 10, 10).is_at_boundary(bounds));
        assert!(rect(50.0, 90.0, 10, 10).is_at_boundary(bounds));
        assert!(!rect(50.0, 50.0, 10, 10).is_at_boundary(bounds));
    }

    #[test]
    fn intent_applies_flags_right_left_up_down() {
        let intent = Intent::IDLE
            .with(Direction::Down, true)
            .with(Direction::Left, true)
            .with(Direction::Right, true);
        let order: Vec<_> = intent.active().collect();
        assert_eq!(order, vec![Direction::Right, Direction::Left, Direction::Down]);
        assert_eq!(intent.heading(), None);
        assert_eq!(Intent::only(Direction::Up).heading(), Some(Direction::Up));
    }

    #[test]
    fn chance_extremes_are_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let never = Chance::per_ten_thousand(0);
        let always = Chance::per_ten_thousand(10_000);
        for _ in 0..1_000 {
            assert!(!never.roll(&mut rng));
            assert!(always.roll(&mut rng));
        }
    }

    #[test]
    fn safe_zone_is_half_open_box_around_centre() {
        let rules = Rules::default();
        assert!(rules.in_safe_zone(220, 220));
        assert!(rules.in_safe_zone(419, 419));
        assert!(!rules.in_safe_zone(420, 300));
        assert!(!rules.in_safe_zone(300, 219));
    }

    #[test]
    fn default_rules_validate_for_regular_sprites() {
        assert_eq!(Rules::default().validate(&sizes()), Ok(()));
    }

    #[test]
    fn validation_rejects_oversized_and_empty_sprites() {
        let rules = Rules::default();
        let mut oversized = sizes();
        oversized.monster = Size::new(641, 10);
        assert!(matches!(
            rules.validate(&oversized),
            Err(RulesError::SpriteExceedsWindow {
                kind: FigureKind::Monster,
                ..
            })
        ));

        let mut empty = sizes();
        empty.coin = Size::new(0, 16);
        assert_eq!(
            rules.validate(&empty),
            Err(RulesError::EmptySprite {
                kind: FigureKind::Coin
            })
        );
    }

    #[test]
    fn validation_rejects_safe_zone_covering_arena() {
        let rules = Rules {
            safe_zone_half_extent: 400,
            ..Rules::default()
        };
        assert_eq!(
            rules.validate(&sizes()),
            Err(RulesError::NoMonsterSpawnArea)
        );
    }
}

//! Movable rectangular entities that populate the arena.

use katorga_core::{
    Direction, FigureId, FigureKind, FigureSnapshot, Intent, Position, Rect, Size,
};

/// A positioned, sized, scoring entity: the player, a monster or a coin.
///
/// The figure remembers the bounds it lives in so every move can clamp it
/// back inside the window.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    id: FigureId,
    kind: FigureKind,
    rect: Rect,
    bounds: Size,
    score: u32,
    score_since_last_speedup: u32,
    speed: u32,
    intent: Intent,
}

impl Figure {
    /// Creates a figure whose position is clamped into `bounds`.
    #[must_use]
    pub fn new(
        id: FigureId,
        kind: FigureKind,
        position: Position,
        size: Size,
        bounds: Size,
        speed: u32,
    ) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(position, size).clamped(bounds),
            bounds,
            score: 0,
            score_since_last_speedup: 0,
            speed,
            intent: Intent::IDLE,
        }
    }

    /// Identifier assigned by the world.
    #[must_use]
    pub const fn id(&self) -> FigureId {
        self.id
    }

    /// Role of the figure.
    #[must_use]
    pub const fn kind(&self) -> FigureKind {
        self.kind
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.rect.position()
    }

    /// Area occupied by the figure.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Points gathered so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Points gathered since the last speed-up.
    #[must_use]
    pub const fn score_since_last_speedup(&self) -> u32 {
        self.score_since_last_speedup
    }

    /// Pixels moved per tick.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Directions the figure is trying to move in.
    #[must_use]
    pub const fn intent(&self) -> Intent {
        self.intent
    }

    /// Adds `points` to both the score and the speed-up counter.
    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.score_since_last_speedup = self.score_since_last_speedup.saturating_add(points);
    }

    /// Clears the speed-up counter.
    pub fn reset_speedup_counter(&mut self) {
        self.score_since_last_speedup = 0;
    }

    /// Raises the speed by one pixel per tick.
    pub fn increment_speed(&mut self) {
        self.speed = self.speed.saturating_add(1);
    }

    /// Displaces the figure and clamps each axis back into the bounds.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.rect = self.rect.translated(dx, dy).clamped(self.bounds);
    }

    /// Reports whether the figure is pressed against an edge of its bounds.
    #[must_use]
    pub fn is_at_boundary(&self) -> bool {
        self.rect.is_at_boundary(self.bounds)
    }

    /// Raises or clears one directional flag.
    pub fn set_intent(&mut self, direction: Direction, active: bool) {
        self.intent.set(direction, active);
    }

    /// Replaces the intent with a single heading.
    pub fn set_heading(&mut self, direction: Direction) {
        self.intent = Intent::only(direction);
    }

    /// Captures an immutable snapshot for systems and adapters.
    #[must_use]
    pub fn snapshot(&self) -> FigureSnapshot {
        FigureSnapshot {
            id: self.id,
            kind: self.kind,
            rect: self.rect,
            score: self.score,
            score_since_last_speedup: self.score_since_last_speedup,
            speed: self.speed,
            intent: self.intent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Size = Size::new(640, 640);

    fn player_at(x: f32, y: f32) -> Figure {
        Figure::new(
            FigureId::new(1),
            FigureKind::Player,
            Position::new(x, y),
            Size::new(32, 32),
            BOUNDS,
            1,
        )
    }

    #[test]
    fn add_points_feeds_score_and_speedup_counter() {
        let mut figure = player_at(0.0, 0.0);
        figure.add_points(3);
        figure.add_points(2);
        assert_eq!(figure.score(), 5);
        assert_eq!(figure.score_since_last_speedup(), 5);

        figure.reset_speedup_counter();
        assert_eq!(figure.score(), 5);
        assert_eq!(figure.score_since_last_speedup(), 0);
    }

    #[test]
    fn increment_speed_adds_one() {
        let mut figure = player_at(0.0, 0.0);
        figure.increment_speed();
        figure.increment_speed();
        assert_eq!(figure.speed(), 3);
    }

    #[test]
    fn moves_are_clamped_on_each_axis() {
        let mut figure = player_at(10.0, 600.0);
        figure.move_by(-25.0, 25.0);
        assert_eq!(figure.position(), Position::new(0.0, 608.0));

        figure.move_by(1_000.0, -1_000.0);
        assert_eq!(figure.position(), Position::new(608.0, 0.0));
    }

    #[test]
    fn zero_moves_are_idempotent() {
        let mut figure = player_at(123.0, 45.0);
        let before = figure.position();
        for _ in 0..5 {
            figure.move_by(0.0, 0.0);
        }
        assert_eq!(figure.position(), before);
    }

    #[test]
    fn arbitrary_move_sequences_stay_in_bounds() {
        let mut figure = player_at(320.0, 320.0);
        let deltas = [
            (-400.0, 7.5),
            (13.0, -900.0),
            (700.0, 700.0),
            (-0.5, -3.0),
            (-1_000.0, 1_000.0),
            (42.0, -42.0),
        ];
        for (dx, dy) in deltas {
            figure.move_by(dx, dy);
            let position = figure.position();
            assert!((0.0..=608.0).contains(&position.x()), "{position:?}");
            assert!((0.0..=608.0).contains(&position.y()), "{position:?}");
        }
    }

    #[test]
    fn boundary_reported_only_at_edges() {
        let mut figure = player_at(320.0, 320.0);
        assert!(!figure.is_at_boundary());
        figure.move_by(-500.0, 0.0);
        assert!(figure.is_at_boundary());
        figure.move_by(100.0, 0.0);
        assert!(!figure.is_at_boundary());
        figure.move_by(0.0, 500.0);
        assert!(figure.is_at_boundary());
    }

    #[test]
    fn heading_replaces_every_intent_flag() {
        let mut figure = player_at(0.0, 0.0);
        figure.set_intent(Direction::Left, true);
        figure.set_intent(Direction::Up, true);
        figure.set_heading(Direction::Down);
        assert_eq!(figure.intent(), Intent::only(Direction::Down));
    }
}

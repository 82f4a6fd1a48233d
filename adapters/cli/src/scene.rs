//! Translates world snapshots into drawable scene content.

use glam::Vec2;
use katorga_core::{FigureSnapshot, GameStatus};
use katorga_rendering::{Color, Scene, SpriteKey, SpritePlacement, StatusBanner, TextLabel};
use katorga_world::{query, World};

const FONT_SIZE: u16 = 24;
const SCORE_POSITION: Vec2 = Vec2::new(500.0, 10.0);

/// Rebuilds `scene` from the current world.
///
/// Sprites are always drawn. A status banner is added whenever the game is
/// not running.
pub(crate) fn populate(scene: &mut Scene, world: &World) {
    scene.clear();

    let player = query::player(world);
    scene.sprites.push(placement(&player));
    scene
        .sprites
        .extend(query::monsters(world).iter().map(placement));
    scene.sprites.extend(query::coins(world).iter().map(placement));

    let points_to_win = query::rules(world).points_to_win;
    scene.score = Some(TextLabel::new(
        score_text(player.score, points_to_win),
        SCORE_POSITION,
        FONT_SIZE,
        Color::BLACK,
    ));
    scene.status = status_text(query::status(world), player.score, points_to_win)
        .map(|text| StatusBanner::new(text, FONT_SIZE, Color::RED, Color::BLACK));
}

fn placement(figure: &FigureSnapshot) -> SpritePlacement {
    let position = figure.rect.position();
    SpritePlacement::new(
        SpriteKey::from(figure.kind),
        Vec2::new(position.x(), position.y()),
    )
}

fn score_text(score: u32, points_to_win: u32) -> String {
    format!("Points: {score}/{points_to_win}")
}

fn status_text(status: GameStatus, score: u32, points_to_win: u32) -> Option<String> {
    match status {
        GameStatus::Waiting => Some(format!(
            "You need to get {points_to_win} points. Press F2 to start."
        )),
        GameStatus::Active => None,
        GameStatus::Won => Some("Congratulations, you won the game!".to_owned()),
        GameStatus::Lost => Some(format!("Game over! Your points {score}/{points_to_win}")),
    }
}

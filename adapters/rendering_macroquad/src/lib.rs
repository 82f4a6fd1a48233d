#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for KaToRga.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod sprites;

use anyhow::{Context, Result};
use glam::Vec2;
use katorga_core::{Direction, Intent};
use katorga_rendering::{
    FrameInput, KeyChange, Presentation, RenderingBackend, Scene, StatusBanner, TextLabel,
    Viewport,
};
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::mpsc,
    time::{Duration, Instant},
};

use self::sprites::{DrawParams, SpriteAtlas};

const ARROW_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::Right, Direction::Right),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
];

/// Tracks which direction keys are held and reports their edges.
#[derive(Clone, Copy, Debug)]
pub struct DirectionKeys {
    held: Intent,
}

impl Default for DirectionKeys {
    fn default() -> Self {
        Self { held: Intent::IDLE }
    }
}

impl DirectionKeys {
    /// Records whether the key for `direction` is down this frame.
    ///
    /// Returns the change when the key went down or came up since the last
    /// observation, and `None` while it stays in the same state.
    pub fn observe(&mut self, direction: Direction, down: bool) -> Option<KeyChange> {
        if self.held.is_set(direction) == down {
            return None;
        }
        self.held.set(direction, down);
        Some(KeyChange {
            direction,
            pressed: down,
        })
    }

    /// Directions whose keys are currently held.
    #[must_use]
    pub fn held(&self) -> Intent {
        self.held
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// `F2` starts the game.
    start_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            start_requested: is_key_pressed(KeyCode::F2),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            manifest_path: Self::default_manifest_path(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default manifest path relative to the working directory.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Loads sprites from the manifest at `path` instead of the default location.
    #[must_use]
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update: self.update_accum / self.frames,
            avg_render: self.render_accum / self.frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<B, F>(self, presentation: Presentation, bootstrap: B) -> Result<()>
    where
        B: FnOnce(katorga_core::FigureSizes) -> Result<F> + 'static,
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let arena = scene.arena();
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: arena.x as i32,
            window_height: arena.y as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;

            let loaded = SpriteAtlas::from_manifest_path(&manifest_path)
                .with_context(|| {
                    format!(
                        "failed to initialise sprite atlas from {}",
                        manifest_path.display()
                    )
                })
                .and_then(|atlas| {
                    let sizes = atlas.figure_sizes()?;
                    log::info!(
                        "loaded {} sprites from {} (player {}x{}, monster {}x{}, coin {}x{})",
                        atlas.texture_count(),
                        manifest_path.display(),
                        sizes.player.width(),
                        sizes.player.height(),
                        sizes.monster.width(),
                        sizes.monster.height(),
                        sizes.coin.width(),
                        sizes.coin.height(),
                    );
                    let update_scene = bootstrap(sizes)?;
                    Ok((atlas, update_scene))
                });
            let (sprite_atlas, mut update_scene) = match loaded {
                Ok(loaded) => {
                    let _ = init_sender.send(Ok(()));
                    loaded
                }
                Err(error) => {
                    let _ = init_sender.send(Err(error));
                    return;
                }
            };

            let background = to_macroquad_color(clear_color);
            let mut direction_keys = DirectionKeys::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(&mut direction_keys, keyboard);

                let update_start = Instant::now();
                update_scene(frame_dt, frame_input, &mut scene);
                let update_duration = update_start.elapsed();

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                let viewport = Viewport::fit(
                    scene.arena(),
                    Vec2::new(
                        macroquad::window::screen_width(),
                        macroquad::window::screen_height(),
                    ),
                );
                draw_sprites(&scene, &viewport, &sprite_atlas);
                if let Some(label) = &scene.score {
                    draw_label(label, &viewport);
                }
                if let Some(banner) = &scene.status {
                    draw_banner(banner, scene.arena(), &viewport);
                }
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    update: update_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        log::info!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn gather_frame_input(keys: &mut DirectionKeys, keyboard: KeyboardShortcuts) -> FrameInput {
    let key_changes = ARROW_BINDINGS
        .into_iter()
        .filter_map(|(code, direction)| keys.observe(direction, is_key_down(code)))
        .collect();

    FrameInput {
        key_changes,
        start_requested: keyboard.start_requested,
    }
}

fn draw_sprites(scene: &Scene, viewport: &Viewport, atlas: &SpriteAtlas) {
    for placement in &scene.sprites {
        let params = DrawParams::new(viewport.to_screen(placement.position), viewport.scale);
        if let Err(error) = atlas.draw(placement.sprite, params) {
            log::warn!("{error:#}");
        }
    }
}

fn scaled_font_size(font_size: u16, viewport: &Viewport) -> u16 {
    (f32::from(font_size) * viewport.scale).round().clamp(1.0, f32::from(u16::MAX)) as u16
}

fn draw_label(label: &TextLabel, viewport: &Viewport) {
    let font_size = scaled_font_size(label.font_size, viewport);
    let dimensions = macroquad::text::measure_text(&label.text, None, font_size, 1.0);
    let anchor = viewport.to_screen(label.position);
    let _ = macroquad::text::draw_text(
        &label.text,
        anchor.x,
        anchor.y + dimensions.offset_y,
        f32::from(font_size),
        to_macroquad_color(label.color),
    );
}

fn draw_banner(banner: &StatusBanner, arena: Vec2, viewport: &Viewport) {
    let font_size = scaled_font_size(banner.font_size, viewport);
    let dimensions = macroquad::text::measure_text(&banner.text, None, font_size, 1.0);
    let size = Vec2::new(dimensions.width, dimensions.height);
    let top_left = banner_origin(arena, size, viewport);

    macroquad::shapes::draw_rectangle(
        top_left.x,
        top_left.y,
        size.x,
        size.y,
        to_macroquad_color(banner.background),
    );
    let _ = macroquad::text::draw_text(
        &banner.text,
        top_left.x,
        top_left.y + dimensions.offset_y,
        f32::from(font_size),
        to_macroquad_color(banner.text_color),
    );
}

/// Screen position of a box of `size` screen pixels centred in the arena.
fn banner_origin(arena: Vec2, size: Vec2, viewport: &Viewport) -> Vec2 {
    viewport.to_screen(arena * 0.5) - size * 0.5
}

fn to_macroquad_color(color: katorga_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for KaToRga adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use katorga_core::{Direction, FigureKind, FigureSizes};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Identifies a sprite texture known to rendering backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// The player's robot.
    Player,
    /// A wandering monster.
    Monster,
    /// A collectible coin.
    Coin,
}

impl SpriteKey {
    /// Every sprite key in canonical load order.
    pub const ALL: [SpriteKey; 3] = [SpriteKey::Player, SpriteKey::Monster, SpriteKey::Coin];

    /// Name used for the key in sprite manifests.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Monster => "Monster",
            Self::Coin => "Coin",
        }
    }
}

impl From<FigureKind> for SpriteKey {
    fn from(kind: FigureKind) -> Self {
        match kind {
            FigureKind::Player => Self::Player,
            FigureKind::Monster => Self::Monster,
            FigureKind::Coin => Self::Coin,
        }
    }
}

/// Sprite drawn with its top-left corner at a scene position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpritePlacement {
    /// Texture to draw.
    pub sprite: SpriteKey,
    /// Top-left corner in scene pixels.
    pub position: Vec2,
}

impl SpritePlacement {
    /// Creates a new sprite placement.
    #[must_use]
    pub const fn new(sprite: SpriteKey, position: Vec2) -> Self {
        Self { sprite, position }
    }
}

/// Single line of text anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text to draw.
    pub text: String,
    /// Top-left corner in scene pixels.
    pub position: Vec2,
    /// Font size in scene pixels.
    pub font_size: u16,
    /// Glyph color.
    pub color: Color,
}

impl TextLabel {
    /// Creates a new text label.
    #[must_use]
    pub fn new(text: impl Into<String>, position: Vec2, font_size: u16, color: Color) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
            color,
        }
    }
}

/// Message centred in the arena on top of a solid box.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBanner {
    /// Text to draw.
    pub text: String,
    /// Font size in scene pixels.
    pub font_size: u16,
    /// Glyph color.
    pub text_color: Color,
    /// Fill color of the box behind the text.
    pub background: Color,
}

impl StatusBanner {
    /// Creates a new status banner.
    #[must_use]
    pub fn new(text: impl Into<String>, font_size: u16, text_color: Color, background: Color) -> Self {
        Self {
            text: text.into(),
            font_size,
            text_color,
            background,
        }
    }
}

/// Everything drawn in a single frame, in scene pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    arena: Vec2,
    /// Sprites drawn in order, later entries on top.
    pub sprites: Vec<SpritePlacement>,
    /// Label drawn above the sprites.
    pub score: Option<TextLabel>,
    /// Banner drawn above everything else.
    pub status: Option<StatusBanner>,
}

impl Scene {
    /// Creates an empty scene covering an arena of the given size.
    pub fn new(arena: Vec2) -> Result<Self, RenderingError> {
        let valid = arena.x.is_finite() && arena.y.is_finite() && arena.x > 0.0 && arena.y > 0.0;
        if !valid {
            return Err(RenderingError::InvalidArena { arena });
        }

        Ok(Self {
            arena,
            sprites: Vec::new(),
            score: None,
            status: None,
        })
    }

    /// Size of the arena in scene pixels.
    #[must_use]
    pub const fn arena(&self) -> Vec2 {
        self.arena
    }

    /// Removes every drawable while keeping the arena.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.score = None;
        self.status = None;
    }
}

/// Uniform scale and offset that letterboxes the arena into a framebuffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Screen pixels per scene pixel.
    pub scale: f32,
    /// Screen position of the arena's top-left corner.
    pub offset: Vec2,
}

impl Viewport {
    /// Fits `arena` into `screen` preserving its aspect ratio.
    #[must_use]
    pub fn fit(arena: Vec2, screen: Vec2) -> Self {
        let scale = if arena.x <= f32::EPSILON || arena.y <= f32::EPSILON {
            1.0
        } else {
            (screen.x / arena.x).min(screen.y / arena.y).max(0.0)
        };
        let offset = ((screen - arena * scale) * 0.5).max(Vec2::ZERO);
        Self { scale, offset }
    }

    /// Converts a scene position into screen pixels.
    #[must_use]
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.scale
    }
}

/// Change of a direction key observed during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChange {
    /// Direction bound to the key.
    pub direction: Direction,
    /// `true` on key-down, `false` on key-up.
    pub pressed: bool,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Direction key edges observed this frame, in observation order.
    pub key_changes: Vec<KeyChange>,
    /// Whether the start key was pressed this frame.
    pub start_requested: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting KaToRga scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// Once sprite textures are available the backend calls `bootstrap` with
    /// their pixel sizes. The returned closure is then invoked every frame
    /// with the elapsed frame time and the captured input, and may rewrite the
    /// scene before it is drawn. Errors from loading textures or from
    /// `bootstrap` are returned from `run`.
    fn run<B, F>(self, presentation: Presentation, bootstrap: B) -> AnyResult<()>
    where
        B: FnOnce(FigureSizes) -> AnyResult<F> + 'static,
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The arena must have a positive, finite size.
    InvalidArena {
        /// Provided arena size that failed validation.
        arena: Vec2,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArena { arena } => {
                write!(
                    f,
                    "arena must have a positive size (received {}x{})",
                    arena.x, arena.y
                )
            }
        }
    }
}

impl Error for RenderingError {}

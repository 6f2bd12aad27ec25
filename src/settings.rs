//! Game settings and tuning
//!
//! Persisted as JSON in LocalStorage. Every field has a default so older
//! saved blobs keep loading after new knobs are added. Device and screen
//! derived values are only computed on first run; a stored blob wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens when the ball reaches the bottom edge of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BottomEdge {
    /// Ball is lost and a life is consumed
    #[default]
    LoseLife,
    /// Bottom behaves like the other walls
    Reflect,
}

/// Brick grid description; one row per colour, top row first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    pub colours: Vec<String>,
    pub bricks_per_row: u32,
    pub row_height: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            colours: BRICK_COLOURS.iter().map(|c| c.to_string()).collect(),
            bricks_per_row: BRICKS_PER_ROW,
            row_height: BRICK_ROW_HEIGHT,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle and the bottom edge
    pub paddle_margin: f32,
    /// Horizontal speed while a direction is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub initial_ball_speed: f32,
    pub initial_balls: u32,
    pub speed_increment: f32,
    pub bonus_balls: u32,
    pub brick_restitution: f32,
    pub bottom_edge: BottomEdge,

    // === Bricks ===
    pub layout: BrickLayout,

    // === Palette ===
    pub background_colour: String,
    pub text_colour: String,
    pub ball_colour: String,
    pub paddle_colour: String,
}

impl Default for Settings {
    fn default() -> Self {
        let (surface_width, surface_height) = Self::surface_size(16.0, 9.0);
        Self {
            surface_width,
            surface_height,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            initial_ball_speed: INITIAL_BALL_SPEED,
            initial_balls: INITIAL_BALLS,
            speed_increment: BALL_SPEED_INCREMENT,
            bonus_balls: ROUND_BONUS_BALLS,
            brick_restitution: BRICK_RESTITUTION,
            bottom_edge: BottomEdge::LoseLife,

            layout: BrickLayout::default(),

            background_colour: BACKGROUND_COLOUR.to_string(),
            text_colour: TEXT_COLOUR.to_string(),
            ball_colour: BALL_COLOUR.to_string(),
            paddle_colour: PADDLE_COLOUR.to_string(),
        }
    }
}

impl Settings {
    /// Logical surface size for a screen of the given available dimensions.
    /// Width is fixed; portrait screens get a 1.6 ratio, landscape follows the screen.
    pub fn surface_size(avail_width: f32, avail_height: f32) -> (f32, f32) {
        let width = SURFACE_WIDTH;
        let resolution = if avail_height > 0.0 {
            avail_width / avail_height
        } else {
            0.0
        };
        let height = if resolution < 1.0 {
            width / PORTRAIT_ASPECT
        } else {
            width / resolution
        };
        (width, height)
    }

    /// Resize the surface for the given screen
    pub fn fit_screen(&mut self, avail_width: f32, avail_height: f32) {
        let (width, height) = Self::surface_size(avail_width, avail_height);
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Pick paddle speed for the device class
    pub fn for_device(mut self, mobile: bool) -> Self {
        self.paddle_speed = if mobile {
            MOBILE_PADDLE_SPEED
        } else {
            PADDLE_SPEED
        };
        self
    }

    pub fn surface_size_vec(&self) -> Vec2 {
        Vec2::new(self.surface_width, self.surface_height)
    }

    /// Where the paddle sits at session start (horizontally centred)
    pub fn paddle_origin(&self) -> Vec2 {
        Vec2::new(
            (self.surface_width - self.paddle_width) / 2.0,
            self.surface_height - self.paddle_height - self.paddle_margin,
        )
    }

    /// Settings for a new session: the stored blob when there is one,
    /// otherwise defaults fitted to the device and screen
    pub fn for_session(stored: Option<Self>, mobile: bool, screen: Option<(f32, f32)>) -> Self {
        if let Some(stored) = stored {
            return stored;
        }
        let mut settings = Self::default().for_device(mobile);
        if let Some((width, height)) = screen {
            settings.fit_screen(width, height);
        }
        settings
    }

    /// Parse settings from JSON, falling back to defaults for absent fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return Some(settings);
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("No stored settings");
        None
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

//! Brick Pong - A canvas Breakout/Pong hybrid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, world state)
//! - `renderer`: Drawing surface abstraction and canvas binding
//! - `settings`: Data-driven game tuning, persisted in LocalStorage
//! - `error`: Setup failures (canvas/context acquisition)

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use settings::{BottomEdge, BrickLayout, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical surface width; height is derived from the screen aspect
    pub const SURFACE_WIDTH: f32 = 1000.0;
    /// Height divisor used for portrait screens
    pub const PORTRAIT_ASPECT: f32 = 1.6;

    /// Score board dimensions
    pub const SCOREBOARD_WIDTH: f32 = 1000.0;
    pub const SCOREBOARD_HEIGHT: f32 = 60.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 9.0;
    pub const INITIAL_BALL_SPEED: f32 = 5.0;
    pub const INITIAL_BALLS: u32 = 3;
    /// Added to ball speed every time the brick set is cleared
    pub const BALL_SPEED_INCREMENT: f32 = 1.0;
    /// Extra lives granted on round completion
    pub const ROUND_BONUS_BALLS: u32 = 1;
    /// Velocity multiplier applied on every brick bounce
    pub const BRICK_RESTITUTION: f32 = 1.02;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 62.5;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const MOBILE_PADDLE_SPEED: f32 = 14.0;

    /// Brick layout defaults
    pub const BRICKS_PER_ROW: u32 = 8;
    pub const BRICK_ROW_HEIGHT: f32 = 20.0;
    /// Horizontal gap factor between bricks
    pub const BRICK_SPACING: f32 = 1.05;
    /// Vertical gap factor between rows
    pub const BRICK_ROW_SPACING: f32 = 1.6;

    /// Palette
    pub const BACKGROUND_COLOUR: &str = "#7AA2F7";
    pub const TEXT_COLOUR: &str = "#FFFFFF";
    pub const BALL_COLOUR: &str = "#414868";
    pub const PADDLE_COLOUR: &str = "#15161E";
    pub const BRICK_COLOURS: [&str; 4] = ["#9ECE6A", "#E0AF68", "#F7768E", "#7DCFFF"];

    /// Keyboard identifiers for the two directions
    pub const ARROW_LEFT: &str = "ArrowLeft";
    pub const ARROW_RIGHT: &str = "ArrowRight";
}

/// User agent fragments that mark a touch-first device
const MOBILE_AGENTS: [&str; 7] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
];

/// Whether the given user agent string belongs to a mobile device
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let agent = user_agent.to_lowercase();
    MOBILE_AGENTS.iter().any(|fragment| agent.contains(fragment))
}

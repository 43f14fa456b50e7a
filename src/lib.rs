//! Tilt Coins - a tilt-controlled coin collecting arcade game
//!
//! Core modules:
//! - `telemetry`: Serial motion sensor link (line parsing, latest-wins buffer, reader thread)
//! - `sim`: Simulation (gestures, physics, collisions, game flow)
//! - `renderer`/`hud`: Terminal presentation
//! - `audio`: Sound effect capability
//! - `settings`: Startup configuration

pub mod audio;
pub mod clock;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use clock::GameClock;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Main loop rate
    pub const FPS: u32 = 30;

    /// Arena (screen rectangle) dimensions
    pub const ARENA_WIDTH: f32 = 900.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Tilt thresholds (raw accelerometer units, exclusive)
    pub const AX_POS_THRESHOLD: i32 = 2000;
    pub const AX_NEG_THRESHOLD: i32 = -2000;
    pub const AY_POS_THRESHOLD: i32 = 2000;
    pub const AY_NEG_THRESHOLD: i32 = -2000;

    /// Seconds between accepted character switches
    pub const SWITCH_DEBOUNCE: f64 = 0.5;
    /// |az| spike that counts as a shake
    pub const SHAKE_THRESHOLD: i32 = 15000;
    /// Button value reported while pressed
    pub const BUTTON_PRESSED: i32 = 1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 25.0;
    /// Movement per tick per input direction
    pub const BALL_SPEED: f32 = 5.0;

    /// Coins
    pub const COIN_RADIUS: f32 = 15.0;
    pub const POWERUP_CHANCE: f64 = 0.18;
    pub const COIN_POINTS: u32 = 1;
    pub const SPECIAL_COIN_POINTS: u32 = 5;

    /// Power-up
    pub const POWERUP_DURATION: f64 = 6.0;
    pub const POWERUP_RADIUS_BONUS: f32 = 8.0;

    /// Obstacles
    pub const OBSTACLE_COUNT: usize = 3;
    pub const OBSTACLE_MIN_SPEED: f32 = 2.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 4.0;
    pub const OBSTACLE_MIN_WIDTH: f32 = 30.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 70.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;

    /// Round length in seconds
    pub const GAME_DURATION: f64 = 60.0;

    /// Telemetry line buffer capacity (oldest evicted on overflow)
    pub const TELEMETRY_CAPACITY: usize = 100;
    /// Reader idle yield when no bytes are available (ms)
    pub const READER_IDLE_MS: u64 = 5;
    /// Reader backoff after a read error (ms)
    pub const READER_ERROR_BACKOFF_MS: u64 = 100;
}

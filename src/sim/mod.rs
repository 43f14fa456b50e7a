//! Simulation module
//!
//! All gameplay logic lives here. It stays free of rendering, audio and I/O:
//! - Time comes in as plain seconds
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s

pub mod collision;
pub mod gesture;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_rect_collision, circles_overlap, clamp_circle};
pub use gesture::{Gesture, KeyState, SwitchTrigger, tilt_delta};
pub use state::{
    CHARACTERS, Character, Coin, Command, Game, GameEvent, GamePhase, Obstacle, PowerState, Rgb,
    Roster, RoundEnd, RoundState,
};
pub use tick::{TickInput, tick};

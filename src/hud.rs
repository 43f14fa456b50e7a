//! Text shown over the playfield for each phase

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::{Game, GamePhase, Rgb};

const WHITE: Rgb = Rgb(255, 255, 255);
const HUD: Rgb = Rgb(240, 240, 240);
const POWER: Rgb = Rgb(255, 180, 60);

/// Horizontal placement in arena pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    /// Left edge at x
    At(f32),
    /// Centred on the arena
    Center,
}

/// A line of text anchored in arena coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub align: Align,
    /// Baseline row in arena pixels
    pub y: f32,
    pub color: Rgb,
    /// Title-sized text
    pub big: bool,
}

impl Overlay {
    fn centered(text: impl Into<String>, y: f32, big: bool) -> Self {
        Self {
            text: text.into(),
            align: Align::Center,
            y,
            color: WHITE,
            big,
        }
    }

    fn at(text: impl Into<String>, x: f32, y: f32, color: Rgb) -> Self {
        Self {
            text: text.into(),
            align: Align::At(x),
            y,
            color,
            big: false,
        }
    }
}

/// Overlays for the current phase at time `now`
pub fn overlays(game: &Game, now: f64) -> Vec<Overlay> {
    let mid = ARENA_HEIGHT / 2.0;
    match game.phase {
        GamePhase::Menu => vec![
            Overlay::centered("TILT COINS", mid - 80.0, true),
            Overlay::centered("Press ENTER to start • ESC to quit", mid, false),
            Overlay::centered(
                "Tilt to move, press the button or shake to switch character",
                mid + 40.0,
                false,
            ),
            Overlay::centered(
                format!("Character: {}", game.roster.current().name),
                mid + 80.0,
                false,
            ),
        ],
        GamePhase::Play => {
            let round = &game.round;
            let mut lines = vec![
                Overlay::at(format!("Score: {}", round.score), 16.0, 12.0, HUD),
                Overlay::at(
                    format!("Time: {}s", round.time_left(now).floor() as u32),
                    ARENA_WIDTH - 160.0,
                    12.0,
                    HUD,
                ),
                Overlay::at(
                    format!("Char: {}", game.roster.current().name),
                    ARENA_WIDTH / 2.0 - 80.0,
                    12.0,
                    HUD,
                ),
            ];
            if round.power.active {
                lines.push(Overlay::at(
                    format!("POWER! {}s", round.power.remaining(now).floor() as u32),
                    ARENA_WIDTH / 2.0 - 80.0,
                    46.0,
                    POWER,
                ));
            }
            lines
        }
        GamePhase::Pause => vec![
            Overlay::centered("PAUSED", mid - 20.0, true),
            Overlay::centered(
                "Press P to resume • ESC to exit to menu",
                mid + 40.0,
                false,
            ),
        ],
        GamePhase::GameOver => vec![
            Overlay::centered("GAME OVER", mid - 80.0, true),
            Overlay::centered(format!("Score: {}", game.round.score), mid, false),
            Overlay::centered(
                "Press ENTER to play again • ESC to return to menu",
                mid + 40.0,
                false,
            ),
        ],
    }
}

//! Draws the playfield for each phase

use glam::Vec2;

use super::Canvas;
use crate::consts::*;
use crate::sim::{Game, GamePhase, Rgb};

pub const BACKGROUND: Rgb = Rgb(30, 30, 30);
pub const COIN: Rgb = Rgb(240, 200, 40);
pub const SPECIAL_COIN: Rgb = Rgb(200, 40, 200);
/// Brighter magenta used under the pause dimming
pub const SPECIAL_COIN_PAUSED: Rgb = Rgb(255, 0, 255);
pub const SPARKLE: Rgb = Rgb(255, 220, 255);
pub const OBSTACLE: Rgb = Rgb(180, 60, 60);

/// Share of brightness left by the pause overlay
const PAUSE_KEEP: f32 = 1.0 - 150.0 / 255.0;

/// Rasterise the game into `canvas`. Text overlays are drawn separately.
pub fn draw(canvas: &mut Canvas, game: &Game, _now: f64) {
    canvas.clear(BACKGROUND);
    let round = &game.round;
    let character = game.roster.current();

    match game.phase {
        GamePhase::Menu => {
            // Preview of the selected character
            let preview = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0 + 160.0);
            canvas.fill_circle(preview, character.radius, character.color);
        }
        GamePhase::Play | GamePhase::Pause => {
            let paused = game.phase == GamePhase::Pause;
            let coin = &round.coin;
            if coin.special {
                let color = if paused { SPECIAL_COIN_PAUSED } else { SPECIAL_COIN };
                canvas.fill_circle(coin.pos, COIN_RADIUS, color);
                canvas.ring(coin.pos, COIN_RADIUS / 2.0, SPARKLE);
            } else {
                canvas.fill_circle(coin.pos, COIN_RADIUS, COIN);
            }
            for ob in &round.obstacles {
                canvas.fill_rect(ob.pos, ob.size, OBSTACLE);
            }
            canvas.fill_circle(round.ball, character.radius, character.color);
            if paused {
                canvas.dim(PAUSE_KEEP);
            }
        }
        GamePhase::GameOver => {
            for ob in &round.obstacles {
                canvas.fill_rect(ob.pos, ob.size, OBSTACLE);
            }
            canvas.fill_circle(round.ball, character.radius, character.color);
        }
    }
}

//! Per-frame simulation tick
//!
//! Order within a tick: player commands drive phase transitions, the newest
//! sensor sample updates tilt and may switch character, then (in Play only) the
//! ball, coin, power-up, obstacles and round clock advance. The tick that
//! starts a round only lays it out.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_rect_collision, circles_overlap, clamp_circle};
use super::gesture::KeyState;
use super::state::{Coin, Command, Game, GameEvent, GamePhase, RoundEnd, RoundState, Roster};
use crate::consts::*;
use crate::telemetry::SensorSample;

/// Input gathered for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses since the last tick, in order
    pub commands: Vec<Command>,
    /// Newest valid sensor sample, if one arrived
    pub sample: Option<SensorSample>,
    /// Arrow keys held
    pub keys: KeyState,
}

/// Advance the game by one frame at wall-clock time `now` (seconds)
pub fn tick(game: &mut Game, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut round_started = false;

    for &command in &input.commands {
        let from = game.phase;
        let to = from.transition(command);
        if to == from {
            continue;
        }
        if GamePhase::starts_round(from, to) {
            game.start_round(now);
            round_started = true;
            events.push(GameEvent::RoundStarted);
        }
        game.phase = to;
        events.push(GameEvent::PhaseChanged { from, to });
    }

    if let Some(sample) = &input.sample {
        if let Some(trigger) = game.gesture.apply(sample, now) {
            let index = game.roster.advance(game.round.power.active);
            log::debug!("Switched to {} ({trigger:?})", game.roster.current().name);
            events.push(GameEvent::CharacterSwitched { index });
        }
    }

    // A fresh layout is shown for one frame before anything moves
    if game.phase == GamePhase::Play && !round_started {
        let movement = game.gesture.movement(&input.keys);
        if let Some(reason) = step_round(
            &mut game.round,
            &mut game.roster,
            &mut game.rng,
            movement,
            now,
            &mut events,
        ) {
            let score = game.round.score;
            log::info!("Round over ({reason:?}), score {score}");
            game.phase = GamePhase::GameOver;
            events.push(GameEvent::PhaseChanged {
                from: GamePhase::Play,
                to: GamePhase::GameOver,
            });
            events.push(GameEvent::RoundOver { reason, score });
        }
    }

    events
}

/// One physics step of an active round. Returns why the round ended, if it did.
fn step_round(
    round: &mut RoundState,
    roster: &mut Roster,
    rng: &mut impl Rng,
    movement: Vec2,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Option<RoundEnd> {
    let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);

    round.ball = clamp_circle(round.ball + movement, roster.current().radius, arena);

    if circles_overlap(round.ball, roster.current().radius, round.coin.pos, COIN_RADIUS) {
        if round.coin.special {
            round.score += SPECIAL_COIN_POINTS;
            round.power.active = true;
            round.power.ends_at = now + POWERUP_DURATION;
            roster.set_powered(true);
            log::debug!("Power-up until {:.1}", round.power.ends_at);
            events.push(GameEvent::PowerUpCollected {
                points: SPECIAL_COIN_POINTS,
            });
        } else {
            round.score += COIN_POINTS;
            events.push(GameEvent::CoinCollected { points: COIN_POINTS });
        }
        round.coin = Coin::spawn(rng);
    }

    if round.power.active && now >= round.power.ends_at {
        round.power.active = false;
        roster.set_powered(false);
        log::debug!("Power-up expired");
        events.push(GameEvent::PowerUpExpired);
    }

    for obstacle in &mut round.obstacles {
        obstacle.update();
    }

    let radius = roster.current().radius;
    let hit = round
        .obstacles
        .iter()
        .any(|o| circle_rect_collision(round.ball, radius, o.pos, o.size).hit);
    if hit {
        return Some(RoundEnd::Collision);
    }

    if round.elapsed(now) >= GAME_DURATION {
        return Some(RoundEnd::TimeUp);
    }

    None
}

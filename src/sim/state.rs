//! Game state and core simulation types
//!
//! Everything a round needs lives in `RoundState` and is rebuilt in one go by
//! `Game::start_round`. The character roster outlives rounds.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::gesture::Gesture;
use crate::consts::*;

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Active gameplay
    Play,
    /// Gameplay frozen (wall clock keeps running)
    Pause,
    /// Round ended
    GameOver,
}

/// Discrete player commands (key presses)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enter
    Confirm,
    /// Escape
    Cancel,
    /// P
    Pause,
}

impl GamePhase {
    /// Next phase for a command. Commands that mean nothing in the current phase
    /// leave it unchanged.
    pub fn transition(self, command: Command) -> GamePhase {
        match (self, command) {
            (GamePhase::Menu, Command::Confirm) => GamePhase::Play,
            (GamePhase::Play, Command::Pause) => GamePhase::Pause,
            (GamePhase::Play, Command::Cancel) => GamePhase::Menu,
            (GamePhase::Pause, Command::Pause) => GamePhase::Play,
            (GamePhase::Pause, Command::Cancel) => GamePhase::Menu,
            (GamePhase::GameOver, Command::Confirm) => GamePhase::Play,
            (GamePhase::GameOver, Command::Cancel) => GamePhase::Menu,
            (phase, _) => phase,
        }
    }

    /// Entering Play from anywhere but Pause begins a fresh round
    pub fn starts_round(from: GamePhase, to: GamePhase) -> bool {
        to == GamePhase::Play && from != GamePhase::Pause
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Collision,
    TimeUp,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    RoundStarted,
    CoinCollected { points: u32 },
    PowerUpCollected { points: u32 },
    PowerUpExpired,
    CharacterSwitched { index: usize },
    RoundOver { reason: RoundEnd, score: u32 },
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A playable ball skin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub name: &'static str,
    pub color: Rgb,
    pub base_radius: f32,
    /// Current radius (base, or enlarged while powered)
    pub radius: f32,
}

impl Character {
    pub const fn new(name: &'static str, color: Rgb) -> Self {
        Self {
            name,
            color,
            base_radius: BALL_RADIUS,
            radius: BALL_RADIUS,
        }
    }

    pub fn enlarged(self) -> Self {
        Self {
            radius: self.base_radius + POWERUP_RADIUS_BONUS,
            ..self
        }
    }

    pub fn restored(self) -> Self {
        Self {
            radius: self.base_radius,
            ..self
        }
    }
}

/// The fixed character set
pub const CHARACTERS: [Character; 3] = [
    Character::new("Green", Rgb(60, 200, 80)),
    Character::new("Blue", Rgb(60, 140, 220)),
    Character::new("Orange", Rgb(255, 165, 60)),
];

/// Fixed character set with a cycling "current" index
#[derive(Debug, Clone)]
pub struct Roster {
    characters: [Character; 3],
    current: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            characters: CHARACTERS,
            current: 0,
        }
    }
}

impl Roster {
    pub fn current(&self) -> &Character {
        &self.characters[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Cycle to the next character. A power-up bonus moves with the ball.
    pub fn advance(&mut self, powered: bool) -> usize {
        let outgoing = self.current;
        self.current = (self.current + 1) % self.characters.len();
        if powered {
            self.characters[outgoing] = self.characters[outgoing].restored();
            self.characters[self.current] = self.characters[self.current].enlarged();
        }
        self.current
    }

    /// Enlarge or restore the current character
    pub fn set_powered(&mut self, powered: bool) {
        let c = self.characters[self.current];
        self.characters[self.current] = if powered { c.enlarged() } else { c.restored() };
    }

    pub fn restore_all(&mut self) {
        for c in &mut self.characters {
            *c = c.restored();
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub pos: Vec2,
    /// Special coins give bonus points and a power-up
    pub special: bool,
}

impl Coin {
    /// Spawn at a uniform position fully inside the arena
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(COIN_RADIUS..=ARENA_WIDTH - COIN_RADIUS),
                rng.random_range(COIN_RADIUS..=ARENA_HEIGHT - COIN_RADIUS),
            ),
            special: rng.random_bool(POWERUP_CHANCE),
        }
    }
}

/// A bouncing rectangular hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement per tick
    pub vel: Vec2,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    /// Random size, position and speed within the configured bounds
    pub fn random(rng: &mut impl Rng) -> Self {
        let w = rng.random_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH);
        let h = rng.random_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT);
        let x = rng.random_range(0.0..=ARENA_WIDTH - w);
        let y = rng.random_range(0.0..=ARENA_HEIGHT - h);
        let mut speed = || {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            sign * rng.random_range(OBSTACLE_MIN_SPEED..=OBSTACLE_MAX_SPEED)
        };
        let vel = Vec2::new(speed(), speed());
        Self::new(Vec2::new(x, y), Vec2::new(w, h), vel)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move one tick, bouncing off the arena edges
    pub fn update(&mut self) {
        self.pos += self.vel;
        super::collision::bounce_in_bounds(
            &mut self.pos,
            &mut self.vel,
            self.size,
            Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        );
    }
}

/// Temporary power-up window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PowerState {
    pub active: bool,
    /// Deadline in clock seconds; meaningless while inactive
    pub ends_at: f64,
}

impl PowerState {
    /// Seconds left, zero when inactive or expired
    pub fn remaining(&self, now: f64) -> f64 {
        if self.active {
            (self.ends_at - now).max(0.0)
        } else {
            0.0
        }
    }
}

/// Everything created when a round starts
#[derive(Debug, Clone)]
pub struct RoundState {
    pub score: u32,
    pub start_time: f64,
    /// Ball centre; its radius is the current character's
    pub ball: Vec2,
    pub coin: Coin,
    pub obstacles: Vec<Obstacle>,
    pub power: PowerState,
}

impl RoundState {
    pub fn new(rng: &mut impl Rng, now: f64) -> Self {
        let coin = Coin::spawn(rng);
        let obstacles = (0..OBSTACLE_COUNT).map(|_| Obstacle::random(rng)).collect();
        Self {
            score: 0,
            start_time: now,
            ball: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            coin,
            obstacles,
            power: PowerState::default(),
        }
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Seconds left in the round, never negative
    pub fn time_left(&self, now: f64) -> f64 {
        (GAME_DURATION - self.elapsed(now)).max(0.0)
    }
}

/// Complete game: flow phase, characters, input interpretation and the current round
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    pub roster: Roster,
    pub gesture: Gesture,
    pub round: RoundState,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) rng: Pcg32,
}

impl Game {
    /// Create a game sitting in the menu, with a round already laid out behind it
    pub fn new(seed: u64, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = RoundState::new(&mut rng, now);
        Self {
            phase: GamePhase::Menu,
            roster: Roster::default(),
            gesture: Gesture::default(),
            round,
            seed,
            rng,
        }
    }

    /// Replace the round with a fresh one and drop any lingering power-up size
    pub fn start_round(&mut self, now: f64) {
        self.round = RoundState::new(&mut self.rng, now);
        self.roster.restore_all();
        log::info!("Round started (seed {})", self.seed);
        log::debug!(
            "Coin at {:?} (special: {}), obstacles: {:?}",
            self.round.coin.pos,
            self.round.coin.special,
            self.round.obstacles
        );
    }

    /// Radius of the ball right now
    pub fn ball_radius(&self) -> f32 {
        self.roster.current().radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transition_table() {
        use GamePhase::{GameOver, Menu, Play};
        assert_eq!(Menu.transition(Command::Confirm), Play);
        assert_eq!(Play.transition(Command::Pause), GamePhase::Pause);
        assert_eq!(Play.transition(Command::Cancel), Menu);
        assert_eq!(GamePhase::Pause.transition(Command::Pause), Play);
        assert_eq!(GamePhase::Pause.transition(Command::Cancel), Menu);
        assert_eq!(GameOver.transition(Command::Confirm), Play);
        assert_eq!(GameOver.transition(Command::Cancel), Menu);
    }

    #[test]
    fn test_irrelevant_commands_are_noops() {
        use GamePhase::{GameOver, Menu, Play};
        assert_eq!(Menu.transition(Command::Pause), Menu);
        assert_eq!(Menu.transition(Command::Cancel), Menu);
        assert_eq!(Play.transition(Command::Confirm), Play);
        assert_eq!(GamePhase::Pause.transition(Command::Confirm), GamePhase::Pause);
        assert_eq!(GameOver.transition(Command::Pause), GameOver);
    }

    #[test]
    fn test_starts_round() {
        assert!(GamePhase::starts_round(GamePhase::Menu, GamePhase::Play));
        assert!(GamePhase::starts_round(GamePhase::GameOver, GamePhase::Play));
        assert!(!GamePhase::starts_round(GamePhase::Pause, GamePhase::Play));
        assert!(!GamePhase::starts_round(GamePhase::Play, GamePhase::Pause));
    }

    #[test]
    fn test_character_enlarge_restore() {
        let c = CHARACTERS[0];
        let big = c.enlarged();
        assert_eq!(big.radius, BALL_RADIUS + POWERUP_RADIUS_BONUS);
        // Enlarging twice doesn't stack
        assert_eq!(big.enlarged().radius, BALL_RADIUS + POWERUP_RADIUS_BONUS);
        assert_eq!(big.restored().radius, BALL_RADIUS);
    }

    #[test]
    fn test_roster_cycles() {
        let mut roster = Roster::default();
        assert_eq!(roster.current().name, "Green");
        assert_eq!(roster.advance(false), 1);
        assert_eq!(roster.advance(false), 2);
        assert_eq!(roster.advance(false), 0);
        assert_eq!(roster.current().name, "Green");
    }

    #[test]
    fn test_power_bonus_follows_switch() {
        let mut roster = Roster::default();
        roster.set_powered(true);
        roster.advance(true);
        assert_eq!(roster.characters()[0].radius, BALL_RADIUS);
        assert_eq!(roster.current().radius, BALL_RADIUS + POWERUP_RADIUS_BONUS);
        roster.set_powered(false);
        assert!(roster.characters().iter().all(|c| c.radius == BALL_RADIUS));
    }

    #[test]
    fn test_round_layout() {
        let mut rng = Pcg32::seed_from_u64(42);
        let round = RoundState::new(&mut rng, 10.0);
        assert_eq!(round.score, 0);
        assert_eq!(round.obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(round.ball, Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0));
        assert!(!round.power.active);
        for o in &round.obstacles {
            assert!(o.pos.x >= 0.0 && o.pos.x + o.size.x <= ARENA_WIDTH);
            assert!(o.pos.y >= 0.0 && o.pos.y + o.size.y <= ARENA_HEIGHT);
            assert!(o.vel.x.abs() >= OBSTACLE_MIN_SPEED && o.vel.x.abs() <= OBSTACLE_MAX_SPEED);
            assert!(o.vel.y.abs() >= OBSTACLE_MIN_SPEED && o.vel.y.abs() <= OBSTACLE_MAX_SPEED);
        }
    }

    #[test]
    fn test_round_clock() {
        let mut rng = Pcg32::seed_from_u64(1);
        let round = RoundState::new(&mut rng, 100.0);
        assert_eq!(round.elapsed(130.0), 30.0);
        assert_eq!(round.time_left(130.0), 30.0);
        assert_eq!(round.time_left(500.0), 0.0);
    }

    #[test]
    fn test_power_remaining() {
        let power = PowerState {
            active: true,
            ends_at: 16.0,
        };
        assert_eq!(power.remaining(10.0), 6.0);
        assert_eq!(power.remaining(20.0), 0.0);
        assert_eq!(PowerState::default().remaining(0.0), 0.0);
    }

    #[test]
    fn test_special_coin_rate() {
        let mut rng = Pcg32::seed_from_u64(7);
        let specials = (0..10_000).filter(|_| Coin::spawn(&mut rng).special).count();
        // 18% give or take
        assert!((1500..2100).contains(&specials), "specials = {specials}");
    }

    proptest! {
        #[test]
        fn prop_coin_spawns_inside_arena(seed: u64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..20 {
                let coin = Coin::spawn(&mut rng);
                prop_assert!(coin.pos.x >= COIN_RADIUS && coin.pos.x <= ARENA_WIDTH - COIN_RADIUS);
                prop_assert!(coin.pos.y >= COIN_RADIUS && coin.pos.y <= ARENA_HEIGHT - COIN_RADIUS);
            }
        }
    }

    #[test]
    fn test_new_game_starts_in_menu() {
        let game = Game::new(5, 0.0);
        assert_eq!(game.phase, GamePhase::Menu);
        assert_eq!(game.ball_radius(), BALL_RADIUS);
        assert_eq!(game.round.obstacles.len(), OBSTACLE_COUNT);
    }
}

//! Gesture interpretation: tilt to movement, button or shake to character switch

use glam::Vec2;

use crate::consts::*;
use crate::telemetry::SensorSample;

/// What fired a character switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchTrigger {
    Button,
    Shake,
}

/// Arrow keys held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    /// Per-tick movement from the keyboard
    pub fn delta(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.left {
            d.x -= BALL_SPEED;
        }
        if self.right {
            d.x += BALL_SPEED;
        }
        if self.up {
            d.y -= BALL_SPEED;
        }
        if self.down {
            d.y += BALL_SPEED;
        }
        d
    }
}

/// Map a sample's tilt to a movement step. Thresholds are exclusive. Forward
/// tilt (positive ay) moves up the screen.
pub fn tilt_delta(sample: &SensorSample) -> Vec2 {
    let mut d = Vec2::ZERO;
    if sample.ax > AX_POS_THRESHOLD {
        d.x += BALL_SPEED;
    } else if sample.ax < AX_NEG_THRESHOLD {
        d.x -= BALL_SPEED;
    }
    if sample.ay > AY_POS_THRESHOLD {
        d.y -= BALL_SPEED;
    } else if sample.ay < AY_NEG_THRESHOLD {
        d.y += BALL_SPEED;
    }
    d
}

/// Tilt intent and switch debounce carried between ticks
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    /// Movement from the last valid sample
    tilt: Vec2,
    /// Time of the last accepted switch
    last_switch: Option<f64>,
}

impl Gesture {
    /// Take in a fresh sample. Returns the trigger if a character switch is accepted.
    pub fn apply(&mut self, sample: &SensorSample, now: f64) -> Option<SwitchTrigger> {
        self.tilt = tilt_delta(sample);

        let ready = self.last_switch.is_none_or(|t| now - t > SWITCH_DEBOUNCE);
        if !ready {
            return None;
        }
        let trigger = if sample.button == Some(BUTTON_PRESSED) {
            SwitchTrigger::Button
        } else if sample.az.unsigned_abs() > SHAKE_THRESHOLD.unsigned_abs() {
            SwitchTrigger::Shake
        } else {
            return None;
        };
        self.last_switch = Some(now);
        Some(trigger)
    }

    /// Movement for this tick: last tilt plus whatever keys are held
    pub fn movement(&self, keys: &KeyState) -> Vec2 {
        self.tilt + keys.delta()
    }

    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }
}

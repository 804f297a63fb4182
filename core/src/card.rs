use serde::{Deserialize, Serialize};

use crate::*;

/// Animation phase of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardPhase {
    FaceDown,
    Flipping,
    FaceUp,
    Reversing,
}

impl CardPhase {
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Flipping | Self::Reversing)
    }
}

impl Default for CardPhase {
    fn default() -> Self {
        Self::FaceDown
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    Forward,
    Reverse,
}

/// Rotation speed in degrees per second and the angle of a complete flip.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipTiming {
    pub rotation_speed: f32,
    pub max_angle: f32,
}

impl FlipTiming {
    pub const fn new_unchecked(rotation_speed: f32, max_angle: f32) -> Self {
        Self {
            rotation_speed,
            max_angle,
        }
    }

    pub fn new(rotation_speed: f32, max_angle: f32) -> Self {
        let rotation_speed = if rotation_speed.is_finite() {
            rotation_speed.max(0.0)
        } else {
            0.0
        };
        let max_angle = if max_angle.is_finite() && max_angle > 0.0 {
            max_angle
        } else {
            180.0
        };
        Self::new_unchecked(rotation_speed, max_angle)
    }

    /// Seconds needed for a complete flip, `None` when the card never moves.
    pub fn flip_duration(&self) -> Option<f32> {
        (self.rotation_speed > 0.0).then(|| self.max_angle / self.rotation_speed)
    }

    /// Progress covered during `delta_time` seconds.
    pub fn step(&self, delta_time: f32) -> f32 {
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring invalid tick delta: {}", delta_time);
            return 0.0;
        }
        if self.max_angle <= 0.0 {
            return 1.0;
        }
        let step = delta_time * self.rotation_speed / self.max_angle;
        if step.is_nan() { 0.0 } else { step }
    }
}

impl Default for FlipTiming {
    fn default() -> Self {
        Self::new_unchecked(180.0, 180.0)
    }
}

/// One board slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    kind: CardType,
    phase: CardPhase,
    progress: f32,
    locked: bool,
}

impl Card {
    pub const fn new(kind: CardType) -> Self {
        Self {
            kind,
            phase: CardPhase::FaceDown,
            progress: 0.0,
            locked: false,
        }
    }

    pub const fn kind(&self) -> CardType {
        self.kind
    }

    pub const fn phase(&self) -> CardPhase {
        self.phase
    }

    pub const fn progress(&self) -> f32 {
        self.progress
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn is_selectable(&self) -> bool {
        !self.locked && matches!(self.phase, CardPhase::FaceDown)
    }

    pub const fn matches(&self, other: &Card) -> bool {
        self.kind == other.kind
    }

    /// Whether the face (rather than the back) is showing, switching at the
    /// half-way point in both directions.
    pub fn shows_face(&self) -> bool {
        self.locked || self.progress >= 0.5
    }

    /// Moves `progress` towards 1 (forward) or 0 (reverse) and reports whether
    /// the end was reached. Never leaves `[0, 1]`.
    pub fn advance_flip(
        &mut self,
        direction: FlipDirection,
        delta_time: f32,
        timing: FlipTiming,
    ) -> bool {
        let step = timing.step(delta_time);
        match direction {
            FlipDirection::Forward => {
                self.progress = (self.progress + step).clamp(0.0, 1.0);
                self.progress >= 1.0
            }
            FlipDirection::Reverse => {
                self.progress = (self.progress - step).clamp(0.0, 1.0);
                self.progress <= 0.0
            }
        }
    }

    pub(crate) fn set_phase(&mut self, phase: CardPhase) {
        self.phase = phase;
    }

    pub(crate) fn lock(&mut self) {
        self.phase = CardPhase::FaceUp;
        self.progress = 1.0;
        self.locked = true;
    }

    pub(crate) fn redeal(&mut self, kind: CardType) {
        *self = Self::new(kind);
    }
}

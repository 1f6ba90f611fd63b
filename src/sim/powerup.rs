//! Power-up lifecycle
//!
//! Destroyed bricks roll for power-ups that fall toward the paddle. Catching
//! one switches its effect on; timed effects switch off again when the last
//! active power-up of that kind runs out.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::check_aabb;
use super::state::{Ball, EffectState, MovingBody, Paddle};
use crate::WHITE;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

/// Static properties of a power-up kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpStats {
    /// Spawns with probability `1 / chance` per destroyed brick
    pub chance: u32,
    /// Seconds the effect lasts; 0 for one-shot effects
    pub duration: f32,
    pub color: Vec3,
}

impl PowerUpKind {
    /// Spawn roll order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub fn stats(&self) -> PowerUpStats {
        let (chance, duration, color) = match self {
            PowerUpKind::Speed => (75, 0.0, Vec3::new(0.5, 0.5, 1.0)),
            PowerUpKind::Sticky => (75, 20.0, Vec3::new(1.0, 0.5, 1.0)),
            PowerUpKind::PassThrough => (75, 10.0, Vec3::new(0.5, 1.0, 0.5)),
            PowerUpKind::PadSizeIncrease => (75, 0.0, Vec3::new(1.0, 0.6, 0.4)),
            // Negative effects turn up far more often
            PowerUpKind::Confuse => (15, 15.0, Vec3::new(1.0, 0.3, 0.3)),
            PowerUpKind::Chaos => (15, 15.0, Vec3::new(0.9, 0.25, 0.25)),
        };
        PowerUpStats {
            chance,
            duration,
            color,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Sticky => "sticky",
            PowerUpKind::PassThrough => "pass-through",
            PowerUpKind::PadSizeIncrease => "pad-size-increase",
            PowerUpKind::Confuse => "confuse",
            PowerUpKind::Chaos => "chaos",
        }
    }

    /// Switch the effect on
    pub fn activate(&self, ball: &mut Ball, paddle: &mut Paddle, effects: &mut EffectState) {
        match self {
            PowerUpKind::Speed => ball.body.velocity *= SPEED_BOOST,
            PowerUpKind::Sticky => {
                ball.sticky = true;
                paddle.body.color = Vec3::new(1.0, 0.5, 1.0);
            }
            PowerUpKind::PassThrough => {
                ball.pass_through = true;
                ball.body.color = Vec3::new(1.0, 0.5, 0.5);
            }
            // Permanent until the player is reset
            PowerUpKind::PadSizeIncrease => paddle.body.size.x += PAD_SIZE_INCREASE,
            PowerUpKind::Confuse => {
                if !effects.chaos {
                    effects.confuse = true;
                }
            }
            PowerUpKind::Chaos => {
                if !effects.confuse {
                    effects.chaos = true;
                }
            }
        }
    }

    /// Switch the effect off
    pub fn deactivate(&self, ball: &mut Ball, paddle: &mut Paddle, effects: &mut EffectState) {
        match self {
            PowerUpKind::Sticky => {
                ball.sticky = false;
                paddle.body.color = WHITE;
            }
            PowerUpKind::PassThrough => {
                ball.pass_through = false;
                ball.body.color = WHITE;
            }
            PowerUpKind::Confuse => effects.confuse = false,
            PowerUpKind::Chaos => effects.chaos = false,
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
        }
    }
}

/// A falling or active power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// `destroyed` means no longer on the field: caught, or fell off screen
    pub body: MovingBody,
    pub kind: PowerUpKind,
    /// Seconds of effect left
    pub duration: f32,
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            body: MovingBody::new(position, POWERUP_SIZE)
                .with_velocity(POWERUP_VELOCITY)
                .with_color(stats.color),
            kind,
            duration: stats.duration,
            activated: false,
        }
    }
}

/// One `1 in chance` trial
pub fn should_spawn<R: Rng>(rng: &mut R, chance: u32) -> bool {
    rng.random_range(0..chance) == 0
}

/// Roll every kind independently for a brick destroyed at `position`
pub fn spawn_power_ups<R: Rng>(rng: &mut R, position: Vec2, power_ups: &mut Vec<PowerUp>) {
    for kind in PowerUpKind::ALL {
        if should_spawn(rng, kind.stats().chance) {
            log::debug!("Spawned {} power-up at {}", kind.as_str(), position);
            power_ups.push(PowerUp::new(kind, position));
        }
    }
}

/// Mark power-ups that left the screen and activate the ones the paddle caught
pub fn collect_power_ups(
    power_ups: &mut [PowerUp],
    ball: &mut Ball,
    paddle: &mut Paddle,
    effects: &mut EffectState,
    height: f32,
) {
    for power_up in power_ups.iter_mut().filter(|p| !p.body.destroyed) {
        if power_up.body.position.y >= height {
            power_up.body.destroyed = true;
        }
        if check_aabb(&paddle.body, &power_up.body) {
            log::debug!("Activated {} power-up", power_up.kind.as_str());
            power_up.kind.activate(ball, paddle, effects);
            power_up.body.destroyed = true;
            power_up.activated = true;
        }
    }
}

/// True if any power-up of `kind` is still running
pub fn is_other_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Move power-ups, run down active timers and drop the finished ones
///
/// An expiring effect is only switched off when no other power-up of the same
/// kind is still active, so the last one to expire wins.
pub fn update_power_ups(
    power_ups: &mut Vec<PowerUp>,
    dt: f32,
    ball: &mut Ball,
    paddle: &mut Paddle,
    effects: &mut EffectState,
) {
    for i in 0..power_ups.len() {
        let power_up = &mut power_ups[i];
        power_up.body.position += power_up.body.velocity * dt;

        if !power_up.activated {
            continue;
        }
        power_up.duration -= dt;
        if power_up.duration <= 0.0 {
            power_up.activated = false;
            let kind = power_up.kind;
            if !is_other_active(power_ups, kind) {
                log::debug!("{} power-up expired", kind.as_str());
                kind.deactivate(ball, paddle, effects);
            }
        }
    }

    power_ups.retain(|p| !(p.body.destroyed && !p.activated));
}

//! Game state and core simulation types
//!
//! Moving bodies (ball, paddle), the effect flags handed to the renderer, and
//! the complete session state the game loop mutates each tick.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::LevelBoard;
use super::powerup::PowerUp;
use crate::WHITE;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level selection, waiting for confirm
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for confirm
    Win,
}

/// Kinematic state shared by every entity on the board
///
/// `position` is the top-left corner; `position` and `size` together form
/// the axis-aligned box used by every collision test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBody {
    pub position: Vec2,
    pub size: Vec2,
    /// Units per second
    pub velocity: Vec2,
    pub color: Vec3,
    /// Degrees
    pub rotation: f32,
    pub is_solid: bool,
    pub destroyed: bool,
}

impl MovingBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            color: WHITE,
            rotation: 0.0,
            is_solid: false,
            destroyed: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::box_center(self.position, self.size)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: MovingBody,
    pub radius: f32,
    /// Resting on the paddle; ignores integration and follows the paddle
    pub stuck: bool,
    /// Re-attaches to the paddle after every paddle hit
    pub sticky: bool,
    /// Non-solid bricks survive contact
    pub pass_through: bool,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Self {
            body: MovingBody::new(position, Vec2::splat(radius * 2.0)).with_velocity(velocity),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Circle center. The sprite is a `2r x 2r` square, so adding the radius
    /// to both components of the top-left corner lands on the center.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.position + self.radius
    }

    pub fn speed(&self) -> f32 {
        self.body.velocity.length()
    }

    /// Integrate position and bounce off the left, right and top walls.
    ///
    /// The bottom edge is open; falling through it is the loss condition.
    pub fn advance(&mut self, dt: f32, window_width: f32) -> Vec2 {
        if self.stuck {
            return self.body.position;
        }

        let body = &mut self.body;
        body.position += body.velocity * dt;

        if body.position.x <= 0.0 {
            body.velocity.x = -body.velocity.x;
            body.position.x = 0.0;
        } else if body.position.x + body.size.x >= window_width {
            body.velocity.x = -body.velocity.x;
            body.position.x = window_width - body.size.x;
        }

        if body.position.y <= 0.0 {
            body.velocity.y = -body.velocity.y;
            body.position.y = 0.0;
        }

        body.position
    }

    /// Put the ball back on the paddle with all power-up flags cleared
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.body.position = position;
        self.body.velocity = velocity;
        self.body.color = WHITE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub body: MovingBody,
}

impl Paddle {
    /// Default-sized paddle centered on the bottom edge of the play area
    pub fn spawn(width: f32, height: f32) -> Self {
        let position = Vec2::new(width / 2.0 - PLAYER_SIZE.x / 2.0, height - PLAYER_SIZE.y);
        Self {
            body: MovingBody::new(position, PLAYER_SIZE),
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.body.position.x + self.body.size.x / 2.0
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.body.size.x / 2.0
    }

    /// Where a freshly reset ball rests: centered, sitting on the top edge
    pub fn ball_rest_position(&self, radius: f32) -> Vec2 {
        self.body.position + Vec2::new(PLAYER_SIZE.x / 2.0 - radius, -radius * 2.0)
    }
}

/// Screen-space effect flags toggled by the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
    /// Seconds of shake left
    pub shake_time: f32,
}

impl EffectState {
    pub fn arm_shake(&mut self) {
        self.shake_time = SHAKE_DURATION;
        self.shake = true;
    }

    /// Count the shake timer down, clearing the flag once it runs out
    pub fn tick_shake(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake = false;
            }
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u8,
    /// Index into `levels`
    pub level: usize,
    pub levels: Vec<LevelBoard>,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Falling and active power-ups
    pub power_ups: Vec<PowerUp>,
    pub effects: EffectState,
    /// Play area
    pub width: f32,
    pub height: f32,
    /// Seconds simulated, drives effect animation
    pub elapsed: f32,
    /// Skip collision response for pass-through hits on breakable bricks
    pub pass_through_skips_resolution: bool,
}

impl GameState {
    /// Create a new session in the menu with the given levels
    pub fn new(seed: u64, width: f32, height: f32, levels: Vec<LevelBoard>) -> Self {
        let paddle = Paddle::spawn(width, height);
        let ball = Ball::new(
            paddle.ball_rest_position(BALL_RADIUS),
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            lives: STARTING_LIVES,
            level: 0,
            levels,
            paddle,
            ball,
            power_ups: Vec::new(),
            effects: EffectState::default(),
            width,
            height,
            elapsed: 0.0,
            pass_through_skips_resolution: false,
        }
    }

    /// The board currently being played, if any levels are loaded
    pub fn board(&self) -> Option<&LevelBoard> {
        self.levels.get(self.level)
    }

    /// Rebuild the current board's bricks and restore lives
    pub fn reset_level(&mut self) {
        if let Some(board) = self.levels.get_mut(self.level) {
            board.reset();
            log::info!("Level {} ({}) reset", self.level + 1, board.name());
        }
        self.lives = STARTING_LIVES;
    }

    /// Return paddle and ball to their starting spots and drop every
    /// power-up effect
    pub fn reset_player(&mut self) {
        self.paddle = Paddle::spawn(self.width, self.height);
        self.ball.reset(
            self.paddle.ball_rest_position(self.ball.radius),
            INITIAL_BALL_VELOCITY,
        );
        self.effects.chaos = false;
        self.effects.confuse = false;
        self.power_ups.clear();
    }

    /// Cycle the selected level forward, wrapping
    pub fn next_level(&mut self) {
        let count = self.levels.len().max(1);
        self.level = (self.level + 1) % count;
    }

    /// Cycle the selected level backward, wrapping
    pub fn previous_level(&mut self) {
        let count = self.levels.len().max(1);
        self.level = if self.level > 0 { self.level - 1 } else { count - 1 };
    }

    /// True when every breakable brick on the current board is gone
    pub fn level_completed(&self) -> bool {
        self.board().is_none_or(LevelBoard::is_completed)
    }
}

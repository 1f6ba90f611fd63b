//! Breakout - A 2D brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Simulation (level boards, collisions, power-ups, game loop)
//! - `game`: Host facade with the init/input/update/render contract
//! - `input`: Key state with per-press de-duplication
//! - `render`: Sprite list and effect flags handed to a renderer
//! - `settings`: JSON configuration

pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default play area
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (units/second)
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Horizontal deflection strength of a paddle bounce
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Starting lives (also restored on level reset)
    pub const STARTING_LIVES: u8 = 3;
    /// Screen shake after hitting a brick that survives (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Power-up sprite size and fall velocity
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Ball velocity multiplier for the speed power-up
    pub const SPEED_BOOST: f32 = 1.2;
    /// Paddle width gained per pad-size power-up
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Number of levels in the built-in set
    pub const LEVEL_COUNT: usize = 4;
}

/// Untinted sprite colour
pub const WHITE: Vec3 = Vec3::ONE;

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(position: Vec2, size: Vec2) -> Vec2 {
    position + size / 2.0
}

//! Per-frame simulation step
//!
//! Input handling for each phase, then ball movement, collision resolution,
//! power-up aging and the win/loss checks. `dt` is the raw frame delta.

use super::collision::{bounce_off_paddle, check_circle_aabb, resolve_ball};
use super::powerup::{collect_power_ups, spawn_power_ups, update_power_ups};
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::input::{Key, Keys};

/// Input commands for a single frame
///
/// Discrete actions fire once per key press; movement keys are held.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a game (menu) or leave the win screen
    pub confirm: bool,
    /// Select the next level (menu)
    pub level_up: bool,
    /// Select the previous level (menu)
    pub level_down: bool,
    /// Paddle movement
    pub left: bool,
    pub right: bool,
    /// Launch a stuck ball
    pub release: bool,
}

impl TickInput {
    /// Sample the keys the current phase listens to, consuming discrete
    /// presses so a held key only triggers once
    pub fn capture(keys: &mut Keys, phase: GamePhase) -> Self {
        match phase {
            GamePhase::Menu => Self {
                confirm: keys.take_press(Key::Confirm),
                level_up: keys.take_press(Key::LevelUp),
                level_down: keys.take_press(Key::LevelDown),
                ..Default::default()
            },
            GamePhase::Win => Self {
                confirm: keys.take_press(Key::Confirm),
                ..Default::default()
            },
            GamePhase::Active => Self {
                left: keys.is_held(Key::Left),
                right: keys.is_held(Key::Right),
                release: keys.is_held(Key::Release),
                ..Default::default()
            },
        }
    }
}

/// Apply one frame of input
pub fn process_input(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.phase = GamePhase::Active;
                log::info!("Starting level {}", state.level + 1);
            }
            if input.level_up {
                state.next_level();
                log::debug!("Selected level {}", state.level + 1);
            }
            if input.level_down {
                state.previous_level();
                log::debug!("Selected level {}", state.level + 1);
            }
        }

        GamePhase::Win => {
            if input.confirm {
                state.effects.chaos = false;
                state.phase = GamePhase::Menu;
                log::info!("Back to menu");
            }
        }

        GamePhase::Active => {
            let velocity = PLAYER_VELOCITY * dt;
            let paddle = &mut state.paddle.body;
            let ball = &mut state.ball;

            if input.left && paddle.position.x >= 0.0 {
                paddle.position.x -= velocity;
                if ball.stuck {
                    ball.body.position.x -= velocity;
                }
            }
            if input.right && paddle.position.x <= state.width - paddle.size.x {
                paddle.position.x += velocity;
                if ball.stuck {
                    ball.body.position.x += velocity;
                }
            }
            if input.release {
                ball.stuck = false;
            }
        }
    }
}

/// Advance the simulation by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    state.elapsed += dt;

    state.ball.advance(dt, state.width);
    do_collisions(state);
    update_power_ups(
        &mut state.power_ups,
        dt,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
    );
    state.effects.tick_shake(dt);

    // Ball fell through the bottom edge
    if state.ball.body.position.y >= state.height {
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Ball lost, {} lives left", state.lives);
        if state.lives == 0 {
            state.reset_level();
            state.phase = GamePhase::Menu;
            log::info!("Game over");
        }
        state.reset_player();
    }

    if state.phase == GamePhase::Active && state.level_completed() {
        state.reset_level();
        state.reset_player();
        state.effects.chaos = true;
        state.phase = GamePhase::Win;
        log::info!("Level {} cleared", state.level + 1);
    }
}

/// Resolve ball/brick, ball/paddle and power-up/paddle contacts
pub fn do_collisions(state: &mut GameState) {
    sweep_bricks(state);

    if !state.ball.stuck && check_circle_aabb(&state.ball, &state.paddle.body).is_some() {
        bounce_off_paddle(&mut state.ball, &state.paddle);
    }

    collect_power_ups(
        &mut state.power_ups,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
        state.height,
    );
}

/// Test the ball against every standing brick in row-major order
///
/// Corrections accumulate: a later brick sees the ball as already pushed out
/// of earlier ones.
fn sweep_bricks(state: &mut GameState) {
    let Some(board) = state.levels.get_mut(state.level) else {
        return;
    };

    for brick in board.bricks_mut().iter_mut().filter(|b| !b.is_destroyed()) {
        let Some(hit) = check_circle_aabb(&state.ball, &brick.body) else {
            continue;
        };

        let breaks = !brick.is_solid() && !state.ball.pass_through;
        if breaks {
            brick.body.destroyed = true;
            spawn_power_ups(&mut state.rng, brick.body.position, &mut state.power_ups);
        } else {
            state.effects.arm_shake();
        }

        let passes = state.ball.pass_through && !brick.is_solid();
        if passes && state.pass_through_skips_resolution {
            continue;
        }
        resolve_ball(&mut state.ball, &hit);
    }
}

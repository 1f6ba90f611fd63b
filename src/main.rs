//! Breakout entry point
//!
//! Runs the game headless with an autopilot at the controls: it starts the
//! level, launches the ball, tracks it with the paddle and grabs power-ups
//! when the ball is safely on its way up. Progress goes to the log
//! (`RUST_LOG=info` or `debug`).
//!
//! Usage: `breakout [settings.json]`

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use breakout::input::Key;
use breakout::render::FrameRecorder;
use breakout::sim::GamePhase;
use breakout::{Game, Settings};

/// Longest frame handed to the simulation
const MAX_FRAME_DT: f32 = 0.1;
/// Paddle stops chasing within this many units of its target
const TRACK_DEADZONE: f32 = 8.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::try_load(&path).with_context(|| format!("loading {path}"))?,
        None => Settings::default(),
    };

    let mut game = Game::new(settings);
    game.init();
    run(&mut game);
    Ok(())
}

fn run(game: &mut Game) {
    let frames = game.settings().frames;
    let frame_time = frame_time(game.settings());
    let mut frame = FrameRecorder::default();
    let mut wins = 0u32;
    let mut games_over = 0u32;

    let mut last = Instant::now();
    for n in 0..frames {
        thread::sleep(frame_time);
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(MAX_FRAME_DT);
        last = now;

        let phase = game.phase();

        autopilot(game, n);
        game.process_input(dt);
        game.update(dt);

        frame.clear();
        game.render(&mut frame);
        log::trace!("Frame {}: {} sprites", n, frame.sprites.len());

        match (phase, game.phase()) {
            (GamePhase::Active, GamePhase::Win) => wins += 1,
            (GamePhase::Active, GamePhase::Menu) => games_over += 1,
            _ => {}
        }
    }

    let remaining = game.state.board().map_or(0, |b| b.remaining());
    log::info!(
        "Finished {} frames: {} wins, {} games over; level {} in {:?} with {} lives, {} bricks left",
        frames,
        wins,
        games_over,
        game.state.level + 1,
        game.phase(),
        game.state.lives,
        remaining
    );
}

/// Sleep between frames, capped like the simulated delta
fn frame_time(settings: &Settings) -> Duration {
    Duration::try_from_secs_f32(settings.frame_dt.clamp(0.0, MAX_FRAME_DT)).unwrap_or_default()
}

/// Drive the keys like a player would
fn autopilot(game: &mut Game, frame: u32) {
    match game.phase() {
        GamePhase::Menu | GamePhase::Win => {
            // Tap confirm: press on one frame, release on the next
            let keys = game.keys_mut();
            if keys.is_held(Key::Confirm) {
                keys.release(Key::Confirm);
            } else {
                keys.press(Key::Confirm);
            }
        }
        GamePhase::Active => {
            let state = &game.state;
            let ball = &state.ball;
            let paddle_x = state.paddle.center_x();

            // Ball heading up and far away: go for the nearest falling power-up
            let ball_safe = ball.body.velocity.y < 0.0 && ball.center().y < state.height / 2.0;
            let pickup = state
                .power_ups
                .iter()
                .filter(|p| !p.body.destroyed)
                .max_by(|a, b| a.body.position.y.total_cmp(&b.body.position.y));

            let target = match pickup {
                Some(p) if ball_safe => p.body.center().x,
                _ => {
                    // Wander a little so the ball doesn't settle into a loop
                    let t = frame as f32 * 0.02;
                    ball.center().x + t.sin() * state.paddle.half_width() * 0.5
                }
            };

            let stuck = ball.stuck;
            let keys = game.keys_mut();
            keys.release_all();
            if stuck {
                keys.press(Key::Release);
            }
            if target < paddle_x - TRACK_DEADZONE {
                keys.press(Key::Left);
            } else if target > paddle_x + TRACK_DEADZONE {
                keys.press(Key::Right);
            }
        }
    }
}

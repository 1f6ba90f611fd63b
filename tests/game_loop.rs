//! Whole-loop checks through the public API

use breakout::input::Key;
use breakout::render::FrameRecorder;
use breakout::sim::{GamePhase, PowerUpKind};
use breakout::{Game, Settings};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn started_game(seed: u64) -> Game {
    let mut game = Game::new(Settings {
        seed,
        ..Default::default()
    });
    game.init();
    game.keys_mut().press(Key::Confirm);
    game.process_input(DT);
    game.keys_mut().release(Key::Confirm);
    assert_eq!(game.phase(), GamePhase::Active);
    game
}

#[test]
fn ball_stays_inside_side_and_top_walls() {
    let mut game = started_game(5);
    game.keys_mut().press(Key::Release);

    for _ in 0..2000 {
        game.process_input(DT);
        game.update(DT);

        let ball = &game.state.ball;
        assert!(ball.body.position.x >= 0.0);
        assert!(ball.body.position.x + ball.body.size.x <= game.state.width + 1e-3);
        assert!(game.state.lives <= 3);
        // Finished power-ups are swept every frame
        assert!(
            game.state
                .power_ups
                .iter()
                .all(|p| !(p.body.destroyed && !p.activated))
        );
    }
}

#[test]
fn same_seed_same_game() {
    let mut a = started_game(99);
    let mut b = started_game(99);
    a.keys_mut().press(Key::Release);
    b.keys_mut().press(Key::Release);

    for _ in 0..600 {
        for game in [&mut a, &mut b] {
            game.process_input(DT);
            game.update(DT);
        }
    }

    assert_eq!(a.state.ball, b.state.ball);
    assert_eq!(a.state.power_ups, b.state.power_ups);
    assert_eq!(a.state.lives, b.state.lives);
}

#[test]
fn lost_last_ball_returns_to_menu_with_full_board() {
    let mut game = started_game(1);
    game.state.lives = 1;
    let full = game.state.board().map(|b| b.remaining()).unwrap_or(0);
    game.state.levels[0].bricks_mut()[0].body.destroyed = true;

    game.state.ball.stuck = false;
    game.state.ball.body.position = Vec2::new(400.0, 599.0);
    game.state.ball.body.velocity = Vec2::new(0.0, 350.0);
    game.update(DT);

    assert_eq!(game.phase(), GamePhase::Menu);
    assert_eq!(game.state.lives, 3);
    assert_eq!(game.state.board().map(|b| b.remaining()), Some(full));

    let mut frame = FrameRecorder::default();
    game.render(&mut frame);
    assert!(frame.texts.iter().any(|t| t.contains("ENTER to start")));
}

#[test]
fn caught_chaos_shows_up_in_render_effects() {
    let mut game = started_game(2);
    let paddle = game.state.paddle.body.position;
    game.state
        .power_ups
        .push(breakout::sim::PowerUp::new(PowerUpKind::Chaos, paddle - Vec2::new(0.0, 5.0)));
    game.update(DT);

    let mut frame = FrameRecorder::default();
    game.render(&mut frame);
    assert!(frame.effects.chaos);
    assert!(!frame.effects.confuse);
}

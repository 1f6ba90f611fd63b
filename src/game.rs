//! Host-facing game object
//!
//! Wraps the simulation in the per-frame contract a window loop drives:
//! `process_input`, `update`, `render`.

use crate::input::Keys;
use crate::render::{RenderSink, render_scene};
use crate::settings::Settings;
use crate::sim::level::load_levels;
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{self, TickInput};

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    keys: Keys,
    settings: Settings,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let width = settings.screen_width as f32;
        let height = settings.screen_height as f32;
        let levels = load_levels(settings.level_dir.as_deref(), width, settings.level_height());

        let mut state = GameState::new(settings.seed, width, height, levels);
        state.pass_through_skips_resolution = settings.pass_through_skips_resolution;

        Self {
            state,
            keys: Keys::default(),
            settings,
        }
    }

    /// Put everything back to the start: first level, full lives, menu
    pub fn init(&mut self) {
        self.state.level = 0;
        self.state.phase = GamePhase::Menu;
        self.state.effects = Default::default();
        self.reset_level();
        self.reset_player();
        log::info!(
            "Game initialized: {}x{}, {} levels, seed {}",
            self.settings.screen_width,
            self.settings.screen_height,
            self.state.levels.len(),
            self.settings.seed
        );
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Window layer writes key events here
    pub fn keys_mut(&mut self) -> &mut Keys {
        &mut self.keys
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn process_input(&mut self, dt: f32) {
        let input = TickInput::capture(&mut self.keys, self.state.phase);
        tick::process_input(&mut self.state, &input, dt);
    }

    pub fn update(&mut self, dt: f32) {
        let phase = self.state.phase;
        tick::update(&mut self.state, dt);
        if self.state.phase != phase {
            log::info!("Phase {:?} -> {:?}", phase, self.state.phase);
        }
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        render_scene(&self.state, sink);
    }

    pub fn reset_level(&mut self) {
        self.state.reset_level();
    }

    pub fn reset_player(&mut self) {
        self.state.reset_player();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::FrameRecorder;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_held_confirm_only_starts_once() {
        let mut game = Game::new(Settings::default());
        game.init();

        game.keys_mut().press(Key::Confirm);
        game.process_input(DT);
        assert_eq!(game.phase(), GamePhase::Active);

        // Still held through a win: the win screen waits for a fresh press
        game.state.phase = GamePhase::Win;
        game.process_input(DT);
        assert_eq!(game.phase(), GamePhase::Win);

        game.keys_mut().release(Key::Confirm);
        game.keys_mut().press(Key::Confirm);
        game.process_input(DT);
        assert_eq!(game.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_released_ball_leaves_paddle() {
        let mut game = Game::new(Settings::default());
        game.init();
        game.keys_mut().press(Key::Confirm);
        game.process_input(DT);

        let start_y = game.state.ball.body.position.y;
        game.keys_mut().press(Key::Release);
        for _ in 0..10 {
            game.process_input(DT);
            game.update(DT);
        }
        assert!(!game.state.ball.stuck);
        assert!(game.state.ball.body.position.y < start_y);
    }

    #[test]
    fn test_render_reaches_sink() {
        let mut game = Game::new(Settings::default());
        game.init();
        let mut frame = FrameRecorder::default();
        game.render(&mut frame);
        assert!(!frame.sprites.is_empty());
        assert_eq!(frame.texts[0], "Lives:3");
    }

    #[test]
    fn test_settings_flow_into_state() {
        let settings = Settings {
            screen_width: 1024,
            screen_height: 768,
            pass_through_skips_resolution: true,
            ..Default::default()
        };
        let game = Game::new(settings);
        assert_eq!(game.state.width, 1024.0);
        assert!(game.state.pass_through_skips_resolution);
        let board = game.state.board().expect("levels loaded");
        let right_edge = board
            .bricks()
            .iter()
            .map(|b| b.body.position.x + b.body.size.x)
            .fold(0.0, f32::max);
        assert!((right_edge - 1024.0).abs() < 1e-3);
    }
}

//! Render hand-off
//!
//! The simulation never touches the GPU. Each frame it walks the scene and
//! feeds sprites, HUD text and the effect flags to a [`RenderSink`]; a sprite
//! batcher, post-processor and text renderer sit behind that trait.

use glam::{Vec2, Vec3};

use crate::WHITE;
use crate::sim::level::Brick;
use crate::sim::powerup::{PowerUp, PowerUpKind};
use crate::sim::state::{Ball, EffectState, GamePhase, GameState, MovingBody, Paddle};

/// Texture handles the renderer resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Block,
    BlockSolid,
    Paddle,
    Ball,
    PowerUp(PowerUpKind),
}

impl TextureId {
    /// Resource name the texture is registered under
    pub fn name(&self) -> &'static str {
        match self {
            TextureId::Background => "background",
            TextureId::Block => "block",
            TextureId::BlockSolid => "block_solid",
            TextureId::Paddle => "paddle",
            TextureId::Ball => "face",
            TextureId::PowerUp(kind) => match kind {
                PowerUpKind::Speed => "powerup_speed",
                PowerUpKind::Sticky => "powerup_sticky",
                PowerUpKind::PassThrough => "powerup_passthrough",
                PowerUpKind::PadSizeIncrease => "powerup_increase",
                PowerUpKind::Confuse => "powerup_confuse",
                PowerUpKind::Chaos => "powerup_chaos",
            },
        }
    }
}

/// One textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub position: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub color: Vec3,
}

impl Sprite {
    fn from_body(texture: TextureId, body: &MovingBody) -> Self {
        Self {
            texture,
            position: body.position,
            size: body.size,
            rotation: body.rotation,
            color: body.color,
        }
    }
}

/// Anything that can appear on screen
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Brick(&'a Brick),
    Paddle(&'a Paddle),
    Ball(&'a Ball),
    PowerUp(&'a PowerUp),
}

impl Drawable<'_> {
    /// Sprite for this entity, or `None` if it is off the field
    pub fn sprite(&self) -> Option<Sprite> {
        match self {
            Drawable::Brick(brick) => {
                if brick.is_destroyed() {
                    return None;
                }
                let texture = if brick.is_solid() {
                    TextureId::BlockSolid
                } else {
                    TextureId::Block
                };
                Some(Sprite::from_body(texture, &brick.body))
            }
            Drawable::Paddle(paddle) => Some(Sprite::from_body(TextureId::Paddle, &paddle.body)),
            Drawable::Ball(ball) => Some(Sprite::from_body(TextureId::Ball, &ball.body)),
            Drawable::PowerUp(power_up) => {
                if power_up.body.destroyed {
                    return None;
                }
                Some(Sprite::from_body(TextureId::PowerUp(power_up.kind), &power_up.body))
            }
        }
    }
}

/// Receiver for a rendered frame
pub trait RenderSink {
    fn draw_sprite(&mut self, sprite: &Sprite);
    fn draw_text(&mut self, text: &str, position: Vec2, scale: f32);
    /// Called once per frame after the scene, with seconds of game time
    fn apply_effects(&mut self, effects: &EffectState, time: f32);
}

/// Walk the scene back to front
pub fn render_scene(state: &GameState, sink: &mut impl RenderSink) {
    sink.draw_sprite(&Sprite {
        texture: TextureId::Background,
        position: Vec2::ZERO,
        size: Vec2::new(state.width, state.height),
        rotation: 0.0,
        color: WHITE,
    });

    let bricks = state.board().map(|b| b.bricks()).unwrap_or_default();
    let drawables = bricks
        .iter()
        .map(Drawable::Brick)
        .chain(std::iter::once(Drawable::Paddle(&state.paddle)))
        .chain(state.power_ups.iter().map(Drawable::PowerUp))
        .chain(std::iter::once(Drawable::Ball(&state.ball)));
    for sprite in drawables.filter_map(|d| d.sprite()) {
        sink.draw_sprite(&sprite);
    }

    sink.apply_effects(&state.effects, state.elapsed);

    sink.draw_text(&format!("Lives:{}", state.lives), Vec2::new(5.0, 5.0), 1.0);
    let mid = state.height / 2.0;
    match state.phase {
        GamePhase::Menu => {
            sink.draw_text("Press ENTER to start", Vec2::new(250.0, mid), 1.0);
            sink.draw_text("Press W or S to select level", Vec2::new(245.0, mid + 20.0), 0.75);
        }
        GamePhase::Win => {
            sink.draw_text("You WON!!!", Vec2::new(320.0, mid - 20.0), 1.0);
            sink.draw_text("Press ENTER to retry", Vec2::new(250.0, mid), 1.0);
        }
        GamePhase::Active => {}
    }
}

/// Sink that keeps the last frame in memory
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    pub sprites: Vec<Sprite>,
    pub texts: Vec<String>,
    pub effects: EffectState,
    pub time: f32,
}

impl FrameRecorder {
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.texts.clear();
    }

    pub fn count(&self, texture: TextureId) -> usize {
        self.sprites.iter().filter(|s| s.texture == texture).count()
    }
}

impl RenderSink for FrameRecorder {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.sprites.push(sprite.clone());
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, _scale: f32) {
        self.texts.push(text.to_string());
    }

    fn apply_effects(&mut self, effects: &EffectState, time: f32) {
        self.effects = *effects;
        self.time = time;
    }
}

//! Simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded, driven by the host's frame delta
//! - Seeded RNG only
//! - Row-major brick order for collision sweeps
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{CircleHit, Direction, check_aabb, check_circle_aabb, vector_direction};
pub use level::{Brick, LevelBoard, LevelGrid, TileType};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Ball, EffectState, GamePhase, GameState, MovingBody, Paddle};
pub use tick::{TickInput, do_collisions, process_input, update};

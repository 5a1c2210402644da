//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Variable frame step, physics scaled by a clamped dt
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod event;
pub mod lifecycle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{ObstacleSweep, has_cleared, hits_obstacle, touches_ground, touches_pickup};
pub use entity::{Collidable, Rect, Scrolling, Updatable};
pub use event::{DeathCause, GameEvent};
pub use lifecycle::{begin_dying, finish_game_over};
pub use spawner::Spawner;
pub use state::{
    Avatar, AvatarPose, Backdrop, GamePhase, GameState, Ground, Obstacle, Pickup, PickupOrigin,
    Scores, Viewport,
};
pub use tick::{FrameTime, TickInput, tick};

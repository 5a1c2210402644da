//! Rendering module
//!
//! Converts game state into a scene snapshot and GPU-ready sprite instances.
//! Actual drawing happens in the host page.

pub mod scene;
pub mod vertex;

pub use scene::{DebugOverlay, DrawContext, Drawable, Hud, Scene, SceneItem, build_scene};
pub use vertex::{SpriteInstance, SpriteKind, instance_bytes};

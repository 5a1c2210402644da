//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing and loop cancellation
//! - Record storage (JSON file natively, LocalStorage on web)
//! - Browser bindings (wasm32 only)

pub mod storage;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use time::{FrameHandle, LoopDriver};

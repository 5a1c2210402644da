//! Flippy Bird - a side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (avatar physics, spawning, collisions, death sequence)
//! - `renderer`: Pure state -> scene snapshot conversion
//! - `platform`: Frame clock, storage backends, browser bindings
//! - `persistence`: All-time record store contract
//! - `settings`: Difficulty presets and player preferences

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Command, Game};
pub use highscores::{RecordOutcome, Records};
pub use settings::{Difficulty, Preferences, SimSettings};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Length of one nominal 60 Hz frame in milliseconds (dt == 1.0)
    pub const NOMINAL_FRAME_MS: f32 = 16.67;
    /// Largest frame delta fed to physics (tab suspend / frame drop guard)
    pub const MAX_FRAME_DELTA_MS: f32 = 32.0;

    /// Playfield defaults
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Avatar defaults
    pub const AVATAR_SIZE: f32 = 70.0;
    /// Velocity set by an impulse (negative = upward)
    pub const FLAP_VELOCITY: f32 = -6.0;
    /// Upward kick applied when the death sequence begins
    pub const DEATH_BOUNCE_VELOCITY: f32 = -3.0;
    /// Flight tilt per unit of vertical velocity (radians)
    pub const TILT_PER_VELOCITY: f32 = 0.04;
    /// Flight tilt limit (30 degrees)
    pub const MAX_FLIGHT_TILT: f32 = PI / 6.0;
    /// Tumble rate while dying (radians per nominal frame)
    pub const DEATH_SPIN_RATE: f32 = 0.15;
    /// Tumble limit (180 degrees)
    pub const MAX_DEATH_SPIN: f32 = PI;
    /// Pose switches to ascending below this velocity
    pub const ASCEND_POSE_VELOCITY: f32 = -2.0;
    /// Pose switches back to idle above this velocity
    pub const IDLE_POSE_VELOCITY: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Smallest top/bottom column height when picking a gap position
    pub const MIN_OBSTACLE_HEIGHT: f32 = 50.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 18.0;
    pub const SKY_PICKUP_RADIUS: f32 = 15.0;
    /// Score weight of one pickup relative to one cleared obstacle
    pub const PICKUP_VALUE: u64 = 10;
    /// Cosmetic spin per nominal frame (radians)
    pub const PICKUP_SPIN_RATE: f32 = 0.05;
    /// Embedded pickup vertical jitter as a fraction of the gap
    pub const PICKUP_GAP_JITTER: f32 = 0.25;
    /// Free-floating pickup cadence (raw milliseconds)
    pub const SKY_PICKUP_INTERVAL_MS: f32 = 5000.0;
    /// Sky pickups are not spawned while this many pickups are live
    pub const MAX_LIVE_PICKUPS: usize = 10;
    pub const SKY_PICKUP_MIN_Y: f32 = 50.0;
    /// Sky pickups stay this far above the ground line
    pub const SKY_PICKUP_GROUND_CLEARANCE: f32 = 100.0;

    /// Backdrop and ground scroll at obstacle speed divided by this
    pub const PARALLAX_DIVISOR: f32 = 3.0;

    /// Real time the avatar must rest on the ground before game over
    pub const GAME_OVER_DELAY_MS: f32 = 800.0;
    /// Slack used when deciding the dying avatar has settled on the ground.
    /// Distinct from the exact ground-line contact test on purpose.
    pub const GROUND_SETTLE_TOLERANCE: f32 = 1.0;
}

//! Demo-mode controller
//!
//! Holds the avatar around the middle of the next gap: flap whenever the
//! avatar's center drops below the target line and it is not already rising.

use super::collision::has_cleared;
use super::entity::Collidable;
use super::state::GameState;

/// Y the autopilot steers toward: the gap center of the nearest obstacle not
/// yet passed, or the middle of the playfield when none is ahead
pub fn target_y(state: &GameState) -> f32 {
    let fallback = state.viewport.ground_y() / 2.0;
    let Some(avatar) = state.avatar.as_ref() else {
        return fallback;
    };
    let bounds = avatar.bounds();

    state
        .obstacles
        .iter()
        .filter(|o| !has_cleared(&bounds, o))
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|o| o.gap_center())
        .unwrap_or(fallback)
}

/// Whether the autopilot wants an impulse this frame
pub fn wants_flap(state: &GameState) -> bool {
    let Some(avatar) = state.avatar.as_ref() else {
        return false;
    };
    if avatar.is_dying() {
        return false;
    }
    avatar.center().y > target_y(state) && avatar.velocity >= 0.0
}

//! Collision detection and scoring
//!
//! The avatar is an axis-aligned rectangle. Obstacles are a "slotted" pair of
//! rectangles (top column, bottom column) and pickups are circles tested
//! against the avatar's half width.

use super::entity::{Collidable, Rect, Updatable};
use super::event::GameEvent;
use super::state::{Avatar, GameState, Obstacle, Pickup};
use crate::consts::GROUND_SETTLE_TOLERANCE;

/// Avatar overlaps an obstacle column (anywhere outside the gap)
pub fn hits_obstacle(avatar: &Rect, obstacle: &Obstacle) -> bool {
    avatar.overlaps_x(&obstacle.bounds())
        && (avatar.top() < obstacle.top_height || avatar.bottom() > obstacle.gap_bottom())
}

/// Avatar's leading edge is past the obstacle's trailing edge
pub fn has_cleared(avatar: &Rect, obstacle: &Obstacle) -> bool {
    avatar.left() > obstacle.bounds().right()
}

/// Center distance strictly below half width + radius, and not collected yet
pub fn touches_pickup(avatar: &Avatar, pickup: &Pickup) -> bool {
    let distance = avatar.center().distance(pickup.pos);
    distance < avatar.half_width() + pickup.radius && !pickup.collected
}

/// Bottom edge reached the ground line (starts the death sequence)
pub fn touches_ground(avatar: &Rect, ground_y: f32) -> bool {
    avatar.bottom() >= ground_y
}

/// Bottom edge within the settle tolerance of the ground line
/// (gates game over while dying)
pub fn settled_on_ground(avatar: &Rect, ground_y: f32) -> bool {
    avatar.bottom() >= ground_y - GROUND_SETTLE_TOLERANCE
}

/// Result of the obstacle pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleSweep {
    Clear,
    /// Avatar hit the obstacle with this id; the pass stopped there
    Collided { obstacle_id: u32 },
}

/// Move obstacles, prune the ones that left the screen, test for impact and
/// credit cleared obstacles. Iterates newest-first so removal is safe and
/// stops at the first impact.
pub fn sweep_obstacles(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> ObstacleSweep {
    let Some(avatar) = state.avatar.as_ref().map(|a| a.bounds()) else {
        return ObstacleSweep::Clear;
    };

    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.update(dt);

        if obstacle.is_off_screen() {
            state.obstacles.remove(i);
            continue;
        }

        if hits_obstacle(&avatar, obstacle) {
            return ObstacleSweep::Collided {
                obstacle_id: obstacle.id,
            };
        }

        if !obstacle.scored && has_cleared(&avatar, obstacle) {
            obstacle.scored = true;
            state.scores.obstacles += 1;
            state.score_changed(events);
        }
    }

    ObstacleSweep::Clear
}

/// Move pickups, prune off-screen ones, collect the ones the avatar touches.
/// Returns how many were collected.
pub fn sweep_pickups(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> u32 {
    let Some(avatar) = state.avatar.clone() else {
        return 0;
    };

    let mut collected = 0;
    for i in (0..state.pickups.len()).rev() {
        let pickup = &mut state.pickups[i];
        pickup.update(dt);

        if pickup.is_off_screen() {
            state.pickups.remove(i);
            continue;
        }

        if touches_pickup(&avatar, pickup) {
            pickup.collected = true;
            let origin = pickup.origin;
            state.pickups.remove(i);

            state.scores.pickups += 1;
            collected += 1;
            events.push(GameEvent::PickupCollected { origin });
            state.score_changed(events);
        }
    }

    collected
}

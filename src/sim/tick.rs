//! Per-frame simulation tick
//!
//! Advances the session by one variable-length frame. Within a Running frame
//! the order is: impulse, avatar physics, ground check, backdrop, spawn
//! timers, obstacle motion/collision/scoring, pickup motion/collection,
//! ground scroll. A death detected mid-frame skips the remaining gameplay
//! steps of that frame.

use super::autopilot;
use super::collision::{ObstacleSweep, sweep_obstacles, sweep_pickups, touches_ground};
use super::entity::{Collidable, Updatable};
use super::event::{DeathCause, GameEvent};
use super::lifecycle::{advance_dying, begin_dying};
use super::spawner;
use super::state::{GamePhase, GameState};
use crate::consts::{MAX_FRAME_DELTA_MS, NOMINAL_FRAME_MS};

/// Elapsed time for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Unclamped wall-clock milliseconds since the previous frame
    /// (drives spawn timers and the game-over delay)
    pub raw_ms: f32,
    /// Physics scale: clamped delta over one nominal 60 Hz frame
    pub dt: f32,
}

impl FrameTime {
    /// Derive both time bases from a timestamp delta
    pub fn from_delta_ms(delta_ms: f32) -> Self {
        let raw_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            raw_ms,
            dt: raw_ms.min(MAX_FRAME_DELTA_MS) / NOMINAL_FRAME_MS,
        }
    }

    /// Exactly one nominal frame (dt == 1.0)
    pub fn nominal() -> Self {
        Self {
            raw_ms: NOMINAL_FRAME_MS,
            dt: 1.0,
        }
    }
}

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Impulse requested (click/tap/space)
    pub flap: bool,
    /// Demo mode - the autopilot decides when to flap
    pub autopilot: bool,
}

/// Advance the game state by one frame and return what happened
pub fn tick(state: &mut GameState, input: &TickInput, frame: FrameTime) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing to simulate before the first session
    if state.avatar.is_none() {
        return events;
    }

    match state.phase {
        GamePhase::Idle | GamePhase::Paused | GamePhase::GameOver => return events,
        GamePhase::Dying => {
            advance_dying(state, frame.dt, frame.raw_ms, &mut events);
            return events;
        }
        GamePhase::Running => {}
    }

    let dt = frame.dt;
    let ground_y = state.viewport.ground_y();

    let flap = input.flap || (input.autopilot && autopilot::wants_flap(state));
    let mut hit_ground = false;
    if let Some(avatar) = state.avatar.as_mut() {
        if flap && avatar.trigger_impulse() {
            events.push(GameEvent::Flapped);
        }
        avatar.update(dt);
        hit_ground = touches_ground(&avatar.bounds(), ground_y);
    }
    if hit_ground {
        begin_dying(state, DeathCause::Ground, &mut events);
    }

    state.backdrop.update(dt);

    if state.phase == GamePhase::Running {
        spawner::advance(state, frame.raw_ms);

        match sweep_obstacles(state, dt, &mut events) {
            ObstacleSweep::Collided { obstacle_id } => {
                log::debug!("Avatar hit obstacle {}", obstacle_id);
                begin_dying(state, DeathCause::Obstacle, &mut events);
            }
            ObstacleSweep::Clear => {
                sweep_pickups(state, dt, &mut events);
            }
        }
    }

    state.ground.update(dt);
    state.time_ticks += 1;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimSettings;
    use crate::sim::state::{AvatarPose, Obstacle, Pickup, PickupOrigin, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(Viewport::new(800.0, 720.0), SimSettings::default(), seed);
        state.start_session(&mut Vec::new());
        state
    }

    fn flap() -> TickInput {
        TickInput {
            flap: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_time_clamps_physics_only() {
        let frame = FrameTime::from_delta_ms(100.0);
        assert_eq!(frame.raw_ms, 100.0);
        assert!((frame.dt - 32.0 / 16.67).abs() < 1e-5);

        let frame = FrameTime::from_delta_ms(16.67);
        assert!((frame.dt - 1.0).abs() < 1e-5);

        let frame = FrameTime::from_delta_ms(-5.0);
        assert_eq!(frame.raw_ms, 0.0);
        assert_eq!(frame.dt, 0.0);

        assert_eq!(FrameTime::from_delta_ms(f32::NAN).dt, 0.0);
    }

    #[test]
    fn test_tick_without_avatar_is_noop() {
        let mut state = GameState::new(Viewport::default(), SimSettings::default(), 1);
        state.phase = GamePhase::Running;
        let events = tick(&mut state, &flap(), FrameTime::nominal());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.spawner.obstacle_timer_ms, 0.0);
    }

    #[test]
    fn test_paused_and_over_do_not_advance() {
        let mut state = running(1);
        state.pause();
        let y = state.avatar.as_ref().unwrap().pos.y;
        tick(&mut state, &flap(), FrameTime::nominal());
        assert_eq!(state.avatar.as_ref().unwrap().pos.y, y);
        assert_eq!(state.time_ticks, 0);

        state.phase = GamePhase::GameOver;
        assert!(tick(&mut state, &flap(), FrameTime::nominal()).is_empty());
    }

    #[test]
    fn test_flap_applies_before_gravity() {
        let mut state = running(1);
        let events = tick(&mut state, &flap(), FrameTime::nominal());
        let avatar = state.avatar.as_ref().unwrap();
        assert!((avatar.velocity - (-6.0 + 0.4)).abs() < 1e-5);
        assert_eq!(avatar.pose, AvatarPose::Ascending);
        assert_eq!(events, vec![GameEvent::Flapped]);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_ground_contact_starts_dying_and_freezes_spawns() {
        let mut state = running(1);
        let ground_y = state.viewport.ground_y();
        state.avatar.as_mut().unwrap().pos.y = ground_y - 70.0;
        state.spawner.obstacle_timer_ms = 1490.0;

        let events = tick(&mut state, &TickInput::default(), FrameTime::nominal());

        assert_eq!(state.phase, GamePhase::Dying);
        assert_eq!(
            events,
            vec![GameEvent::DeathStarted {
                cause: DeathCause::Ground
            }]
        );
        // Spawn timer did not advance on the death frame
        assert_eq!(state.spawner.obstacle_timer_ms, 1490.0);
        assert!(state.obstacles.is_empty());
        // Cosmetic scroll still ran
        assert!(state.backdrop.offset < 0.0);
        assert!(state.ground.offset > 0.0);
    }

    #[test]
    fn test_obstacle_hit_skips_pickup_pass() {
        let mut state = running(1);
        state.avatar.as_mut().unwrap().pos = Vec2::new(200.0, 50.0);
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, 190.0, 300.0, 200.0, 3.0, 620.0));
        let id = state.next_entity_id();
        state.pickups.push(Pickup::new(
            id,
            PickupOrigin::Sky,
            Vec2::new(240.0, 90.0),
            15.0,
            3.0,
        ));

        let events = tick(&mut state, &TickInput::default(), FrameTime::nominal());

        assert_eq!(state.phase, GamePhase::Dying);
        assert_eq!(state.death.cause, Some(DeathCause::Obstacle));
        // Pickup overlapping the avatar was neither moved nor collected
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos.x, 240.0);
        assert_eq!(state.scores.pickups, 0);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PickupCollected { .. }))
        );
    }

    #[test]
    fn test_flap_ignored_while_dying() {
        let mut state = running(1);
        begin_dying(&mut state, DeathCause::Obstacle, &mut Vec::new());
        let velocity = state.avatar.as_ref().unwrap().velocity;

        let events = tick(&mut state, &flap(), FrameTime::nominal());

        assert!(!events.contains(&GameEvent::Flapped));
        let avatar = state.avatar.as_ref().unwrap();
        assert!((avatar.velocity - (velocity + 0.4)).abs() < 1e-5);
    }

    #[test]
    fn test_dying_runs_to_game_over() {
        let mut state = running(1);
        let ground_y = state.viewport.ground_y();
        state.avatar.as_mut().unwrap().pos.y = ground_y - 70.0;
        let mut events = tick(&mut state, &TickInput::default(), FrameTime::nominal());

        for _ in 0..200 {
            events.extend(tick(&mut state, &flap(), FrameTime::from_delta_ms(20.0)));
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.death.grounded_ms.unwrap() >= 800.0);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_long_frame_counts_in_full_for_spawns() {
        let mut state = running(1);
        state.avatar.as_mut().unwrap().pos.y = 100.0;
        tick(&mut state, &TickInput::default(), FrameTime::from_delta_ms(1600.0));
        // Physics moved by at most the clamped step, the spawn timer by the full delta
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.pickups.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(seed in 0u64..500, flaps in prop::collection::vec(any::<bool>(), 1..400)) {
            let mut state = running(seed);
            let mut last = 0;
            for flap in flaps {
                let input = TickInput { flap, autopilot: true };
                tick(&mut state, &input, FrameTime::nominal());
                prop_assert!(state.scores.overall >= last);
                last = state.scores.overall;
            }
        }
    }
}

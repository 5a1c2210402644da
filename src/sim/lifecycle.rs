//! Death sequence: Running -> Dying -> GameOver
//!
//! Both transitions are guarded so re-entry is a no-op. While dying, only the
//! avatar, backdrop and ground keep moving; spawning and obstacle/pickup
//! motion are frozen.

use super::collision::{settled_on_ground, touches_ground};
use super::entity::{Collidable, Updatable};
use super::event::{DeathCause, GameEvent};
use super::state::{DeathClock, GamePhase, GameState};
use crate::consts::GAME_OVER_DELAY_MS;
use crate::highscores::RecordOutcome;

/// Enter Dying. Returns false if the run is not Running (already dying,
/// over, paused or idle), in which case nothing changes.
pub fn begin_dying(state: &mut GameState, cause: DeathCause, events: &mut Vec<GameEvent>) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }

    state.phase = GamePhase::Dying;
    state.death = DeathClock {
        cause: Some(cause),
        ..DeathClock::default()
    };
    if let Some(avatar) = state.avatar.as_mut() {
        avatar.begin_dying();
    }

    log::info!("Death started ({:?}) at score {}", cause, state.scores.overall);
    events.push(GameEvent::DeathStarted { cause });
    true
}

/// One Dying frame: fall, settle on the ground, and finish the run once the
/// avatar has rested there for `GAME_OVER_DELAY_MS` of real time.
/// Returns the record outcome on the frame the run ends.
pub fn advance_dying(
    state: &mut GameState,
    dt: f32,
    elapsed_ms: f32,
    events: &mut Vec<GameEvent>,
) -> Option<RecordOutcome> {
    if state.phase != GamePhase::Dying {
        return None;
    }
    state.death.elapsed_ms += elapsed_ms;

    let ground_y = state.viewport.ground_y();
    let Some(avatar) = state.avatar.as_mut() else {
        return None;
    };
    avatar.update(dt);
    if touches_ground(&avatar.bounds(), ground_y) {
        avatar.pin_to_ground(ground_y);
    }
    let settled = settled_on_ground(&avatar.bounds(), ground_y);

    state.backdrop.update(dt);
    state.ground.update(dt);

    if settled {
        // The first settled frame starts the clock, later frames add to it
        let grounded = match state.death.grounded_ms {
            Some(ms) => ms + elapsed_ms,
            None => 0.0,
        };
        state.death.grounded_ms = Some(grounded);

        if grounded >= GAME_OVER_DELAY_MS {
            return finish_game_over(state, events);
        }
    }
    None
}

/// Enter GameOver and settle records. Fires at most once per run.
pub fn finish_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<RecordOutcome> {
    if state.phase != GamePhase::Dying {
        return None;
    }
    state.phase = GamePhase::GameOver;

    let final_score = state.scores.overall;
    let outcome = state.records.settle(final_score);

    log::info!(
        "Game over: score {} after {:.0}ms of dying",
        final_score,
        state.death.elapsed_ms
    );
    events.push(GameEvent::GameOver {
        final_score,
        new_session_best: outcome.new_session_best,
        new_all_time_best: outcome.new_all_time_best,
    });
    Some(outcome)
}

//! Events emitted by the simulation for the UI/audio layer

use serde::{Deserialize, Serialize};

use super::state::PickupOrigin;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Ground,
    Obstacle,
}

/// Notifications produced while ticking or handling commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Aggregate score or one of its counters changed
    ScoreChanged {
        overall: u64,
        obstacles: u64,
        pickups: u64,
    },
    /// An impulse was applied (flap sound)
    Flapped,
    /// A pickup was collected (chime)
    PickupCollected { origin: PickupOrigin },
    /// Impact detected, fires once per run (impact sound, music stop)
    DeathStarted { cause: DeathCause },
    /// Terminal event of a run. At most one record flag is set.
    GameOver {
        final_score: u64,
        new_session_best: bool,
        new_all_time_best: bool,
    },
    /// A new run started from a clean slate
    SessionReset,
    Paused,
    Resumed,
    /// Session and all-time bests were cleared
    RecordsReset,
}

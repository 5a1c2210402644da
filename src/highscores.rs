//! Session and all-time records
//!
//! The session best lives for the process lifetime; the all-time best is
//! loaded from and written back to a `RecordStore`.

use serde::{Deserialize, Serialize};

/// Which record (if any) a finished run set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub new_session_best: bool,
    pub new_all_time_best: bool,
}

/// Best scores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    /// Best overall score since the process started (tracks live score)
    pub session_best: u64,
    /// Best overall score ever (persisted)
    pub all_time_best: u64,
    /// Session best as it stood when the current run began
    #[serde(skip)]
    run_baseline: u64,
}

impl Records {
    /// Start with a previously persisted all-time best
    pub fn with_all_time_best(all_time_best: u64) -> Self {
        Self {
            all_time_best,
            ..Self::default()
        }
    }

    /// Remember what the current run has to beat
    pub fn begin_run(&mut self) {
        self.run_baseline = self.session_best;
    }

    /// Follow the live score
    pub fn observe(&mut self, overall: u64) {
        self.session_best = self.session_best.max(overall);
    }

    /// Settle the final score of a run.
    ///
    /// An all-time record always wins over a session record, so at most one
    /// flag is set. The session record is judged against the best from
    /// earlier runs, since the live best already includes this run.
    pub fn settle(&mut self, final_score: u64) -> RecordOutcome {
        let mut outcome = RecordOutcome {
            new_session_best: final_score > self.run_baseline,
            new_all_time_best: false,
        };
        self.observe(final_score);

        if final_score > self.all_time_best {
            self.all_time_best = final_score;
            outcome.new_all_time_best = true;
            outcome.new_session_best = false;
        }

        if outcome.new_all_time_best {
            log::info!("New all-time best: {}", final_score);
        } else if outcome.new_session_best {
            log::info!("New session best: {}", final_score);
        }
        outcome
    }

    /// Forget every record
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

//! All-time record persistence
//!
//! The core only ever reads and writes a single integer. Backends live in
//! `platform::storage`; failures are contained there and never reach the
//! simulation.

/// Read/write access to the persisted all-time best score
pub trait RecordStore {
    /// Stored best, 0 when nothing usable is stored
    fn load_all_time_best(&self) -> u64;
    fn save_all_time_best(&mut self, score: u64);
}

/// Process-local store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    best: u64,
    /// Number of writes, handy for asserting when persistence happened
    pub saves: u32,
}

impl MemoryRecordStore {
    pub fn new(best: u64) -> Self {
        Self { best, saves: 0 }
    }
}

impl RecordStore for MemoryRecordStore {
    fn load_all_time_best(&self) -> u64 {
        self.best
    }

    fn save_all_time_best(&mut self, score: u64) {
        self.best = score;
        self.saves += 1;
    }
}

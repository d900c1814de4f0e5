//! Satellite Shared Types
//!
//! This crate provides the device state machine, value types and the
//! observer interface shared by the satellite console and its command engine.

pub mod observer;
pub mod state_machine;
pub mod types;

use std::time::{SystemTime, UNIX_EPOCH};

// Re-export commonly used types at crate root
pub use observer::{Notice, Observer, TracingObserver};
pub use state_machine::{Rejection, Satellite, Transition, TransitionResult};
pub use types::{
    CommandKind, Direction, HistoryEntry, PanelState, ParseDirectionError, StateSnapshot,
};

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Amount added to `data_collected` by one successful collection
pub const DATA_PER_COLLECTION: u64 = 10;

/// Retry parameters shipped with the console
pub mod retry {
    /// Attempts per command before giving up (first try included)
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Fixed delay between attempts in milliseconds
    pub const DEFAULT_BACKOFF_MS: u64 = 1000;
}

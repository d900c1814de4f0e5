//! Observability sink
//!
//! The satellite and the command engine report through an [`Observer`]
//! handed to them at startup instead of writing to a process-wide logger.

use crate::types::{CommandKind, Direction, PanelState, StateSnapshot};
use tracing::{error, info, warn};

/// Engine events worth reporting
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A command is about to run
    Executing { kind: CommandKind },
    /// Device being reset to defaults
    Initializing,
    /// Rotation skipped, already pointing there
    AlreadyOriented { direction: Direction },
    /// Slewing towards a new direction
    Rotating { direction: Direction },
    /// Solar panels being driven into `state`
    DrivingPanels { state: PanelState },
    /// Panels are active and a collection is under way
    Collecting,
    /// A command changed state
    Applied { kind: CommandKind },
    /// One attempt failed; `will_retry` tells whether another follows
    AttemptFailed {
        kind: CommandKind,
        attempt: u32,
        max_attempts: u32,
        error: String,
        will_retry: bool,
    },
    /// Retries ran out and the failure was swallowed by policy
    Absorbed { kind: CommandKind, error: String },
}

/// Receives state snapshots and engine notices
pub trait Observer: Send + Sync {
    fn state(&self, snapshot: &StateSnapshot);

    fn notice(&self, notice: &Notice);
}

/// Observer that renders everything through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn state(&self, snapshot: &StateSnapshot) {
        info!("Orientation: {}", snapshot.orientation);
        info!("Solar Panels: {}", snapshot.panels);
        info!("Data Collected: {}", snapshot.data_collected);
    }

    fn notice(&self, notice: &Notice) {
        match notice {
            Notice::Executing { kind } => {
                info!("[{}] executing", kind);
            }
            Notice::Initializing => {
                info!("Initializing satellite.....");
            }
            Notice::AlreadyOriented { direction } => {
                info!("Satellite is already in {} direction", direction);
            }
            Notice::Rotating { direction } => {
                info!("Rotating the satellite to {}...", direction);
            }
            Notice::DrivingPanels { state } => match state {
                PanelState::Active => info!("Activating solar panels..."),
                PanelState::Inactive => info!("Deactivating solar panels..."),
            },
            Notice::Collecting => {
                info!("Collecting data...");
            }
            Notice::Applied { kind } => {
                info!("[{}] applied", kind);
            }
            Notice::AttemptFailed {
                kind,
                attempt,
                max_attempts,
                error,
                will_retry,
            } => {
                if *will_retry {
                    warn!(
                        "[{}] attempt {}/{} failed: {}, retrying...",
                        kind, attempt, max_attempts, error
                    );
                } else {
                    error!("[{}] attempt {}/{} failed: {}", kind, attempt, max_attempts, error);
                }
            }
            Notice::Absorbed { kind, error } => {
                error!("[{}] giving up, failure absorbed: {}", kind, error);
            }
        }
    }
}

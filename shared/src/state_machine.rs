//! Satellite State Machine
//!
//! Holds orientation, panel activation, collected data and the command
//! history. All mutation goes through [`Satellite::apply`], which is what
//! keeps the invariants below:
//!
//! - orientation is always one of the four directions
//! - data only grows, in steps of [`DATA_PER_COLLECTION`], while panels are
//!   active; `Reset` is the one transition that zeroes it
//! - history only grows through applied transitions (no-ops and rejections
//!   leave it alone); `Reset` starts a fresh history

use crate::observer::Observer;
use crate::types::{CommandKind, Direction, HistoryEntry, PanelState, StateSnapshot};
use crate::{now_ms, DATA_PER_COLLECTION};
use thiserror::Error;

/// State changes a command can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Back to defaults (North, Inactive, 0)
    ///
    /// The only transition that lowers `data_collected` or drops history
    /// entries; history restarts with the reset itself as its sole entry.
    Reset,
    /// Point at the given direction
    Rotate(Direction),
    /// Switch the solar panels on or off
    SetPanels(PanelState),
    /// Gather one unit of data
    Collect,
}

impl Transition {
    /// The command that records this transition in history
    pub fn command_kind(&self) -> CommandKind {
        match self {
            Transition::Reset => CommandKind::Initialize,
            Transition::Rotate(_) => CommandKind::Rotate,
            Transition::SetPanels(PanelState::Active) => CommandKind::ActivatePanels,
            Transition::SetPanels(PanelState::Inactive) => CommandKind::DeactivatePanels,
            Transition::Collect => CommandKind::CollectData,
        }
    }
}

/// Why a transition was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Cannot collect data. Solar panels are inactive.")]
    PanelsInactive,
}

/// Result of a transition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult {
    /// State changed and the change was recorded
    Applied(StateSnapshot),
    /// Requested state already holds; nothing recorded
    Unchanged(StateSnapshot),
    /// Precondition failed; state untouched
    Rejected {
        from: StateSnapshot,
        reason: Rejection,
    },
}

/// The single controlled device
#[derive(Debug)]
pub struct Satellite {
    orientation: Direction,
    panels: PanelState,
    data_collected: u64,
    history: Vec<HistoryEntry>,
    next_sequence: u64,
}

impl Default for Satellite {
    fn default() -> Self {
        Self::new()
    }
}

impl Satellite {
    /// Create a satellite in its default state
    pub fn new() -> Self {
        Self {
            orientation: Direction::North,
            panels: PanelState::Inactive,
            data_collected: 0,
            history: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    pub fn panels(&self) -> PanelState {
        self.panels
    }

    pub fn data_collected(&self) -> u64 {
        self.data_collected
    }

    /// Commands that changed state, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            orientation: self.orientation,
            panels: self.panels,
            data_collected: self.data_collected,
            history_len: self.history.len(),
        }
    }

    /// Emit the current state to the observer
    pub fn show_state(&self, observer: &dyn Observer) {
        observer.state(&self.snapshot());
    }

    /// Apply a transition and return what happened
    pub fn apply(&mut self, transition: Transition) -> TransitionResult {
        match transition {
            Transition::Reset => {
                self.orientation = Direction::North;
                self.panels = PanelState::Inactive;
                self.data_collected = 0;
                self.history.clear();
            }
            Transition::Rotate(direction) => {
                if direction == self.orientation {
                    return TransitionResult::Unchanged(self.snapshot());
                }
                self.orientation = direction;
            }
            Transition::SetPanels(state) => {
                // Re-applying the current state still counts as an actuation
                self.panels = state;
            }
            Transition::Collect => {
                if self.panels != PanelState::Active {
                    return TransitionResult::Rejected {
                        from: self.snapshot(),
                        reason: Rejection::PanelsInactive,
                    };
                }
                self.data_collected += DATA_PER_COLLECTION;
            }
        }

        self.record_execution(transition.command_kind());
        TransitionResult::Applied(self.snapshot())
    }

    /// Append a history entry for a command that changed state
    fn record_execution(&mut self, kind: CommandKind) {
        let entry = HistoryEntry {
            sequence: self.next_sequence,
            kind,
            orientation: self.orientation,
            recorded_at_ms: now_ms(),
        };
        self.next_sequence += 1;
        self.history.push(entry);
    }
}
